//! Property tests for parsing, serialization and matching.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sift_dom::{DomTree, NodeId};
use sift_select::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthSelector, PseudoClass,
    PseudoElement, SelectorGroup, SelectorTree, SimpleSelector, compile,
};

/// An identifier: up to two leading hyphens, a letter, then letters, digits,
/// `-` or `_`. Names opening with `--` only parse when escaped.
#[derive(Debug, Clone)]
struct Name(String);

impl Arbitrary for Name {
    fn arbitrary(g: &mut Gen) -> Self {
        let letters: Vec<char> = ('a'..='z').collect();
        let rest: Vec<char> = ('a'..='z').chain('0'..='9').chain(['-', '_']).collect();

        let mut name = (*g.choose(&["", "", "-", "--"]).unwrap()).to_string();
        name.push(*g.choose(&letters).unwrap());
        for _ in 0..usize::arbitrary(g) % 6 {
            name.push(*g.choose(&rest).unwrap());
        }
        Self(name)
    }
}

/// Short strings over characters that need quoting or escaping.
fn value(g: &mut Gen) -> String {
    let chars = ['a', 'z', '0', ' ', '"', '\'', '\\', '-', '.', 'é', ']', ')'];
    (0..usize::arbitrary(g) % 5)
        .map(|_| *g.choose(&chars).unwrap())
        .collect()
}

fn small(g: &mut Gen, below: i32) -> i32 {
    i32::from(i8::arbitrary(g)) % below
}

fn attribute(g: &mut Gen) -> AttributeSelector {
    let name = Name::arbitrary(g).0;
    match u8::arbitrary(g) % 8 {
        0 => AttributeSelector::Exists(name),
        1 => AttributeSelector::Equals(name, value(g)),
        2 => AttributeSelector::NotEquals(name, value(g)),
        3 => AttributeSelector::Includes(name, value(g)),
        4 => AttributeSelector::DashMatch(name, value(g)),
        5 => AttributeSelector::PrefixMatch(name, value(g)),
        6 => AttributeSelector::SuffixMatch(name, value(g)),
        _ => AttributeSelector::SubstringMatch(name, value(g)),
    }
}

fn pseudo_class(g: &mut Gen) -> PseudoClass {
    match u8::arbitrary(g) % 7 {
        0 => PseudoClass::Nth(NthSelector {
            a: small(g, 4),
            b: small(g, 6),
            last: bool::arbitrary(g),
            of_type: bool::arbitrary(g),
        }),
        1 => PseudoClass::OnlyChild,
        2 => PseudoClass::OnlyOfType,
        3 => PseudoClass::Empty,
        4 => PseudoClass::Root,
        5 => PseudoClass::Input,
        _ => PseudoClass::Contains(format!("x{}", value(g))),
    }
}

fn compound(g: &mut Gen) -> CompoundSelector {
    let mut simple_selectors = Vec::new();
    if bool::arbitrary(g) {
        simple_selectors.push(SimpleSelector::Type(Name::arbitrary(g).0));
    }
    for _ in 0..usize::arbitrary(g) % 4 {
        simple_selectors.push(match u8::arbitrary(g) % 4 {
            0 => SimpleSelector::Id(Name::arbitrary(g).0),
            1 => SimpleSelector::Class(Name::arbitrary(g).0),
            2 => SimpleSelector::Attribute(attribute(g)),
            _ => SimpleSelector::PseudoClass(pseudo_class(g)),
        });
    }
    CompoundSelector {
        simple_selectors,
        pseudo_element: None,
    }
}

fn combinator(g: &mut Gen) -> Combinator {
    *g.choose(&[
        Combinator::Descendant,
        Combinator::Child,
        Combinator::NextSibling,
        Combinator::SubsequentSibling,
    ])
    .unwrap()
}

fn chain(g: &mut Gen) -> ComplexSelector {
    let mut selector = ComplexSelector::Compound(compound(g));
    for _ in 0..usize::arbitrary(g) % 3 {
        selector = ComplexSelector::Combined {
            first: Box::new(selector),
            combinator: combinator(g),
            second: compound(g),
        };
    }

    if u8::arbitrary(g) % 4 == 0 {
        let pseudo = *g
            .choose(&[
                PseudoElement::Before,
                PseudoElement::After,
                PseudoElement::FirstLine,
                PseudoElement::Selection,
            ])
            .unwrap();
        match &mut selector {
            ComplexSelector::Compound(subject) | ComplexSelector::Combined { second: subject, .. } => {
                subject.pseudo_element = Some(pseudo);
            }
        }
    }
    selector
}

/// A selector group built directly as a syntax tree.
#[derive(Debug, Clone)]
struct Group(SelectorGroup);

impl Arbitrary for Group {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = usize::arbitrary(g) % 3 + 1;
        Self(SelectorGroup {
            selectors: (0..count).map(|_| chain(g)).collect(),
        })
    }
}

/// Build a document from a byte script: each byte appends an element, text
/// or comment to the current node, or steps back out to its parent.
fn build(script: &[u8]) -> DomTree {
    let tags = ["a", "b", "c", "input"];
    let mut tree = DomTree::new();
    let mut current = NodeId::ROOT;

    for &op in script {
        match op % 5 {
            0 | 1 => {
                let tag = tags[usize::from(op / 5) % tags.len()];
                let class = if op % 2 == 0 { "even" } else { "odd" };
                let child = tree.append_element(current, tag, &[("class", class)]);
                if op % 3 != 0 {
                    current = child;
                }
            }
            2 => {
                let _ = tree.append_text(current, if op % 2 == 0 { "Hello" } else { " " });
            }
            3 => {
                let _ = tree.append_comment(current, "c");
            }
            _ => {
                if let Some(parent) = tree.parent(current) {
                    current = parent;
                }
            }
        }
    }
    tree
}

/// The document node and every node below it, in tree order.
fn all_nodes(tree: &DomTree) -> Vec<NodeId> {
    std::iter::once(NodeId::ROOT)
        .chain(tree.descendants(NodeId::ROOT))
        .collect()
}

const SELECTORS: &[&str] = &[
    "a",
    "*",
    "a b",
    "a > b",
    "b + c",
    "a ~ c",
    ".even",
    "a.odd > *",
    ":first-child",
    ":last-of-type",
    "b:nth-child(2n+1)",
    ":nth-last-child(-n+2)",
    ":only-child",
    ":empty",
    ":root",
    ":not(a, .odd)",
    ":has(c)",
    ":haschild(b)",
    ":contains(hello)",
    ":containsown(hello)",
    ":matches(^He)",
    ":input",
    "[class|=even]",
    "[class!=odd]",
    "a, c > b, :empty",
];

#[quickcheck]
fn prop_printed_group_reparses_equal(group: Group) -> bool {
    compile(&group.0.to_string()).is_ok_and(|reparsed| reparsed == group.0)
}

#[quickcheck]
fn prop_printing_is_stable(group: Group) -> bool {
    let printed = group.0.to_string();
    compile(&printed).is_ok_and(|reparsed| reparsed.to_string() == printed)
}

#[quickcheck]
fn prop_type_selectors_ignore_case(name: Name, mask: Vec<bool>) -> bool {
    let printed = SimpleSelector::Type(name.0.clone()).to_string();
    let mixed: String = printed
        .chars()
        .zip(mask.into_iter().chain(std::iter::repeat(false)))
        .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
        .collect();

    let mut tree = DomTree::new();
    let element = tree.append_element(NodeId::ROOT, &name.0, &[]);

    let Ok(selector) = compile(&mixed) else {
        return false;
    };
    selector.matches(&tree, element) && compile(&printed).is_ok_and(|lower| lower == selector)
}

#[quickcheck]
fn prop_universal_selects_every_element(script: Vec<u8>) -> bool {
    let tree = build(&script);
    let Ok(star) = compile("*") else {
        return false;
    };

    let elements: Vec<NodeId> = all_nodes(&tree)
        .into_iter()
        .filter(|&n| tree.is_element(n))
        .collect();
    all_nodes(&tree).len() == tree.len() && star.match_all(&tree, NodeId::ROOT) == elements
}

#[quickcheck]
fn prop_match_all_agrees_with_matches(script: Vec<u8>, which: u8) -> bool {
    let tree = build(&script);
    let text = SELECTORS[usize::from(which) % SELECTORS.len()];
    let Ok(group) = compile(text) else {
        return false;
    };

    let expected: Vec<NodeId> = all_nodes(&tree)
        .into_iter()
        .filter(|&n| group.matches(&tree, n))
        .collect();

    group.match_all(&tree, NodeId::ROOT) == expected
        && group.match_first(&tree, NodeId::ROOT) == expected.first().copied()
        && group.filter(&tree, all_nodes(&tree)) == expected
}

#[quickcheck]
fn prop_negation_is_complement_on_elements(script: Vec<u8>, which: u8) -> bool {
    let tree = build(&script);
    let inner = ["a", ".even", "b > c", ":first-child", "a ~ b", ":empty"];
    let text = inner[usize::from(which) % inner.len()];
    let (Ok(positive), Ok(negative)) = (compile(text), compile(&format!(":not({text})"))) else {
        return false;
    };

    all_nodes(&tree)
        .into_iter()
        .filter(|&n| tree.is_element(n))
        .all(|n| positive.matches(&tree, n) != negative.matches(&tree, n))
}

#[quickcheck]
fn prop_only_elements_ever_match(script: Vec<u8>, which: u8) -> bool {
    let tree = build(&script);
    let text = SELECTORS[usize::from(which) % SELECTORS.len()];
    compile(text).is_ok_and(|group| {
        group
            .match_all(&tree, NodeId::ROOT)
            .into_iter()
            .all(|n| tree.is_element(n))
    })
}
