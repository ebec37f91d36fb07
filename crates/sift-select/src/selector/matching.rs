//! [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
//!
//! Matching walks the tree through [`SelectorTree`] and never mutates it.

use serde::Serialize;

use super::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthSelector, PseudoClass,
    PseudoElement, SelectorGroup, SimpleSelector, Specificity,
};
use crate::tree::{NodeKind, SelectorTree, ancestors, children, children_rev, preceding_siblings};

/// Tags matched by `:input`.
const FORM_CONTROL_TAGS: [&str; 4] = ["input", "select", "textarea", "button"];

/// One alternative of a group that matched an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchDetail {
    /// Specificity of the matching alternative.
    pub specificity: Specificity,
    /// The part of the element the alternative targets, if any.
    pub pseudo_element: Option<PseudoElement>,
}

impl SelectorGroup {
    /// Whether any alternative matches `node`.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        self.selectors.iter().any(|sel| sel.matches(tree, node))
    }

    /// Every node under `root` (including `root`) that matches, in document order.
    #[must_use]
    pub fn match_all<T: SelectorTree>(&self, tree: &T, root: T::Node) -> Vec<T::Node> {
        let mut found = Vec::new();
        let mut stack = vec![root];
        #[cfg(feature = "match-trace")]
        let mut visited = 0usize;

        while let Some(node) = stack.pop() {
            #[cfg(feature = "match-trace")]
            {
                visited += 1;
            }
            if self.matches(tree, node) {
                found.push(node);
            }
            // Reversed so the first child is popped next.
            stack.extend(children_rev(tree, node));
        }

        #[cfg(feature = "match-trace")]
        eprintln!("[MATCH] '{self}' matched {} of {visited} nodes", found.len());

        found
    }

    /// The first node under `root` (including `root`) that matches, in document order.
    #[must_use]
    pub fn match_first<T: SelectorTree>(&self, tree: &T, root: T::Node) -> Option<T::Node> {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if self.matches(tree, node) {
                #[cfg(feature = "match-trace")]
                eprintln!("[MATCH] '{self}' first match found");
                return Some(node);
            }
            stack.extend(children_rev(tree, node));
        }
        None
    }

    /// The nodes of `nodes` that match, order preserved. No tree traversal.
    #[must_use]
    pub fn filter<T: SelectorTree>(
        &self,
        tree: &T,
        nodes: impl IntoIterator<Item = T::Node>,
    ) -> Vec<T::Node> {
        nodes
            .into_iter()
            .filter(|&node| self.matches(tree, node))
            .collect()
    }

    /// Highest specificity among the alternatives that match `node`, or `None`
    /// if no alternative matches.
    #[must_use]
    pub fn match_with_specificity<T: SelectorTree>(
        &self,
        tree: &T,
        node: T::Node,
    ) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|sel| sel.matches(tree, node))
            .map(ComplexSelector::specificity)
            .max()
    }

    /// Specificity and pseudo-element of every alternative that matches `node`,
    /// in source order.
    #[must_use]
    pub fn match_details<T: SelectorTree>(&self, tree: &T, node: T::Node) -> Vec<MatchDetail> {
        self.selectors
            .iter()
            .filter(|sel| sel.matches(tree, node))
            .map(|sel| MatchDetail {
                specificity: sel.specificity(),
                pseudo_element: sel.pseudo_element(),
            })
            .collect()
    }
}

impl ComplexSelector {
    /// The subject compound must match `node`, and the rest of the chain must
    /// match the related nodes its combinators point at.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        match self {
            Self::Compound(compound) => compound.matches(tree, node),
            Self::Combined {
                first,
                combinator,
                second,
            } => second.matches(tree, node) && combinator.relates(first, tree, node),
        }
    }
}

impl Combinator {
    /// Whether `node` stands in this relationship to some node matching `first`.
    fn relates<T: SelectorTree>(self, first: &ComplexSelector, tree: &T, node: T::Node) -> bool {
        match self {
            // [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators)
            Self::Descendant => ancestors(tree, node).any(|a| first.matches(tree, a)),

            // [§ 16.2](https://www.w3.org/TR/selectors-4/#child-combinators)
            Self::Child => tree.parent(node).is_some_and(|p| first.matches(tree, p)),

            // [§ 16.3](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
            // Text and comments in between are skipped; only the nearest
            // element is tested.
            Self::NextSibling => preceding_siblings(tree, node)
                .find(|&s| !matches!(tree.kind(s), NodeKind::Text | NodeKind::Comment))
                .is_some_and(|s| first.matches(tree, s)),

            // [§ 16.4](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
            Self::SubsequentSibling => {
                preceding_siblings(tree, node).any(|s| first.matches(tree, s))
            }
        }
    }
}

impl CompoundSelector {
    /// Whether `node` is an element meeting every condition. The
    /// pseudo-element plays no part.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        tree.is_element(node)
            && self
                .simple_selectors
                .iter()
                .all(|simple| simple.matches(tree, node))
    }
}

impl SimpleSelector {
    /// Check if this simple selector matches `node`.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        match self {
            // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
            Self::Type(name) => tree.tag_name(node) == Some(name.as_str()),

            // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
            Self::Id(id) => any_attribute(tree, node, "id", |v| v == id),

            // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
            Self::Class(class) => any_attribute(tree, node, "class", |v| includes_token(v, class)),

            Self::Attribute(attr) => attr.matches(tree, node),
            Self::PseudoClass(pc) => pc.matches(tree, node),
        }
    }
}

impl AttributeSelector {
    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        match self {
            Self::Exists(name) => any_attribute(tree, node, name, |_| true),
            Self::Equals(name, val) => any_attribute(tree, node, name, |v| v == val),
            Self::NotEquals(name, val) => {
                tree.is_element(node) && !any_attribute(tree, node, name, |v| v == val)
            }
            Self::Includes(name, val) => any_attribute(tree, node, name, |v| includes_token(v, val)),
            Self::DashMatch(name, val) => any_attribute(tree, node, name, |v| {
                v == val || v.strip_prefix(val.as_str()).is_some_and(|rest| rest.starts_with('-'))
            }),
            Self::PrefixMatch(name, val) => any_attribute(tree, node, name, |v| {
                !v.trim().is_empty() && v.starts_with(val.as_str())
            }),
            Self::SuffixMatch(name, val) => any_attribute(tree, node, name, |v| {
                !v.trim().is_empty() && v.ends_with(val.as_str())
            }),
            Self::SubstringMatch(name, val) => any_attribute(tree, node, name, |v| {
                !v.trim().is_empty() && v.contains(val.as_str())
            }),
            Self::Regex(name, pattern) => any_attribute(tree, node, name, |v| pattern.is_match(v)),
        }
    }
}

impl PseudoClass {
    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// Pseudo-classes only ever match elements.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        if !tree.is_element(node) {
            return false;
        }
        match self {
            Self::Not(group) => !group.matches(tree, node),
            Self::Has(group) => has_descendant(group, tree, node),
            Self::HasChild(group) => children(tree, node).any(|c| group.matches(tree, c)),
            Self::Contains(value) => node_text(tree, node).to_lowercase().contains(value.as_str()),
            Self::ContainsOwn(value) => {
                own_text(tree, node).to_lowercase().contains(value.as_str())
            }
            Self::Matches(pattern) => pattern.is_match(&node_text(tree, node)),
            Self::MatchesOwn(pattern) => pattern.is_match(&own_text(tree, node)),
            Self::Nth(nth) => nth.matches(tree, node),
            Self::OnlyChild => only_child(tree, node, false),
            Self::OnlyOfType => only_child(tree, node, true),
            Self::Input => tree
                .tag_name(node)
                .is_some_and(|tag| FORM_CONTROL_TAGS.contains(&tag)),
            // [§ 14.2](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
            Self::Empty => children(tree, node)
                .all(|c| !matches!(tree.kind(c), NodeKind::Element | NodeKind::Text)),
            // [§ 14.1](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
            Self::Root => tree
                .parent(node)
                .is_some_and(|p| tree.kind(p) == NodeKind::Document),
        }
    }
}

impl NthSelector {
    /// [§ 14.4.1 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    /// "The :nth-child(An+B) pseudo-class notation represents elements that
    /// are among An+Bth elements from the list composed of their inclusive
    /// siblings..."
    ///
    /// Elements whose parent is the document have no countable siblings and
    /// never match.
    fn matches<T: SelectorTree>(self, tree: &T, node: T::Node) -> bool {
        let Some(parent) = tree.parent(node) else {
            return false;
        };
        if tree.kind(parent) == NodeKind::Document {
            return false;
        }

        let tag = tree.tag_name(node);
        let counted = |c: &T::Node| {
            tree.is_element(*c) && (!self.of_type || tree.tag_name(*c) == tag)
        };

        if self.a == 0 {
            // A fixed position: stop as soon as it has been passed.
            let b = i64::from(self.b);
            let mut count = 0i64;
            let mut check = |c: T::Node| {
                count += 1;
                if c == node {
                    Some(count == b)
                } else if count >= b {
                    Some(false)
                } else {
                    None
                }
            };
            let outcome = if self.last {
                children_rev(tree, parent).filter(counted).find_map(&mut check)
            } else {
                children(tree, parent).filter(counted).find_map(&mut check)
            };
            return outcome.unwrap_or(false);
        }

        let mut total = 0i64;
        let mut index = None;
        for c in children(tree, parent).filter(counted) {
            total += 1;
            if c == node {
                index = Some(total);
                if !self.last {
                    break;
                }
            }
        }
        let Some(mut i) = index else {
            return false;
        };
        if self.last {
            i = total - i + 1;
        }

        let a = i64::from(self.a);
        let offset = i - i64::from(self.b);
        offset % a == 0 && offset / a >= 0
    }
}

/// [§ 14.4.5 :only-child](https://www.w3.org/TR/selectors-4/#the-only-child-pseudo)
/// The element is the only element child of its parent (of its type, when
/// `of_type` is set).
fn only_child<T: SelectorTree>(tree: &T, node: T::Node, of_type: bool) -> bool {
    let Some(parent) = tree.parent(node) else {
        return false;
    };
    if tree.kind(parent) == NodeKind::Document {
        return false;
    }
    let tag = tree.tag_name(node);
    children(tree, parent)
        .filter(|&c| tree.is_element(c) && (!of_type || tree.tag_name(c) == tag))
        .take(2)
        .count()
        == 1
}

/// Depth-first search of the strict descendants of `node`.
fn has_descendant<T: SelectorTree>(group: &SelectorGroup, tree: &T, node: T::Node) -> bool {
    children(tree, node)
        .any(|c| group.matches(tree, c) || (tree.is_element(c) && has_descendant(group, tree, c)))
}

/// Whether `node` is an element with an attribute named `name`
/// (ASCII case-insensitive) whose value satisfies `test`.
fn any_attribute<T: SelectorTree>(
    tree: &T,
    node: T::Node,
    name: &str,
    test: impl Fn(&str) -> bool,
) -> bool {
    tree.is_element(node)
        && tree
            .attributes(node)
            .any(|(key, value)| key.eq_ignore_ascii_case(name) && test(value))
}

/// Whether `list` is a whitespace-separated list containing `token`.
fn includes_token(list: &str, token: &str) -> bool {
    !token.is_empty()
        && list
            .split([' ', '\t', '\r', '\n', '\u{c}'])
            .any(|t| t == token)
}

/// Text of all text nodes under `node`, in document order.
fn node_text<T: SelectorTree>(tree: &T, node: T::Node) -> String {
    let mut text = String::new();
    collect_text(tree, node, &mut text);
    text
}

fn collect_text<T: SelectorTree>(tree: &T, node: T::Node, out: &mut String) {
    match tree.kind(node) {
        NodeKind::Text => out.push_str(tree.text(node).unwrap_or_default()),
        NodeKind::Element => {
            for c in children(tree, node) {
                collect_text(tree, c, out);
            }
        }
        NodeKind::Document | NodeKind::Comment => {}
    }
}

/// Text of the text nodes that are direct children of `node`.
fn own_text<T: SelectorTree>(tree: &T, node: T::Node) -> String {
    children(tree, node).filter_map(|c| tree.text(c)).collect()
}
