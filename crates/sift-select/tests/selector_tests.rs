//! Integration tests for selector parsing.

use sift_select::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthSelector,
    ParseErrorKind, PseudoClass, PseudoElement, SelectorGroup, SimpleSelector, compile,
    parse_complex, parse_group,
};

fn subject_of(text: &str) -> CompoundSelector {
    parse_complex(text).unwrap().subject().clone()
}

fn only_simple(text: &str) -> SimpleSelector {
    let compound = subject_of(text);
    assert_eq!(compound.simple_selectors.len(), 1, "{text}");
    compound.simple_selectors[0].clone()
}

fn kind_of(text: &str) -> ParseErrorKind {
    compile(text).unwrap_err().kind
}

#[test]
fn test_parse_type_selector_lowercased() {
    assert_eq!(only_simple("BODY"), SimpleSelector::Type("body".to_string()));
}

#[test]
fn test_parse_id_and_class() {
    assert_eq!(only_simple("#main-content"), SimpleSelector::Id("main-content".to_string()));
    assert_eq!(only_simple(".highlight"), SimpleSelector::Class("highlight".to_string()));
    // ID names may start with a digit; class names may not.
    assert_eq!(only_simple("#1st"), SimpleSelector::Id("1st".to_string()));
    assert!(compile(".1st").is_err());
}

#[test]
fn test_parse_escaped_names() {
    assert_eq!(only_simple(".a\\.b"), SimpleSelector::Class("a.b".to_string()));
    assert_eq!(only_simple("#\\31 23"), SimpleSelector::Id("123".to_string()));
    assert_eq!(only_simple(".caf\\e9"), SimpleSelector::Class("café".to_string()));
}

#[test]
fn test_parse_universal() {
    let compound = subject_of("*");
    assert!(compound.simple_selectors.is_empty());
    assert_eq!(compound.pseudo_element, None);

    let compound = subject_of("*.a");
    assert_eq!(compound.simple_selectors, vec![SimpleSelector::Class("a".to_string())]);
}

#[test]
fn test_parse_attribute_operators() {
    let cases = [
        ("[href]", AttributeSelector::Exists("href".to_string())),
        ("[a=b]", AttributeSelector::Equals("a".to_string(), "b".to_string())),
        ("[a!=b]", AttributeSelector::NotEquals("a".to_string(), "b".to_string())),
        ("[a~=b]", AttributeSelector::Includes("a".to_string(), "b".to_string())),
        ("[a|=b]", AttributeSelector::DashMatch("a".to_string(), "b".to_string())),
        ("[a^=b]", AttributeSelector::PrefixMatch("a".to_string(), "b".to_string())),
        ("[a$=b]", AttributeSelector::SuffixMatch("a".to_string(), "b".to_string())),
        ("[a*=b]", AttributeSelector::SubstringMatch("a".to_string(), "b".to_string())),
    ];
    for (text, expected) in cases {
        assert_eq!(only_simple(text), SimpleSelector::Attribute(expected), "{text}");
    }
}

#[test]
fn test_parse_attribute_whitespace_and_strings() {
    assert_eq!(
        only_simple("[ title = 'hello world' ]"),
        SimpleSelector::Attribute(AttributeSelector::Equals(
            "title".to_string(),
            "hello world".to_string()
        ))
    );
    assert_eq!(
        only_simple(r#"[src$=".png"]"#),
        SimpleSelector::Attribute(AttributeSelector::SuffixMatch(
            "src".to_string(),
            ".png".to_string()
        ))
    );
}

#[test]
fn test_parse_attribute_regex() {
    let SimpleSelector::Attribute(AttributeSelector::Regex(name, pattern)) =
        only_simple("[href#=(^https?://)]")
    else {
        panic!("expected a regex attribute selector");
    };
    assert_eq!(name, "href");
    assert_eq!(pattern.as_str(), "(^https?://)");
}

#[test]
fn test_parse_pseudo_classes() {
    assert_eq!(only_simple(":root"), SimpleSelector::PseudoClass(PseudoClass::Root));
    assert_eq!(only_simple(":EMPTY"), SimpleSelector::PseudoClass(PseudoClass::Empty));
    assert_eq!(only_simple(":input"), SimpleSelector::PseudoClass(PseudoClass::Input));
    assert_eq!(
        only_simple(":only-of-type"),
        SimpleSelector::PseudoClass(PseudoClass::OnlyOfType)
    );
    assert_eq!(
        only_simple(":first-child"),
        SimpleSelector::PseudoClass(PseudoClass::Nth(NthSelector {
            a: 0,
            b: 1,
            last: false,
            of_type: false
        }))
    );
}

#[test]
fn test_parse_nth_variants() {
    let cases = [
        (":nth-child(2n+1)", 2, 1, false, false),
        (":nth-last-child(odd)", 2, 1, true, false),
        (":nth-of-type(even)", 2, 0, false, true),
        (":nth-last-of-type( -n + 3 )", -1, 3, true, true),
        (":nth-child(5)", 0, 5, false, false),
    ];
    for (text, a, b, last, of_type) in cases {
        assert_eq!(
            only_simple(text),
            SimpleSelector::PseudoClass(PseudoClass::Nth(NthSelector { a, b, last, of_type })),
            "{text}"
        );
    }
}

#[test]
fn test_parse_contains_lowercases() {
    assert_eq!(
        only_simple(":contains(\"Hello World\")"),
        SimpleSelector::PseudoClass(PseudoClass::Contains("hello world".to_string()))
    );
    assert_eq!(
        only_simple(":containsown(Word)"),
        SimpleSelector::PseudoClass(PseudoClass::ContainsOwn("word".to_string()))
    );
}

#[test]
fn test_parse_matches_keeps_nested_groups() {
    let SimpleSelector::PseudoClass(PseudoClass::Matches(pattern)) =
        only_simple(":matches(^(a|b)[0-9]$)")
    else {
        panic!("expected :matches");
    };
    assert_eq!(pattern.as_str(), "^(a|b)[0-9]$");
}

#[test]
fn test_parse_nested_groups() {
    let SimpleSelector::PseudoClass(PseudoClass::Not(group)) = only_simple(":not(.a, div > p)")
    else {
        panic!("expected :not");
    };
    assert_eq!(group.selectors.len(), 2);
    assert!(group.selectors[0].is_simple());
    assert!(!group.selectors[1].is_simple());

    let SimpleSelector::PseudoClass(PseudoClass::Has(group)) = only_simple(":has(:not(p))")
    else {
        panic!("expected :has");
    };
    assert_eq!(group.selectors.len(), 1);
}

#[test]
fn test_parse_combinators_fold_left() {
    let selector = parse_complex("a > b c").unwrap();
    let ComplexSelector::Combined {
        first,
        combinator,
        second,
    } = &selector
    else {
        panic!("expected a combined selector");
    };
    assert_eq!(*combinator, Combinator::Descendant);
    assert_eq!(second.simple_selectors, vec![SimpleSelector::Type("c".to_string())]);

    let ComplexSelector::Combined {
        first: inner_first,
        combinator: inner_combinator,
        second: inner_second,
    } = first.as_ref()
    else {
        panic!("expected a nested combined selector");
    };
    assert_eq!(*inner_combinator, Combinator::Child);
    assert_eq!(inner_second.simple_selectors, vec![SimpleSelector::Type("b".to_string())]);
    assert!(inner_first.is_simple());
}

#[test]
fn test_parse_all_combinators() {
    let cases = [
        ("a b", Combinator::Descendant),
        ("a>b", Combinator::Child),
        ("a + b", Combinator::NextSibling),
        ("a~b", Combinator::SubsequentSibling),
        ("a\n\t>\n b", Combinator::Child),
    ];
    for (text, expected) in cases {
        let ComplexSelector::Combined { combinator, .. } = parse_complex(text).unwrap() else {
            panic!("{text} should have a combinator");
        };
        assert_eq!(combinator, expected, "{text}");
    }
}

#[test]
fn test_parse_comments_as_whitespace() {
    assert_eq!(parse_complex("p +/*x*/ p").unwrap(), parse_complex("p + p").unwrap());
    assert_eq!(parse_complex("p/* x */p").unwrap(), parse_complex("p p").unwrap());
    assert_eq!(parse_complex("/* lead */ p").unwrap(), parse_complex("p").unwrap());
}

#[test]
fn test_parse_group() {
    let group = parse_group("a, b > c ,d").unwrap();
    assert_eq!(group.selectors.len(), 3);
    assert_eq!(group.selectors[1], parse_complex("b > c").unwrap());

    let parsed: SelectorGroup = "a, b".parse().unwrap();
    assert_eq!(parsed, parse_group("a,b").unwrap());
}

#[test]
fn test_parse_complex_rejects_comma() {
    let err = parse_complex("a, b").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TrailingInput { remaining: 3 });
    assert_eq!(err.position, 1);
}

#[test]
fn test_parse_pseudo_elements() {
    let compound = subject_of("p::first-line");
    assert_eq!(compound.pseudo_element, Some(PseudoElement::FirstLine));
    assert_eq!(compound.simple_selectors, vec![SimpleSelector::Type("p".to_string())]);

    // Legacy single-colon form.
    assert_eq!(subject_of("p:after").pseudo_element, Some(PseudoElement::After));
    assert_eq!(subject_of("*::selection").pseudo_element, Some(PseudoElement::Selection));

    let group = parse_group("a::before, b, c::marker").unwrap();
    assert_eq!(
        group.pseudo_elements().collect::<Vec<_>>(),
        vec![Some(PseudoElement::Before), None, Some(PseudoElement::Marker)]
    );
}

#[test]
fn test_error_trailing_input() {
    let err = compile("p )").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TrailingInput { remaining: 1 });
    assert_eq!(err.position, 2);

    let err = compile("div]x").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TrailingInput { remaining: 2 });
}

#[test]
fn test_error_empty_input() {
    assert_eq!(
        kind_of(""),
        ParseErrorKind::UnexpectedEndOfInput { expected: "selector" }
    );
    assert_eq!(
        kind_of("a,"),
        ParseErrorKind::UnexpectedEndOfInput { expected: "selector" }
    );
    assert!(matches!(kind_of("a >"), ParseErrorKind::UnexpectedEndOfInput { .. }));
}

#[test]
fn test_error_unexpected_character() {
    let err = compile("a > > b").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedCharacter {
            expected: "identifier",
            found: '>'
        }
    );
    assert_eq!(err.position, 4);
}

#[test]
fn test_error_strings() {
    assert_eq!(kind_of("[a='open]"), ParseErrorKind::UnterminatedString);
    assert!(matches!(
        kind_of("[a='line\nbreak']"),
        ParseErrorKind::UnexpectedCharacter { found: '\n', .. }
    ));
    assert_eq!(kind_of(".a\\"), ParseErrorKind::InvalidEscape);
}

#[test]
fn test_error_unknown_pseudo_class() {
    let err = compile("p:hover").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownPseudoClass("hover".to_string()));
    assert_eq!(err.position, 1);
}

#[test]
fn test_error_parentheses() {
    assert_eq!(
        kind_of(":has"),
        ParseErrorKind::MissingOpeningParenthesis("has".to_string())
    );
    assert_eq!(
        kind_of(":not(p"),
        ParseErrorKind::MissingClosingParenthesis("not".to_string())
    );
    assert_eq!(
        kind_of(":contains('x' y)"),
        ParseErrorKind::MissingClosingParenthesis("contains".to_string())
    );
}

#[test]
fn test_error_attribute() {
    assert_eq!(
        kind_of("[a%=b]"),
        ParseErrorKind::UnsupportedAttributeOperator("%=".to_string())
    );
    assert!(matches!(kind_of("[a=b"), ParseErrorKind::UnexpectedEndOfInput { .. }));
    assert!(matches!(kind_of("[a=b c]"), ParseErrorKind::UnexpectedCharacter { found: 'c', .. }));
    assert!(matches!(kind_of("[a#=(b]"), ParseErrorKind::UnexpectedEndOfInput { .. }));
    assert!(matches!(kind_of("[a#=b{2,1}]"), ParseErrorKind::InvalidRegex(_)));
}

#[test]
fn test_error_pseudo_element_placement() {
    assert_eq!(
        kind_of("::before"),
        ParseErrorKind::StandalonePseudoElement("before".to_string())
    );
    assert_eq!(
        kind_of("div > ::after"),
        ParseErrorKind::StandalonePseudoElement("after".to_string())
    );
    assert_eq!(
        kind_of("p::before:first-child"),
        ParseErrorKind::ClauseAfterPseudoElement("before".to_string())
    );
    assert_eq!(
        kind_of("p::before > a"),
        ParseErrorKind::ClauseAfterPseudoElement("before".to_string())
    );
}

#[test]
fn test_error_nth_integer_overflow() {
    assert_eq!(kind_of(":nth-child(99999999999)"), ParseErrorKind::InvalidInteger);
}

#[test]
fn test_error_display_includes_position() {
    let err = compile("p:hover").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown pseudo-class or pseudo-element :hover (at byte 1)"
    );
}
