//! Selector syntax tree.
//!
//! A parsed selector is a [`SelectorGroup`] of comma-separated
//! [`ComplexSelector`] chains. Each chain folds [`CompoundSelector`]s together
//! left to right with [`Combinator`]s. Every node kind can match a tree node,
//! report its specificity and render itself back to selector text, so nothing
//! is lost after parsing.

mod matching;
mod serialize;
mod specificity;

use std::fmt;

use regex::Regex;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

pub use matching::MatchDetail;
pub use specificity::Specificity;

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "A comma-separated list of selectors represents the union of all elements
/// selected by each of the individual selectors in the list."
///
/// Never empty once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorGroup {
    /// The alternatives, in source order.
    pub selectors: Vec<ComplexSelector>,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// "A complex selector is a chain of one or more compound selectors separated
/// by combinators."
///
/// Chains are folded to the left: `A > B C` is `Combined(Combined(A, >, B), ' ', C)`,
/// so the outermost `second` is always the subject of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexSelector {
    /// A single compound selector with no combinator.
    Compound(CompoundSelector),
    /// `first <combinator> second`.
    Combined {
        /// Everything to the left of the last combinator.
        first: Box<ComplexSelector>,
        /// How `second` relates to an element matched by `first`.
        combinator: Combinator,
        /// The rightmost compound, matched against the subject element.
        second: CompoundSelector,
    },
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    #[strum(serialize = " ")]
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    #[strum(serialize = ">")]
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "A selector of the form 'A + B' represents an element B that immediately
    /// follows element A, where A and B share the same parent."
    #[strum(serialize = "+")]
    NextSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "A selector of the form 'A ~ B' represents an element B that follows
    /// element A (not necessarily immediately), where A and B share the same parent."
    #[strum(serialize = "~")]
    SubsequentSibling,
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
///
/// An empty `simple_selectors` list is the universal selector: it matches
/// any element, but still only elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// Conditions that must all hold.
    pub simple_selectors: Vec<SimpleSelector>,
    /// Virtual sub-part named by a trailing `::pseudo-element`.
    pub pseudo_element: Option<PseudoElement>,
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// Stored lowercase.
    ///
    /// Examples: `div`, `p`, `span`
    Type(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// Example: `#main`
    Id(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// Example: `.highlight`
    Class(String),

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Examples: `[href]`, `[lang|=en]`, `[src$=".png"]`
    Attribute(AttributeSelector),

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// Examples: `:root`, `:nth-child(2n+1)`, `:not(.a, .b)`
    PseudoClass(PseudoClass),
}

/// Attribute selectors per [§ 6.4](https://www.w3.org/TR/selectors-4/#attribute-selectors).
///
/// The first field is the attribute name, compared ASCII case-insensitively.
/// Values are compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]`: "Represents an element with the att attribute"
    Exists(String),

    /// `[attr=value]`: value is exactly `value`.
    Equals(String, String),

    /// `[attr!=value]`: no `attr` attribute equal to `value`, including no
    /// `attr` at all. Non-standard, kept for compatibility.
    NotEquals(String, String),

    /// `[attr~=value]`: value is a whitespace-separated list containing `value`.
    Includes(String, String),

    /// `[attr|=value]`: value is `value` or starts with `value-`.
    DashMatch(String, String),

    /// `[attr^=value]`: value starts with `value`.
    PrefixMatch(String, String),

    /// `[attr$=value]`: value ends with `value`.
    SuffixMatch(String, String),

    /// `[attr*=value]`: value contains `value`.
    SubstringMatch(String, String),

    /// `[attr#=regex]`: value matches the regular expression anywhere.
    /// Non-standard.
    Regex(String, Pattern),
}

impl AttributeSelector {
    /// The attribute name this selector tests.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exists(name)
            | Self::Equals(name, _)
            | Self::NotEquals(name, _)
            | Self::Includes(name, _)
            | Self::DashMatch(name, _)
            | Self::PrefixMatch(name, _)
            | Self::SuffixMatch(name, _)
            | Self::SubstringMatch(name, _)
            | Self::Regex(name, _) => name,
        }
    }

    /// The operator, or `None` for a plain `[attr]` existence test.
    #[must_use]
    pub const fn operator(&self) -> Option<AttributeOperator> {
        match self {
            Self::Exists(_) => None,
            Self::Equals(..) => Some(AttributeOperator::Equals),
            Self::NotEquals(..) => Some(AttributeOperator::NotEquals),
            Self::Includes(..) => Some(AttributeOperator::Includes),
            Self::DashMatch(..) => Some(AttributeOperator::DashMatch),
            Self::PrefixMatch(..) => Some(AttributeOperator::PrefixMatch),
            Self::SuffixMatch(..) => Some(AttributeOperator::SuffixMatch),
            Self::SubstringMatch(..) => Some(AttributeOperator::SubstringMatch),
            Self::Regex(..) => Some(AttributeOperator::Regex),
        }
    }
}

/// The operators accepted between an attribute name and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum AttributeOperator {
    /// `=`
    #[strum(serialize = "=")]
    Equals,
    /// `!=`, non-standard.
    #[strum(serialize = "!=")]
    NotEquals,
    /// `~=`
    #[strum(serialize = "~=")]
    Includes,
    /// `|=`
    #[strum(serialize = "|=")]
    DashMatch,
    /// `^=`
    #[strum(serialize = "^=")]
    PrefixMatch,
    /// `$=`
    #[strum(serialize = "$=")]
    SuffixMatch,
    /// `*=`
    #[strum(serialize = "*=")]
    SubstringMatch,
    /// `#=`, non-standard.
    #[strum(serialize = "#=")]
    Regex,
}

/// Pseudo-classes per [§ 4](https://www.w3.org/TR/selectors-4/#pseudo-classes),
/// plus the long-standing non-standard `:haschild`, `:contains`, `:matches`
/// and `:input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    /// [§ 3.4 :not()](https://www.w3.org/TR/selectors-4/#negation)
    /// An element that matches none of the selectors in the group.
    Not(SelectorGroup),

    /// [§ 4.5 :has()](https://www.w3.org/TR/selectors-4/#relational)
    /// An element with at least one descendant matching the group.
    Has(SelectorGroup),

    /// An element with at least one child matching the group.
    HasChild(SelectorGroup),

    /// An element whose text content contains the (lowercased) string,
    /// compared case-insensitively.
    Contains(String),

    /// Like [`PseudoClass::Contains`] but only over the element's own text
    /// node children.
    ContainsOwn(String),

    /// An element whose text content matches the regular expression.
    Matches(Pattern),

    /// Like [`PseudoClass::Matches`] but only over the element's own text
    /// node children.
    MatchesOwn(Pattern),

    /// [§ 14.4 Child-indexed pseudo-classes](https://www.w3.org/TR/selectors-4/#child-index)
    /// The `:nth-*` family, and `:first-*`/`:last-*` as their `b = 1` forms.
    Nth(NthSelector),

    /// [§ 14.4.5 :only-child](https://www.w3.org/TR/selectors-4/#the-only-child-pseudo)
    /// "Represents an element that has no siblings."
    OnlyChild,

    /// [§ 14.5.5 :only-of-type](https://www.w3.org/TR/selectors-4/#the-only-of-type-pseudo)
    OnlyOfType,

    /// Form controls: `input`, `select`, `textarea`, `button`.
    Input,

    /// [§ 14.2 :empty](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
    /// No element or text children; comments are ignored.
    Empty,

    /// [§ 14.1 :root](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
    /// "Represents an element that is the root of the document."
    Root,
}

/// An `:nth-*` pseudo-class with its parsed `An+B` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthSelector {
    /// Step between matching positions.
    pub a: i32,
    /// Offset of the first matching position (1-based).
    pub b: i32,
    /// Count positions from the last sibling instead of the first.
    pub last: bool,
    /// Only count siblings with the same tag name.
    pub of_type: bool,
}

/// [§ 11 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
///
/// The closed set of recognized pseudo-element names. A pseudo-element does
/// not take part in matching; it names which part of the matched element a
/// rule applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PseudoElement {
    /// `::after`
    After,
    /// `::backdrop`
    Backdrop,
    /// `::before`
    Before,
    /// `::cue`
    Cue,
    /// `::first-letter`
    FirstLetter,
    /// `::first-line`
    FirstLine,
    /// `::grammar-error`
    GrammarError,
    /// `::marker`
    Marker,
    /// `::placeholder`
    Placeholder,
    /// `::selection`
    Selection,
    /// `::spelling-error`
    SpellingError,
}

/// A compiled regular expression that compares equal by source text.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile `source`.
    ///
    /// # Errors
    ///
    /// Returns the regex engine's error if `source` is not a valid pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    /// The pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the pattern matches anywhere in `haystack`.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl ComplexSelector {
    /// The rightmost compound selector, whose conditions apply to the
    /// element being matched.
    #[must_use]
    pub fn subject(&self) -> &CompoundSelector {
        match self {
            Self::Compound(compound) | Self::Combined { second: compound, .. } => compound,
        }
    }

    /// The pseudo-element of this chain, which can only sit on the subject.
    #[must_use]
    pub fn pseudo_element(&self) -> Option<PseudoElement> {
        self.subject().pseudo_element
    }

    /// Iterate over the compound selectors from right (subject) to left.
    pub fn compounds(&self) -> impl Iterator<Item = &CompoundSelector> {
        let mut next = Some(self);
        std::iter::from_fn(move || {
            let current = next?;
            match current {
                Self::Compound(compound) => {
                    next = None;
                    Some(compound)
                }
                Self::Combined { first, second, .. } => {
                    next = Some(first.as_ref());
                    Some(second)
                }
            }
        })
    }

    /// Whether this chain has no combinators.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        matches!(self, Self::Compound(_))
    }
}

impl SelectorGroup {
    /// The pseudo-element of each alternative, in source order.
    pub fn pseudo_elements(&self) -> impl Iterator<Item = Option<PseudoElement>> {
        self.selectors.iter().map(ComplexSelector::pseudo_element)
    }
}
