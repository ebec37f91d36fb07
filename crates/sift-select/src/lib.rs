//! CSS selector compiler and matcher.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector parsing** ([Selectors Level 4 § 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar))
//!   - Type, universal, ID, class and attribute selectors
//!   - Compound selectors and all four combinators
//!   - Selector lists (comma-separated groups)
//!   - Escapes, quoted strings and comments ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - The An+B microsyntax ([§ 6](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax))
//!
//! - **Pseudo-classes**
//!   - `:not()`, `:has()`, `:root`, `:empty`
//!   - `:nth-child()`, `:nth-last-child()`, `:nth-of-type()`, `:nth-last-of-type()`
//!     and their `:first-*`, `:last-*`, `:only-*` forms
//!   - Non-standard: `:haschild()`, `:contains()`, `:containsown()`,
//!     `:matches()`, `:matchesown()`, `:input`, and the `!=` and `#=`
//!     attribute operators
//!
//! - **Pseudo-elements** (`::before`, `::after`, `::first-line`, ...), carried
//!   as metadata on the matched chain
//!
//! - **Specificity** ([§ 17](https://www.w3.org/TR/selectors-4/#specificity-rules))
//!
//! - **Serialization** ([CSSOM § 6.7.2](https://drafts.csswg.org/cssom/#serializing-selectors))
//!   back to text that re-parses to the same selector
//!
//! Matching works on any tree implementing [`SelectorTree`], including
//! [`sift_dom::DomTree`].
//!
//! # Example
//!
//! ```
//! use sift_dom::{DomTree, NodeId};
//! use sift_select::compile;
//!
//! let mut tree = DomTree::new();
//! let ul = tree.append_element(NodeId::ROOT, "ul", &[]);
//! let _ = tree.append_element(ul, "li", &[("class", "a")]);
//! let b = tree.append_element(ul, "li", &[("class", "b")]);
//!
//! let selector = compile("ul > li:last-child").unwrap();
//! assert_eq!(selector.match_all(&tree, NodeId::ROOT), vec![b]);
//! ```

/// Selector parse errors.
pub mod error;
/// Selector text to syntax tree.
pub mod parser;
/// Selector syntax tree, matching, specificity and serialization.
pub mod selector;
/// The tree capability trait matching is generic over.
pub mod tree;

pub use error::{ParseErrorKind, SelectorParseError};
pub use parser::{compile, parse_complex, parse_group};
pub use selector::{
    AttributeOperator, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    MatchDetail, NthSelector, Pattern, PseudoClass, PseudoElement, SelectorGroup,
    SimpleSelector, Specificity,
};
pub use tree::{NodeKind, SelectorTree};

/// Compile `selector` and return the first node under `root` (inclusive)
/// that matches, in document order.
///
/// # Errors
///
/// Returns the parse error if `selector` is not valid.
pub fn query<T: SelectorTree>(
    tree: &T,
    root: T::Node,
    selector: &str,
) -> Result<Option<T::Node>, SelectorParseError> {
    Ok(compile(selector)?.match_first(tree, root))
}

/// Compile `selector` and return every node under `root` (inclusive) that
/// matches, in document order.
///
/// # Errors
///
/// Returns the parse error if `selector` is not valid.
pub fn query_all<T: SelectorTree>(
    tree: &T,
    root: T::Node,
    selector: &str,
) -> Result<Vec<T::Node>, SelectorParseError> {
    Ok(compile(selector)?.match_all(tree, root))
}
