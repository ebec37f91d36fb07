//! Selector parse errors.
//!
//! Every failure carries the byte offset into the selector text where it was
//! detected. Matching never fails, so this is the only error type in the crate.

use thiserror::Error;

/// What went wrong while parsing selector text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Input ended while a construct was still open.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// A character that cannot start or continue the current construct.
    #[error("expected {expected}, found {found:?}")]
    UnexpectedCharacter {
        /// What the parser was looking for.
        expected: &'static str,
        /// The character actually found.
        found: char,
    },

    /// A quoted string whose closing quote never appears.
    #[error("unterminated string")]
    UnterminatedString,

    /// A backslash followed by a line break, or by nothing at all.
    #[error("invalid escape sequence")]
    InvalidEscape,

    /// `:name` where `name` is neither a known pseudo-class nor a pseudo-element.
    #[error("unknown pseudo-class or pseudo-element :{0}")]
    UnknownPseudoClass(String),

    /// Two-character attribute operator outside the supported set.
    #[error("attribute operator {0:?} is not supported")]
    UnsupportedAttributeOperator(String),

    /// A functional pseudo-class written without its argument list.
    #[error("expected '(' after :{0}")]
    MissingOpeningParenthesis(String),

    /// A functional pseudo-class argument list that is never closed.
    #[error("expected ')' to close :{0}(")]
    MissingClosingParenthesis(String),

    /// Text left over after a complete selector group.
    #[error("{remaining} bytes left over after selector")]
    TrailingInput {
        /// Number of unparsed bytes.
        remaining: usize,
    },

    /// A `#=` or `:matches()` pattern that the regex engine rejects.
    #[error("invalid regular expression: {0}")]
    InvalidRegex(String),

    /// A pseudo-element with no other selector in front of it, e.g. `::before`.
    #[error("stand-alone ::{0} pseudo-element not allowed")]
    StandalonePseudoElement(String),

    /// Anything after a pseudo-element in the same chain, e.g. `p::before.x`.
    #[error("::{0} must be the last part of its selector")]
    ClauseAfterPseudoElement(String),

    /// Digits that do not fit an `i32`.
    #[error("integer out of range")]
    InvalidInteger,
}

/// A selector parse failure at a byte position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (at byte {position})")]
pub struct SelectorParseError {
    /// The failure.
    pub kind: ParseErrorKind,
    /// Byte offset into the selector text.
    pub position: usize,
}

impl SelectorParseError {
    /// Create an error of `kind` detected at `position`.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}
