//! Selector text to [`SelectorGroup`].
//!
//! A recursive descent parser over the raw bytes of the selector. Positions are
//! byte offsets; non-ASCII bytes only ever appear inside names and strings,
//! where they are copied through whole, so every position the parser stops at
//! is a character boundary.

mod grammar;
mod lexer;
mod nth;

use std::str::FromStr;

use crate::error::{ParseErrorKind, SelectorParseError};
use crate::selector::{ComplexSelector, SelectorGroup};

/// Cursor over selector text.
pub(crate) struct Parser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) const fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// The byte at the cursor.
    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// The byte `offset` bytes past the cursor.
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    /// Unparsed text.
    fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    fn error(&self, kind: ParseErrorKind) -> SelectorParseError {
        SelectorParseError::new(kind, self.pos)
    }

    /// "expected X" at the cursor, as end of input or as the offending character.
    fn unexpected(&self, expected: &'static str) -> SelectorParseError {
        match self.rest().chars().next() {
            Some(found) => self.error(ParseErrorKind::UnexpectedCharacter { expected, found }),
            None => self.error(ParseErrorKind::UnexpectedEndOfInput { expected }),
        }
    }

    /// Fail unless the whole input has been consumed.
    fn expect_end(&self) -> Result<(), SelectorParseError> {
        let remaining = self.source.len() - self.pos;
        if remaining == 0 {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::TrailingInput { remaining }))
        }
    }
}

/// Parse a comma-separated selector group.
///
/// # Errors
///
/// Returns the first syntax error, or [`ParseErrorKind::TrailingInput`] when
/// text is left over after a complete group.
pub fn parse_group(text: &str) -> Result<SelectorGroup, SelectorParseError> {
    let mut parser = Parser::new(text);
    let group = parser.parse_selector_group()?;
    parser.expect_end()?;
    Ok(group)
}

/// Compile selector text into a matcher. Same as [`parse_group`].
///
/// # Errors
///
/// See [`parse_group`].
pub fn compile(text: &str) -> Result<SelectorGroup, SelectorParseError> {
    parse_group(text)
}

/// Parse exactly one complex selector. A top-level comma is left over input.
///
/// # Errors
///
/// Returns the first syntax error, or [`ParseErrorKind::TrailingInput`] when
/// anything follows the selector.
pub fn parse_complex(text: &str) -> Result<ComplexSelector, SelectorParseError> {
    let mut parser = Parser::new(text);
    let selector = parser.parse_selector()?;
    parser.expect_end()?;
    Ok(selector)
}

impl FromStr for SelectorGroup {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_group(s)
    }
}

impl FromStr for ComplexSelector {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complex(s)
    }
}
