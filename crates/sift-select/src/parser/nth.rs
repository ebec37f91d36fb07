//! [§ 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)

use super::Parser;
use crate::error::{ParseErrorKind, SelectorParseError};

const EXPECTED: &str = "an+b expression";

/// Where the An+B scanner is.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Nothing read yet.
    Start,
    /// After an optional sign, before the coefficient digits or `n`.
    Coefficient { negative: bool },
    /// An integer has been read; an `n` makes it the coefficient.
    AfterInteger(i32),
    /// After the `n`, with the coefficient fixed.
    Offset(i32),
}

impl Parser<'_> {
    /// Parse the argument of an `:nth-*` pseudo-class into `(a, b)`.
    ///
    /// "odd" is `2n+1`, "even" is `2n+0`; a bare integer is `0n+b`.
    pub(super) fn parse_nth(&mut self) -> Result<(i32, i32), SelectorParseError> {
        let mut state = State::Start;
        loop {
            state = match state {
                State::Start => match self.peek() {
                    Some(b'-') => {
                        self.pos += 1;
                        State::Coefficient { negative: true }
                    }
                    Some(b'+') => {
                        self.pos += 1;
                        State::Coefficient { negative: false }
                    }
                    Some(b'0'..=b'9') => State::Coefficient { negative: false },
                    Some(b'n' | b'N') => {
                        self.pos += 1;
                        State::Offset(1)
                    }
                    Some(b'o' | b'O' | b'e' | b'E') => return self.parse_odd_even(),
                    _ => return Err(self.unexpected(EXPECTED)),
                },

                State::Coefficient { negative } => match self.peek() {
                    Some(b'0'..=b'9') => {
                        let value = self.parse_integer()?;
                        State::AfterInteger(if negative { -value } else { value })
                    }
                    Some(b'n' | b'N') => {
                        self.pos += 1;
                        State::Offset(if negative { -1 } else { 1 })
                    }
                    _ => return Err(self.unexpected(EXPECTED)),
                },

                State::AfterInteger(value) => match self.peek() {
                    Some(b'n' | b'N') => {
                        self.pos += 1;
                        State::Offset(value)
                    }
                    None => return Err(self.unexpected(EXPECTED)),
                    // No `n`: the integer was the offset.
                    Some(_) => return Ok((0, value)),
                },

                State::Offset(a) => {
                    let _ = self.skip_whitespace();
                    match self.peek() {
                        Some(sign @ (b'+' | b'-')) => {
                            self.pos += 1;
                            let _ = self.skip_whitespace();
                            let b = self.parse_integer()?;
                            return Ok((a, if sign == b'-' { -b } else { b }));
                        }
                        None => return Err(self.unexpected(EXPECTED)),
                        Some(_) => return Ok((a, 0)),
                    }
                }
            };
        }
    }

    fn parse_odd_even(&mut self) -> Result<(i32, i32), SelectorParseError> {
        let start = self.pos;
        let keyword = self.parse_name()?.to_ascii_lowercase();
        match keyword.as_str() {
            "odd" => Ok((2, 1)),
            "even" => Ok((2, 0)),
            _ => Err(SelectorParseError::new(
                ParseErrorKind::UnexpectedCharacter {
                    expected: "'odd' or 'even'",
                    found: keyword.chars().next().unwrap_or('?'),
                },
                start,
            )),
        }
    }
}
