//! Lexical primitives: escapes, names, strings, raw regex text, whitespace.
//!
//! Based on [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization),
//! scanning bytes directly instead of producing tokens.

use super::Parser;
use crate::error::{ParseErrorKind, SelectorParseError};
use crate::selector::Pattern;

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
/// Any byte of a multi-byte UTF-8 sequence counts as non-ASCII.
const fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || !b.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
const fn is_name_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit() || b == b'-'
}

/// [§ 4.2 Definitions - newline](https://www.w3.org/TR/css-syntax-3/#newline)
const fn is_newline(b: u8) -> bool {
    matches!(b, b'\n' | b'\r' | b'\x0C')
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
const fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t' || is_newline(b)
}

/// "If this number is zero, or is for a surrogate, or is greater than the
/// maximum allowed code point, return U+FFFD REPLACEMENT CHARACTER."
fn code_point(value: u32) -> char {
    if value == 0 {
        return '\u{FFFD}';
    }
    char::from_u32(value).unwrap_or('\u{FFFD}')
}

impl Parser<'_> {
    /// [§ 4.3.13 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// The cursor is on the backslash. One to six hex digits decode a code
    /// point, and a single whitespace character (or CR LF) after them is part
    /// of the escape. Any other character stands for itself.
    pub(super) fn parse_escape(&mut self) -> Result<char, SelectorParseError> {
        if self.peek() != Some(b'\\') {
            return Err(self.error(ParseErrorKind::InvalidEscape));
        }
        match self.peek_at(1) {
            None => Err(self.error(ParseErrorKind::InvalidEscape)),
            Some(b) if is_newline(b) => Err(self.error(ParseErrorKind::InvalidEscape)),
            Some(b) if b.is_ascii_hexdigit() => {
                let bytes = self.source.as_bytes();
                let digits = self.pos + 1;
                let mut end = digits;
                while end < digits + 6 && bytes.get(end).is_some_and(u8::is_ascii_hexdigit) {
                    end += 1;
                }
                let value = bytes[digits..end]
                    .iter()
                    .filter_map(|&d| char::from(d).to_digit(16))
                    .fold(0u32, |acc, d| acc * 16 + d);

                match bytes.get(end).copied() {
                    Some(b'\r') => {
                        end += 1;
                        if bytes.get(end) == Some(&b'\n') {
                            end += 1;
                        }
                    }
                    Some(b) if is_whitespace(b) => end += 1,
                    _ => {}
                }
                self.pos = end;
                Ok(code_point(value))
            }
            Some(_) => {
                self.pos += 1;
                let c = self.rest().chars().next().ok_or_else(|| {
                    self.error(ParseErrorKind::InvalidEscape)
                })?;
                self.pos += c.len_utf8();
                Ok(c)
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// An identifier: an optional `-`, then a name-start character or an
    /// escape, then any name characters.
    pub(super) fn parse_identifier(&mut self) -> Result<String, SelectorParseError> {
        let dash = self.peek() == Some(b'-');
        if dash {
            self.pos += 1;
        }

        match self.peek() {
            Some(b) if is_name_start(b) || b == b'\\' => {}
            _ => return Err(self.unexpected("identifier")),
        }

        let name = self.parse_name()?;
        Ok(if dash { format!("-{name}") } else { name })
    }

    /// A name: name characters and escapes with no restriction on the first
    /// character. Must not be empty.
    pub(super) fn parse_name(&mut self) -> Result<String, SelectorParseError> {
        let mut result = String::new();
        while let Some(b) = self.peek() {
            if is_name_char(b) {
                let start = self.pos;
                while self.peek().is_some_and(is_name_char) {
                    self.pos += 1;
                }
                result.push_str(&self.source[start..self.pos]);
            } else if b == b'\\' {
                result.push(self.parse_escape()?);
            } else {
                break;
            }
        }

        if result.is_empty() {
            return Err(self.unexpected("name"));
        }
        Ok(result)
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// The cursor is on the opening `'` or `"`. An escaped newline is a line
    /// continuation and contributes nothing.
    pub(super) fn parse_string(&mut self) -> Result<String, SelectorParseError> {
        let open = self.pos;
        let Some(quote) = self.peek() else {
            return Err(self.unexpected("string"));
        };
        self.pos += 1;

        let mut result = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(SelectorParseError::new(
                        ParseErrorKind::UnterminatedString,
                        open,
                    ));
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(result);
                }
                Some(b'\\') => match self.peek_at(1) {
                    Some(b'\r') if self.peek_at(2) == Some(b'\n') => self.pos += 3,
                    Some(b) if is_newline(b) => self.pos += 2,
                    _ => result.push(self.parse_escape()?),
                },
                Some(b) if is_newline(b) => return Err(self.unexpected("closing quote")),
                Some(_) => {
                    let start = self.pos;
                    while self
                        .peek()
                        .is_some_and(|b| b != quote && b != b'\\' && !is_newline(b))
                    {
                        self.pos += 1;
                    }
                    // [§ 3.3](https://www.w3.org/TR/css-syntax-3/#input-preprocessing)
                    // "Replace any U+0000 NULL ... with U+FFFD REPLACEMENT CHARACTER."
                    result.push_str(&self.source[start..self.pos].replace('\0', "\u{FFFD}"));
                }
            }
        }
    }

    /// Raw regular expression text, ended by the first `)` or `]` that closes
    /// nothing opened inside it. The terminator is left in place.
    pub(super) fn parse_regex(&mut self) -> Result<Pattern, SelectorParseError> {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        let mut depth = 0i32;
        let mut end = start;
        loop {
            match bytes.get(end).copied() {
                None => {
                    return Err(SelectorParseError::new(
                        ParseErrorKind::UnexpectedEndOfInput {
                            expected: "end of regular expression",
                        },
                        end,
                    ));
                }
                Some(b'(' | b'[') => depth += 1,
                Some(b')' | b']') => {
                    depth -= 1;
                    if depth < 0 {
                        break;
                    }
                }
                Some(_) => {}
            }
            end += 1;
        }

        let pattern = Pattern::new(&self.source[start..end]).map_err(|e| {
            SelectorParseError::new(ParseErrorKind::InvalidRegex(e.to_string()), start)
        })?;
        self.pos = end;
        Ok(pattern)
    }

    /// Skip whitespace and `/* */` comments. An unterminated comment is not
    /// skipped. Returns whether anything was skipped.
    pub(super) fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b) if is_whitespace(b) => self.pos += 1,
                Some(b'/') if self.rest().starts_with("/*") => {
                    match self.rest()[2..].find("*/") {
                        Some(end) => self.pos += end + 4,
                        None => break,
                    }
                }
                _ => break,
            }
        }
        self.pos > start
    }

    /// Consume `(` and the whitespace after it.
    pub(super) fn consume_parenthesis(&mut self) -> bool {
        if self.peek() == Some(b'(') {
            self.pos += 1;
            let _ = self.skip_whitespace();
            true
        } else {
            false
        }
    }

    /// Consume whitespace and a `)`. Leaves the cursor alone if there is no `)`.
    pub(super) fn consume_closing_parenthesis(&mut self) -> bool {
        let start = self.pos;
        let _ = self.skip_whitespace();
        if self.peek() == Some(b')') {
            self.pos += 1;
            true
        } else {
            self.pos = start;
            false
        }
    }

    /// An unsigned decimal integer.
    pub(super) fn parse_integer(&mut self) -> Result<i32, SelectorParseError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unexpected("integer"));
        }
        self.source[start..self.pos]
            .parse()
            .map_err(|_| SelectorParseError::new(ParseErrorKind::InvalidInteger, start))
    }
}
