//! [CSSOM § 6.7.2 Serializing Selectors](https://drafts.csswg.org/cssom/#serializing-selectors)
//!
//! Every selector kind renders back to text that parses to an equal value.

use std::fmt::{self, Display, Formatter, Write};

use super::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthSelector, PseudoClass,
    SelectorGroup, SimpleSelector,
};

impl Display for SelectorGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl Display for ComplexSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compound(compound) => write!(f, "{compound}"),
            Self::Combined {
                first,
                combinator,
                second,
            } => match combinator {
                Combinator::Descendant => write!(f, "{first} {second}"),
                _ => write!(f, "{first} {combinator} {second}"),
            },
        }
    }
}

impl Display for CompoundSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.simple_selectors.is_empty() {
            f.write_char('*')?;
        }
        for simple in &self.simple_selectors {
            write!(f, "{simple}")?;
        }
        if let Some(pseudo) = self.pseudo_element {
            f.write_str("::")?;
            f.write_str(pseudo.as_ref())?;
        }
        Ok(())
    }
}

impl Display for SimpleSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write_identifier(f, name),
            Self::Id(id) => {
                f.write_char('#')?;
                write_identifier(f, id)
            }
            Self::Class(class) => {
                f.write_char('.')?;
                write_identifier(f, class)
            }
            Self::Attribute(attr) => write!(f, "{attr}"),
            Self::PseudoClass(pc) => write!(f, "{pc}"),
        }
    }
}

impl Display for AttributeSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        write_identifier(f, self.name())?;
        if let Some(op) = self.operator() {
            f.write_str(op.as_ref())?;
        }
        match self {
            Self::Exists(_) => {}
            Self::Equals(_, val)
            | Self::NotEquals(_, val)
            | Self::Includes(_, val)
            | Self::DashMatch(_, val)
            | Self::PrefixMatch(_, val)
            | Self::SuffixMatch(_, val)
            | Self::SubstringMatch(_, val) => write_string(f, val)?,
            // Regex sources are read raw up to the closing bracket.
            Self::Regex(_, pattern) => f.write_str(pattern.as_str())?,
        }
        f.write_char(']')
    }
}

impl Display for PseudoClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not(group) => write!(f, ":not({group})"),
            Self::Has(group) => write!(f, ":has({group})"),
            Self::HasChild(group) => write!(f, ":haschild({group})"),
            Self::Contains(value) => {
                f.write_str(":contains(")?;
                write_string(f, value)?;
                f.write_char(')')
            }
            Self::ContainsOwn(value) => {
                f.write_str(":containsown(")?;
                write_string(f, value)?;
                f.write_char(')')
            }
            Self::Matches(pattern) => write!(f, ":matches({})", pattern.as_str()),
            Self::MatchesOwn(pattern) => write!(f, ":matchesown({})", pattern.as_str()),
            Self::Nth(nth) => write!(f, "{nth}"),
            Self::OnlyChild => f.write_str(":only-child"),
            Self::OnlyOfType => f.write_str(":only-of-type"),
            Self::Input => f.write_str(":input"),
            Self::Empty => f.write_str(":empty"),
            Self::Root => f.write_str(":root"),
        }
    }
}

impl Display for NthSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let suffix = if self.of_type { "of-type" } else { "child" };

        if self.a == 0 && self.b == 1 {
            let edge = if self.last { "last" } else { "first" };
            return write!(f, ":{edge}-{suffix}");
        }

        let direction = if self.last { "nth-last" } else { "nth" };
        if self.a == 0 {
            write!(f, ":{direction}-{suffix}({})", self.b)
        } else {
            write!(f, ":{direction}-{suffix}({}n{:+})", self.a, self.b)
        }
    }
}

/// [CSSOM § 2.1 serialize an identifier](https://drafts.csswg.org/cssom/#serialize-an-identifier)
pub(crate) fn write_identifier<W: Write>(out: &mut W, ident: &str) -> fmt::Result {
    let first = ident.chars().next();

    if first == Some('-') && ident.len() == 1 {
        return out.write_str("\\-");
    }

    for (i, c) in ident.chars().enumerate() {
        let after_hyphen = i == 1 && first == Some('-');
        let leading_digit = c.is_ascii_digit() && (i == 0 || after_hyphen);
        match c {
            '\0' => out.write_char('\u{FFFD}')?,
            '\u{1}'..='\u{1f}' | '\u{7f}' => write_hex_escape(out, c)?,
            _ if leading_digit => write_hex_escape(out, c)?,
            // Only one bare hyphen may open an identifier.
            '-' if after_hyphen => out.write_str("\\-")?,
            '-' | '_' => out.write_char(c)?,
            _ if c.is_ascii_alphanumeric() || !c.is_ascii() => out.write_char(c)?,
            _ => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
        }
    }
    Ok(())
}

/// [CSSOM § 2.1 serialize a string](https://drafts.csswg.org/cssom/#serialize-a-string)
pub(crate) fn write_string<W: Write>(out: &mut W, value: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in value.chars() {
        match c {
            '\0' => out.write_char('\u{FFFD}')?,
            '\u{1}'..='\u{1f}' | '\u{7f}' => write_hex_escape(out, c)?,
            '"' | '\\' => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
            _ => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// "the character escaped as code point": hex digits plus a terminating space.
fn write_hex_escape<W: Write>(out: &mut W, c: char) -> fmt::Result {
    write!(out, "\\{:x} ", u32::from(c))
}
