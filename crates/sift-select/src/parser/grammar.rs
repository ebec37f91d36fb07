//! [§ 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar)
//!
//! ```text
//! <selector-list>     = <complex-selector>#
//! <complex-selector>  = <compound-selector> [ <combinator>? <compound-selector> ]*
//! <compound-selector> = [ <type-selector>? <subclass-selector>* <pseudo-element>? ]!
//! <combinator>        = '>' | '+' | '~' | <whitespace>
//! ```

use sift_common::warning::warn_once;

use super::Parser;
use crate::error::{ParseErrorKind, SelectorParseError};
use crate::selector::{
    AttributeOperator, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthSelector, PseudoClass, PseudoElement, SelectorGroup, SimpleSelector,
};

/// Component name for warnings about non-standard syntax.
const COMPONENT: &str = "Selector";

/// What a `:name` or `::name` clause turned out to be.
enum Pseudo {
    Class(PseudoClass),
    Element(PseudoElement),
}

fn warn_non_standard(what: &str) {
    warn_once(COMPONENT, &format!("non-standard selector syntax {what}"));
}

impl Parser<'_> {
    /// `<selector-list>`: chains separated by commas. Stops at the first
    /// character that is not a comma after a chain, leaving it for the caller.
    pub(crate) fn parse_selector_group(&mut self) -> Result<SelectorGroup, SelectorParseError> {
        let mut selectors = vec![self.parse_selector()?];
        while self.peek() == Some(b',') {
            self.pos += 1;
            selectors.push(self.parse_selector()?);
        }
        Ok(SelectorGroup { selectors })
    }

    /// `<complex-selector>`: compounds folded left to right. Ends without
    /// error at end of input, `,` or `)`.
    pub(crate) fn parse_selector(&mut self) -> Result<ComplexSelector, SelectorParseError> {
        let _ = self.skip_whitespace();
        let mut result = ComplexSelector::Compound(self.parse_compound()?);

        loop {
            // Whitespace alone is a descendant combinator; an explicit one wins.
            let mut combinator = self
                .skip_whitespace()
                .then_some(Combinator::Descendant);

            let explicit = match self.peek() {
                None | Some(b',' | b')') => return Ok(result),
                Some(b'>') => Some(Combinator::Child),
                Some(b'+') => Some(Combinator::NextSibling),
                Some(b'~') => Some(Combinator::SubsequentSibling),
                Some(_) => None,
            };
            if explicit.is_some() {
                self.pos += 1;
                let _ = self.skip_whitespace();
                combinator = explicit;
            }

            let Some(combinator) = combinator else {
                return Ok(result);
            };

            if let Some(pseudo) = result.pseudo_element() {
                return Err(self.error(ParseErrorKind::ClauseAfterPseudoElement(
                    pseudo.to_string(),
                )));
            }

            let second = self.parse_compound()?;
            result = ComplexSelector::Combined {
                first: Box::new(result),
                combinator,
                second,
            };
        }
    }

    /// `<compound-selector>`: an optional `*` or type name, then `#id`,
    /// `.class`, `[attr]` and `:pseudo` clauses.
    ///
    /// A pseudo-element must follow some other selector in the same compound
    /// and must be its last clause.
    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorParseError> {
        let mut compound = CompoundSelector::default();
        let mut universal = false;

        match self.peek() {
            None => return Err(self.unexpected("selector")),
            Some(b'*') => {
                self.pos += 1;
                universal = true;
            }
            Some(b'#' | b'.' | b'[' | b':') => {}
            Some(_) => {
                let tag = self.parse_identifier()?;
                compound
                    .simple_selectors
                    .push(SimpleSelector::Type(tag.to_ascii_lowercase()));
            }
        }

        loop {
            let clause = self.pos;
            if !matches!(self.peek(), Some(b'#' | b'.' | b'[' | b':')) {
                break;
            }
            if let Some(pseudo) = compound.pseudo_element {
                return Err(self.error(ParseErrorKind::ClauseAfterPseudoElement(
                    pseudo.to_string(),
                )));
            }

            let simple = match self.peek() {
                Some(b'#') => self.parse_id()?,
                Some(b'.') => self.parse_class()?,
                Some(b'[') => SimpleSelector::Attribute(self.parse_attribute()?),
                _ => match self.parse_pseudo()? {
                    Pseudo::Class(pc) => SimpleSelector::PseudoClass(pc),
                    Pseudo::Element(pseudo) => {
                        if !universal && compound.simple_selectors.is_empty() {
                            return Err(SelectorParseError::new(
                                ParseErrorKind::StandalonePseudoElement(pseudo.to_string()),
                                clause,
                            ));
                        }
                        compound.pseudo_element = Some(pseudo);
                        continue;
                    }
                },
            };
            compound.simple_selectors.push(simple);
        }

        Ok(compound)
    }

    /// [§ 6.7 ID selectors](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// `#name`; the name may start with a digit.
    fn parse_id(&mut self) -> Result<SimpleSelector, SelectorParseError> {
        self.pos += 1;
        Ok(SimpleSelector::Id(self.parse_name()?))
    }

    /// [§ 6.6 Class selectors](https://www.w3.org/TR/selectors-4/#class-html)
    fn parse_class(&mut self) -> Result<SimpleSelector, SelectorParseError> {
        self.pos += 1;
        Ok(SimpleSelector::Class(self.parse_identifier()?))
    }

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// `[name]` or `[name OP value]`. The value is a string or an identifier,
    /// except after `#=` where it is raw regex text.
    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorParseError> {
        self.pos += 1;
        let _ = self.skip_whitespace();
        let name = self.parse_identifier()?;
        let _ = self.skip_whitespace();

        match self.peek() {
            Some(b']') => {
                self.pos += 1;
                return Ok(AttributeSelector::Exists(name));
            }
            None => return Err(self.unexpected("']'")),
            Some(_) => {}
        }

        let source = self.source;
        let op_start = self.pos;
        let op_text = match (self.peek(), self.peek_at(1)) {
            (Some(b'='), _) => "=",
            (Some(first), Some(b'=')) if first.is_ascii() => &source[op_start..op_start + 2],
            (Some(_), None) => {
                self.pos += 1;
                return Err(self.unexpected("attribute operator"));
            }
            _ => return Err(self.unexpected("attribute operator")),
        };
        let op: AttributeOperator = op_text.parse().map_err(|_| {
            SelectorParseError::new(
                ParseErrorKind::UnsupportedAttributeOperator(op_text.to_string()),
                op_start,
            )
        })?;
        self.pos += op_text.len();
        let _ = self.skip_whitespace();

        let selector = match op {
            AttributeOperator::Equals => AttributeSelector::Equals(name, self.parse_value()?),
            AttributeOperator::NotEquals => {
                AttributeSelector::NotEquals(name, self.parse_value()?)
            }
            AttributeOperator::Includes => AttributeSelector::Includes(name, self.parse_value()?),
            AttributeOperator::DashMatch => {
                AttributeSelector::DashMatch(name, self.parse_value()?)
            }
            AttributeOperator::PrefixMatch => {
                AttributeSelector::PrefixMatch(name, self.parse_value()?)
            }
            AttributeOperator::SuffixMatch => {
                AttributeSelector::SuffixMatch(name, self.parse_value()?)
            }
            AttributeOperator::SubstringMatch => {
                AttributeSelector::SubstringMatch(name, self.parse_value()?)
            }
            AttributeOperator::Regex => AttributeSelector::Regex(name, self.parse_regex()?),
        };

        let _ = self.skip_whitespace();
        if self.peek() != Some(b']') {
            return Err(self.unexpected("']'"));
        }
        self.pos += 1;

        if matches!(op, AttributeOperator::NotEquals | AttributeOperator::Regex) {
            warn_non_standard(&format!("'{op}'"));
        }
        Ok(selector)
    }

    /// A quoted string or a bare identifier.
    fn parse_value(&mut self) -> Result<String, SelectorParseError> {
        match self.peek() {
            Some(b'"' | b'\'') => self.parse_string(),
            _ => self.parse_identifier(),
        }
    }

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    /// and [§ 11 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements).
    ///
    /// Either colon form is accepted for both. Names are ASCII case-insensitive.
    fn parse_pseudo(&mut self) -> Result<Pseudo, SelectorParseError> {
        let start = self.pos;
        self.pos += 1;
        if self.peek() == Some(b':') {
            self.pos += 1;
        }
        let name = self.parse_identifier()?.to_ascii_lowercase();

        let pc = match name.as_str() {
            "not" | "has" | "haschild" => {
                self.expect_open(&name)?;
                let group = self.parse_selector_group()?;
                self.expect_close(&name)?;
                match name.as_str() {
                    "not" => PseudoClass::Not(group),
                    "has" => PseudoClass::Has(group),
                    _ => {
                        warn_non_standard(":haschild()");
                        PseudoClass::HasChild(group)
                    }
                }
            }

            "contains" | "containsown" => {
                self.expect_open(&name)?;
                let value = self.parse_value()?.to_lowercase();
                self.expect_close(&name)?;
                warn_non_standard(&format!(":{name}()"));
                if name == "contains" {
                    PseudoClass::Contains(value)
                } else {
                    PseudoClass::ContainsOwn(value)
                }
            }

            "matches" | "matchesown" => {
                self.expect_open(&name)?;
                let pattern = self.parse_regex()?;
                self.expect_close(&name)?;
                warn_non_standard(&format!(":{name}()"));
                if name == "matches" {
                    PseudoClass::Matches(pattern)
                } else {
                    PseudoClass::MatchesOwn(pattern)
                }
            }

            "nth-child" | "nth-last-child" | "nth-of-type" | "nth-last-of-type" => {
                self.expect_open(&name)?;
                let (a, b) = self.parse_nth()?;
                self.expect_close(&name)?;
                PseudoClass::Nth(NthSelector {
                    a,
                    b,
                    last: name.starts_with("nth-last"),
                    of_type: name.ends_with("of-type"),
                })
            }

            "first-child" => PseudoClass::Nth(first(false, false)),
            "last-child" => PseudoClass::Nth(first(true, false)),
            "first-of-type" => PseudoClass::Nth(first(false, true)),
            "last-of-type" => PseudoClass::Nth(first(true, true)),
            "only-child" => PseudoClass::OnlyChild,
            "only-of-type" => PseudoClass::OnlyOfType,
            "input" => {
                warn_non_standard(":input");
                PseudoClass::Input
            }
            "empty" => PseudoClass::Empty,
            "root" => PseudoClass::Root,

            _ => {
                return name.parse::<PseudoElement>().map(Pseudo::Element).map_err(|_| {
                    SelectorParseError::new(ParseErrorKind::UnknownPseudoClass(name), start)
                });
            }
        };
        Ok(Pseudo::Class(pc))
    }

    fn expect_open(&mut self, name: &str) -> Result<(), SelectorParseError> {
        if self.consume_parenthesis() {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::MissingOpeningParenthesis(name.to_string())))
        }
    }

    fn expect_close(&mut self, name: &str) -> Result<(), SelectorParseError> {
        if self.consume_closing_parenthesis() {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::MissingClosingParenthesis(name.to_string())))
        }
    }
}

/// The `b = 1` position counted from the front or the back.
const fn first(last: bool, of_type: bool) -> NthSelector {
    NthSelector {
        a: 0,
        b: 1,
        last,
        of_type,
    }
}
