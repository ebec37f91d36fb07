//! [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use super::{ComplexSelector, CompoundSelector, PseudoClass, SelectorGroup, SimpleSelector};

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
///  - count the number of type selectors and pseudo-elements in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }

    /// One ID selector.
    pub const ID: Self = Self(1, 0, 0);
    /// One class, attribute or pseudo-class selector.
    pub const CLASS: Self = Self(0, 1, 0);
    /// One type selector or pseudo-element.
    pub const TYPE: Self = Self(0, 0, 1);
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl AddAssign for Specificity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Specificity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl SimpleSelector {
    /// Specificity contributed by this one condition.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            // "count the number of ID selectors in the selector (= A)"
            Self::Id(_) => Specificity::ID,

            // "count the number of type selectors ... (= C)"
            Self::Type(_) => Specificity::TYPE,

            // "count the number of class selectors, attributes selectors,
            // and pseudo-classes in the selector (= B)"
            Self::Class(_) | Self::Attribute(_) => Specificity::CLASS,

            Self::PseudoClass(pc) => pc.specificity(),
        }
    }
}

impl PseudoClass {
    /// [§ 17](https://www.w3.org/TR/selectors-4/#specificity-rules)
    /// "The specificity of an :is(), :not(), or :has() pseudo-class is replaced
    /// by the specificity of the most specific complex selector in its selector
    /// list argument."
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            Self::Not(group) | Self::Has(group) | Self::HasChild(group) => {
                group.maximum_specificity()
            }
            _ => Specificity::CLASS,
        }
    }
}

impl CompoundSelector {
    /// Sum of the simple selectors, plus one type point for a pseudo-element.
    /// The universal selector counts for nothing.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        let simple: Specificity = self
            .simple_selectors
            .iter()
            .map(SimpleSelector::specificity)
            .sum();

        if self.pseudo_element.is_some() {
            simple + Specificity::TYPE
        } else {
            simple
        }
    }
}

impl ComplexSelector {
    /// Sum over every compound selector in the chain.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.compounds().map(CompoundSelector::specificity).sum()
    }
}

impl SelectorGroup {
    /// The highest specificity among the alternatives.
    #[must_use]
    pub fn maximum_specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(ComplexSelector::specificity)
            .max()
            .unwrap_or_default()
    }
}
