//! Desugared version range

use std::fmt;

use super::{Bound, Operator};
use crate::Version;

/// A range of versions described by one bound, or two bounds that must both hold.
///
/// A missing second bound means the range is open on that side. It is distinct
/// from a second bound of `<0.0.0`, which matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    first: Bound,
    second: Option<Bound>,
}

impl Range {
    pub fn new(first: Bound, second: Option<Bound>) -> Self {
        Range { first, second }
    }

    /// A range bounded on one side only
    pub fn single(operator: Operator, version: Version) -> Self {
        Range::new(Bound::new(operator, version), None)
    }

    /// A `>=lower <upper` range
    pub fn between(lower: Version, upper: Version) -> Self {
        Range::new(
            Bound::new(Operator::GreaterThanOrEqual, lower),
            Some(Bound::new(Operator::LessThan, upper)),
        )
    }

    /// The range matching every release, `>=0.0.0`
    pub fn any() -> Self {
        Range::single(Operator::GreaterThanOrEqual, Version::new(0, 0, 0))
    }

    pub fn first(&self) -> &Bound {
        &self.first
    }

    pub fn second(&self) -> Option<&Bound> {
        self.second.as_ref()
    }

    /// Both endpoints in order
    pub fn bounds(&self) -> impl Iterator<Item = &Bound> {
        std::iter::once(&self.first).chain(self.second.as_ref())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        if let Some(second) = &self.second {
            write!(f, " {}", second)?;
        }
        Ok(())
    }
}
