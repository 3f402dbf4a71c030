//! Bound type for range endpoints

use std::fmt;

use super::Operator;
use crate::{Comparator, Version};

/// One endpoint of a range: an operator applied to a version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    operator: Operator,
    version: Version,
}

impl Bound {
    /// Create a new bound
    pub fn new(operator: Operator, version: Version) -> Self {
        Bound { operator, version }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check whether `version` lies on the accepted side of this bound.
    ///
    /// Pre-release tags take part in the comparison.
    pub fn matches(&self, version: &Version) -> bool {
        match self.operator {
            Operator::Equal => Comparator::equal_to(version, &self.version, false),
            Operator::LessThan => Comparator::less_than(version, &self.version, false),
            Operator::LessThanOrEqual => {
                Comparator::less_than_or_equal_to(version, &self.version, false)
            }
            Operator::GreaterThan => Comparator::greater_than(version, &self.version, false),
            Operator::GreaterThanOrEqual => {
                Comparator::greater_than_or_equal_to(version, &self.version, false)
            }
        }
    }

    /// True when `version` has the same `[major, minor, patch]` as this bound
    pub fn shares_release(&self, version: &Version) -> bool {
        Comparator::equal_to(version, &self.version, true)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}
