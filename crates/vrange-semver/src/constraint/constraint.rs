//! Parsed version constraint

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::desugar::desugar;
use super::lexer::tokenize;
use super::validator::validate;
use super::Range;
use crate::version_parser::VersionError;
use crate::{evaluator, Version};

/// Error type for constraint parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("Illegal token in constraint: {rendering}")]
    IllegalToken {
        positions: Vec<usize>,
        rendering: String,
    },
    #[error("Invalid constraint, {message}: {rendering}")]
    InvalidGrammar {
        message: String,
        positions: Vec<usize>,
        rendering: String,
    },
    #[error("Invalid version in constraint: {0}")]
    InvalidVersion(#[from] VersionError),
    #[error("Unknown sub-constraint: {rendering}")]
    UnknownSubConstraint { rendering: String },
}

/// How two neighbouring ranges are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Join {
    /// `&&`
    Conjunction,
    /// `||`
    Disjunction,
}

impl Join {
    pub fn as_str(&self) -> &'static str {
        match self {
            Join::Conjunction => "&&",
            Join::Disjunction => "||",
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint such as `^1.2.3 || >=2.0.0 <2.5.0`, desugared into ranges.
///
/// `joins[i]` sits between `ranges[i]` and `ranges[i + 1]`. Once parsed a
/// constraint is immutable and can be evaluated against any number of versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    original: String,
    ranges: Vec<Range>,
    joins: Vec<Join>,
}

impl Constraint {
    /// Parse a constraint string
    pub fn parse(input: &str) -> Result<Self, ConstraintError> {
        let tokens = tokenize(input);

        let parsed = validate(&tokens).and_then(|_| desugar(&tokens));
        let (ranges, joins) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("rejected constraint {:?}: {}", input, e);
                return Err(e);
            }
        };

        log::debug!("parsed constraint {:?} into {} range(s)", input, ranges.len());

        Ok(Constraint {
            original: input.to_string(),
            ranges,
            joins,
        })
    }

    /// The input string exactly as it was given
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// Ranges grouped into `||`-separated runs; every range in a run is `&&`-ed
    pub fn runs(&self) -> Vec<&[Range]> {
        let mut runs = Vec::new();
        let mut start = 0;
        for (i, join) in self.joins.iter().enumerate() {
            if *join == Join::Disjunction {
                runs.push(&self.ranges[start..=i]);
                start = i + 1;
            }
        }
        runs.push(&self.ranges[start..]);
        runs
    }

    /// Check if a version satisfies this constraint
    pub fn satisfies(&self, version: &Version, include_prereleases: bool) -> bool {
        evaluator::satisfies(version, self, include_prereleases)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.joins[i - 1])?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Constraint::parse(s)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Constraint;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for Constraint {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.original)
        }
    }

    struct ConstraintVisitor;

    impl<'de> Visitor<'de> for ConstraintVisitor {
        type Value = Constraint;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a version constraint string")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Constraint::parse(value).map_err(de::Error::custom)
        }
    }

    impl<'de> Deserialize<'de> for Constraint {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(ConstraintVisitor)
        }
    }
}
