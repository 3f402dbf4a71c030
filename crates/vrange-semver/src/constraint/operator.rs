//! Operator types for range bounds

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::token::TokenKind;

/// Comparison operator of a range bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid operator: {0}")]
pub struct InvalidOperatorError(pub String);

impl Operator {
    /// Operator for a comparison or equality token
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Eq => Some(Operator::Equal),
            TokenKind::Lt => Some(Operator::LessThan),
            TokenKind::Le => Some(Operator::LessThanOrEqual),
            TokenKind::Gt => Some(Operator::GreaterThan),
            TokenKind::Ge => Some(Operator::GreaterThanOrEqual),
            _ => None,
        }
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }
}

impl FromStr for Operator {
    type Err = InvalidOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_token(TokenKind::from_operator(s))
            .ok_or_else(|| InvalidOperatorError(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
