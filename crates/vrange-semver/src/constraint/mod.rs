//! Constraint parsing: lexing, grammar validation and desugaring into ranges

mod bound;
pub mod constraint;
mod desugar;
pub mod lexer;
mod operator;
mod range;
pub mod token;
mod validator;

pub use bound::Bound;
pub use constraint::{Constraint, ConstraintError, Join};
pub use lexer::tokenize;
pub use operator::{InvalidOperatorError, Operator};
pub use range::Range;
pub use token::{Token, TokenKind};
