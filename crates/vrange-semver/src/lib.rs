//! Semantic version constraints in the node-semver dialect
//!
//! This crate parses `major.minor.patch[-pre][+build]` versions and range
//! constraints such as `^1.2.3`, `~1.2`, `1.x`, `1.2.3 - 2.3` or
//! `>=1.0.0 <2.0.0 || =3.0.0`, and checks versions against them.

mod comparator;
pub mod constraint;
pub mod evaluator;
mod semver;
mod version;
mod version_parser;

pub use comparator::Comparator;
pub use constraint::{Bound, Constraint, ConstraintError, Join, Operator, Range};
pub use semver::Semver;
pub use version::Version;
pub use version_parser::{is_partial_version, is_static_version, is_wildcard_version, VersionError};
