//! Semver facade providing high-level version operations on strings

use std::cmp::Ordering;

use crate::constraint::{Constraint, ConstraintError};
use crate::{evaluator, Comparator, Version, VersionError};

/// Main facade for semantic versioning operations
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a constraint, excluding pre-releases
    /// that the constraint does not name explicitly.
    ///
    /// Unparseable input never satisfies anything.
    pub fn satisfies(version: &str, constraint: &str) -> bool {
        Self::satisfies_with(version, constraint, false)
    }

    /// Like [`Semver::satisfies`] with control over pre-release matching
    pub fn satisfies_with(version: &str, constraint: &str, include_prereleases: bool) -> bool {
        let Ok(version) = Version::parse(version) else {
            return false;
        };
        let Ok(constraint) = Constraint::parse(constraint) else {
            return false;
        };
        evaluator::satisfies(&version, &constraint, include_prereleases)
    }

    /// Return all versions that satisfy the given constraint, in input order.
    ///
    /// Literals that do not parse are skipped.
    pub fn satisfied_by(versions: &[&str], constraint: &str) -> Vec<String> {
        let Ok(constraint) = Constraint::parse(constraint) else {
            return Vec::new();
        };

        versions
            .iter()
            .filter(|v| {
                Version::parse(v)
                    .map(|version| evaluator::satisfies(&version, &constraint, false))
                    .unwrap_or(false)
            })
            .map(|v| v.to_string())
            .collect()
    }

    /// Parse a constraint for repeated use
    pub fn parse_constraint(constraint: &str) -> Result<Constraint, ConstraintError> {
        Constraint::parse(constraint)
    }

    /// Highest version satisfying the constraint, or `None`.
    ///
    /// Fails on the first version literal that does not parse.
    pub fn max_satisfying(
        versions: &[&str],
        constraint: &str,
        include_prereleases: bool,
    ) -> Result<Option<Version>, ConstraintError> {
        let constraint = Constraint::parse(constraint)?;
        Ok(evaluator::max_satisfying_strs(
            versions,
            &constraint,
            include_prereleases,
        )?)
    }

    /// Compare two version literals by precedence
    pub fn compare(version1: &str, version2: &str) -> Result<Ordering, VersionError> {
        Ok(Comparator::compare(
            &Version::parse(version1)?,
            &Version::parse(version2)?,
            false,
        ))
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Result<Vec<String>, VersionError> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Result<Vec<String>, VersionError> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Result<Vec<String>, VersionError> {
        let mut parsed = versions
            .iter()
            .map(|v| Version::parse(v).map(|version| (version, *v)))
            .collect::<Result<Vec<_>, _>>()?;

        // stable, so equal versions keep their input order
        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = Comparator::compare(a, b, false);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        Ok(parsed.into_iter().map(|(_, v)| v.to_string()).collect())
    }
}
