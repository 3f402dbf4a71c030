//! Constraint evaluation against concrete versions

use crate::constraint::{Constraint, Range};
use crate::version_parser::VersionError;
use crate::Version;

/// Check whether `version` satisfies `constraint`.
///
/// Ranges joined by `&&` must all match; `||` separates independent runs of
/// which at least one must match. Unless `include_prereleases` is set, a
/// pre-release only matches a range with an endpoint on the same
/// `[major, minor, patch]`, and a range with a pre-release endpoint only
/// matches versions on that endpoint's `[major, minor, patch]`.
pub fn satisfies(version: &Version, constraint: &Constraint, include_prereleases: bool) -> bool {
    constraint.runs().iter().any(|run| {
        run.iter()
            .all(|range| range_satisfies(version, range, include_prereleases))
    })
}

/// Check a single range, applying the pre-release rule
pub fn range_satisfies(version: &Version, range: &Range, include_prereleases: bool) -> bool {
    if !include_prereleases && excluded_prerelease(version, range) {
        return false;
    }
    range.bounds().all(|bound| bound.matches(version))
}

fn excluded_prerelease(version: &Version, range: &Range) -> bool {
    let involves_prerelease =
        version.is_prerelease() || range.bounds().any(|bound| bound.version().is_prerelease());

    involves_prerelease && !range.bounds().any(|bound| bound.shares_release(version))
}

/// Every version satisfying `constraint`, in input order
pub fn satisfied_by<'a>(
    versions: &'a [Version],
    constraint: &Constraint,
    include_prereleases: bool,
) -> Vec<&'a Version> {
    versions
        .iter()
        .filter(|v| satisfies(v, constraint, include_prereleases))
        .collect()
}

/// The highest version satisfying `constraint`, if any
pub fn max_satisfying<'a>(
    versions: &'a [Version],
    constraint: &Constraint,
    include_prereleases: bool,
) -> Option<&'a Version> {
    versions
        .iter()
        .filter(|v| satisfies(v, constraint, include_prereleases))
        .max()
}

/// Like [`max_satisfying`] over version literals. The first literal that
/// fails to parse aborts the scan.
pub fn max_satisfying_strs<S: AsRef<str>>(
    versions: &[S],
    constraint: &Constraint,
    include_prereleases: bool,
) -> Result<Option<Version>, VersionError> {
    let parsed = versions
        .iter()
        .map(|v| Version::parse(v.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(max_satisfying(&parsed, constraint, include_prereleases).cloned())
}
