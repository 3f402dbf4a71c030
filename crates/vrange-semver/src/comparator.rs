//! Version comparison utilities

use std::cmp::Ordering;

use crate::Version;

/// Comparator for ordering versions by semver precedence
pub struct Comparator;

impl Comparator {
    /// Check if version1 > version2
    pub fn greater_than(version1: &Version, version2: &Version, ignore_pre_release: bool) -> bool {
        Self::compare(version1, version2, ignore_pre_release) == Ordering::Greater
    }

    /// Check if version1 >= version2
    pub fn greater_than_or_equal_to(
        version1: &Version,
        version2: &Version,
        ignore_pre_release: bool,
    ) -> bool {
        Self::compare(version1, version2, ignore_pre_release) != Ordering::Less
    }

    /// Check if version1 < version2
    pub fn less_than(version1: &Version, version2: &Version, ignore_pre_release: bool) -> bool {
        Self::compare(version1, version2, ignore_pre_release) == Ordering::Less
    }

    /// Check if version1 <= version2
    pub fn less_than_or_equal_to(
        version1: &Version,
        version2: &Version,
        ignore_pre_release: bool,
    ) -> bool {
        Self::compare(version1, version2, ignore_pre_release) != Ordering::Greater
    }

    /// Check if version1 == version2
    pub fn equal_to(version1: &Version, version2: &Version, ignore_pre_release: bool) -> bool {
        Self::compare(version1, version2, ignore_pre_release) == Ordering::Equal
    }

    /// Check if version1 != version2
    pub fn not_equal_to(version1: &Version, version2: &Version, ignore_pre_release: bool) -> bool {
        !Self::equal_to(version1, version2, ignore_pre_release)
    }

    /// Compare version1 to version2 by precedence.
    ///
    /// With `ignore_pre_release` set, versions sharing `[major, minor, patch]`
    /// are equal regardless of their pre-release tags. Build metadata never
    /// takes part.
    pub fn compare(version1: &Version, version2: &Version, ignore_pre_release: bool) -> Ordering {
        let release = version1
            .major
            .cmp(&version2.major)
            .then(version1.minor.cmp(&version2.minor))
            .then(version1.patch.cmp(&version2.patch));

        if release != Ordering::Equal || ignore_pre_release {
            return release;
        }

        match (&version1.pre_release, &version2.pre_release) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => compare_pre_release(a, b),
        }
    }

    /// Compare and map the result to -1, 0 or 1
    pub fn compare_int(version1: &Version, version2: &Version, ignore_pre_release: bool) -> i32 {
        match Self::compare(version1, version2, ignore_pre_release) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

fn compare_pre_release(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_identifier(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => compare_numeric(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.as_bytes().cmp(b.as_bytes()),
    }
}

// Digit strings of any length, without going through an integer type
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_greater_than() {
        assert!(Comparator::greater_than(&v("1.25.0"), &v("1.24.0"), false));
        assert!(!Comparator::greater_than(&v("1.25.0"), &v("1.25.0"), false));
        assert!(!Comparator::greater_than(&v("1.25.0"), &v("1.26.0"), false));
        assert!(Comparator::greater_than(&v("2.0.0"), &v("1.99.99"), false));
        assert!(Comparator::greater_than(&v("1.0.0"), &v("1.0.0-rc.1"), false));
    }

    #[test]
    fn test_greater_than_or_equal_to() {
        assert!(Comparator::greater_than_or_equal_to(&v("1.25.0"), &v("1.24.0"), false));
        assert!(Comparator::greater_than_or_equal_to(&v("1.25.0"), &v("1.25.0"), false));
        assert!(!Comparator::greater_than_or_equal_to(&v("1.25.0"), &v("1.26.0"), false));
    }

    #[test]
    fn test_less_than() {
        assert!(!Comparator::less_than(&v("1.25.0"), &v("1.24.0"), false));
        assert!(!Comparator::less_than(&v("1.25.0"), &v("1.25.0"), false));
        assert!(Comparator::less_than(&v("1.25.0"), &v("1.26.0"), false));
        assert!(Comparator::less_than(&v("1.0.0-alpha"), &v("1.0.0-alpha.1"), false));
    }

    #[test]
    fn test_less_than_or_equal_to() {
        assert!(!Comparator::less_than_or_equal_to(&v("1.25.0"), &v("1.24.0"), false));
        assert!(Comparator::less_than_or_equal_to(&v("1.25.0"), &v("1.25.0"), false));
        assert!(Comparator::less_than_or_equal_to(&v("1.25.0"), &v("1.26.0"), false));
    }

    #[test]
    fn test_equal_to() {
        assert!(!Comparator::equal_to(&v("1.25.0"), &v("1.24.0"), false));
        assert!(Comparator::equal_to(&v("1.25.0"), &v("1.25.0"), false));
        assert!(Comparator::equal_to(&v("1.25.0+a"), &v("1.25.0+b"), false));
        assert!(!Comparator::equal_to(&v("1.25.0-beta"), &v("1.25.0"), false));
        assert!(Comparator::equal_to(&v("1.25.0-beta"), &v("1.25.0"), true));
    }

    #[test]
    fn test_not_equal_to() {
        assert!(Comparator::not_equal_to(&v("1.25.0"), &v("1.24.0"), false));
        assert!(!Comparator::not_equal_to(&v("1.25.0"), &v("1.25.0"), false));
        assert!(!Comparator::not_equal_to(&v("1.0.0-rc.1"), &v("1.0.0-rc.2"), true));
    }

    #[test]
    fn test_compare_pre_release_identifiers() {
        assert_eq!(compare_pre_release("alpha", "alpha.1"), Ordering::Less);
        assert_eq!(compare_pre_release("alpha.1", "alpha.beta"), Ordering::Less);
        assert_eq!(compare_pre_release("beta.2", "beta.11"), Ordering::Less);
        assert_eq!(compare_pre_release("beta.11", "rc.1"), Ordering::Less);
        assert_eq!(compare_pre_release("1", "alpha"), Ordering::Less);
        assert_eq!(compare_pre_release("Beta", "alpha"), Ordering::Less);
        assert_eq!(compare_pre_release("rc.1", "rc.1"), Ordering::Equal);
        assert_eq!(
            compare_pre_release("1.123456789012345678901234567890", "1.99"),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_int() {
        assert_eq!(Comparator::compare_int(&v("1.0.0"), &v("2.0.0"), false), -1);
        assert_eq!(Comparator::compare_int(&v("2.0.0"), &v("2.0.0+x"), false), 0);
        assert_eq!(Comparator::compare_int(&v("2.0.1"), &v("2.0.0"), false), 1);
        assert_eq!(Comparator::compare_int(&v("2.0.0-a"), &v("2.0.0"), true), 0);
    }

    #[test]
    fn test_compare_is_a_total_order() {
        let versions: Vec<Version> = [
            "0.0.0",
            "0.0.1",
            "0.1.0",
            "1.0.0-1",
            "1.0.0-2",
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta.11",
            "1.0.0-rc.1+build.1",
            "1.0.0",
            "1.0.0+build.2",
            "1.0.1-0",
            "1.2.3",
            "10.0.0",
        ]
        .iter()
        .map(|s| v(s))
        .collect();

        for ignore in [false, true] {
            for a in &versions {
                for b in &versions {
                    let ab = Comparator::compare(a, b, ignore);
                    assert_eq!(ab, Comparator::compare(b, a, ignore).reverse(), "{} vs {}", a, b);

                    let holds = [
                        Comparator::less_than(a, b, ignore),
                        Comparator::equal_to(a, b, ignore),
                        Comparator::greater_than(a, b, ignore),
                    ];
                    assert_eq!(holds.iter().filter(|h| **h).count(), 1, "{} vs {}", a, b);
                    assert_eq!(Comparator::not_equal_to(a, b, ignore), ab != Ordering::Equal);
                    assert_eq!(Comparator::less_than_or_equal_to(a, b, ignore), ab != Ordering::Greater);
                    assert_eq!(Comparator::greater_than_or_equal_to(a, b, ignore), ab != Ordering::Less);

                    for c in &versions {
                        let bc = Comparator::compare(b, c, ignore);
                        if ab == bc {
                            assert_eq!(Comparator::compare(a, c, ignore), ab, "{} {} {}", a, b, c);
                        }
                    }
                }
            }
        }
    }
}
