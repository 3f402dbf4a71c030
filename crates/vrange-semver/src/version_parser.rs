//! Version literal parsing and classification

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::Version;

/// Error type for version literal parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string \"\": empty literal")]
    Empty,
    #[error("Invalid version string \"{0}\": expected major.minor.patch")]
    ComponentCount(String),
    #[error("Invalid version string \"{literal}\": \"{component}\" is not a number")]
    InvalidNumber { literal: String, component: String },
    #[error("Invalid version string \"{literal}\": \"{component}\" has a leading zero")]
    LeadingZero { literal: String, component: String },
    #[error("Invalid pre-release \"{pre_release}\" in version string \"{literal}\"")]
    InvalidPreRelease { literal: String, pre_release: String },
    #[error("Invalid build metadata \"{build}\" in version string \"{literal}\"")]
    InvalidBuild { literal: String, build: String },
    #[error("Invalid version string \"{0}\": wildcard where a number is required")]
    WildcardComponent(String),
    #[error("Invalid version string \"{literal}\": {value} cannot be incremented")]
    Overflow { literal: String, value: u64 },
}

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[0-9A-Za-z-]+$").unwrap();
    static ref NUMERIC_RE: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// The three pieces of a version literal: `core[-pre][+build]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiteralParts<'a> {
    pub core: &'a str,
    pub pre_release: Option<&'a str>,
    pub build: Option<&'a str>,
}

/// Split a literal into its numeric core, pre-release and build metadata.
///
/// A leading `v` is dropped when it is directly followed by a digit.
pub(crate) fn split_literal(literal: &str) -> LiteralParts<'_> {
    let literal = strip_v_prefix(literal);

    let (head, build) = match literal.split_once('+') {
        Some((head, build)) => (head, Some(build)),
        None => (literal, None),
    };

    let (core, pre_release) = match head.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (head, None),
    };

    LiteralParts {
        core,
        pre_release,
        build,
    }
}

fn strip_v_prefix(literal: &str) -> &str {
    match literal.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => literal,
    }
}

fn is_wildcard_char(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Check whether a literal contains a wildcard (`x`, `X`, `*` or `ANY`)
pub fn is_wildcard_version(literal: &str) -> bool {
    let core = split_literal(literal).core;
    core == "ANY" || core.contains(['x', 'X', '*'])
}

/// Check whether a literal is a fully specified `major.minor.patch` version
pub fn is_static_version(literal: &str) -> bool {
    let core = split_literal(literal).core;
    core.matches('.').count() == 2 && !is_wildcard_version(literal)
}

/// Check whether a literal only specifies `major` or `major.minor`
pub fn is_partial_version(literal: &str) -> bool {
    let core = split_literal(literal).core;
    core.matches('.').count() < 2 && !is_wildcard_version(literal)
}

fn parse_number(literal: &str, component: &str) -> Result<u64, VersionError> {
    if !NUMERIC_RE.is_match(component) {
        return Err(VersionError::InvalidNumber {
            literal: literal.to_string(),
            component: component.to_string(),
        });
    }
    if component.len() > 1 && component.starts_with('0') {
        return Err(VersionError::LeadingZero {
            literal: literal.to_string(),
            component: component.to_string(),
        });
    }
    component.parse().map_err(|_| VersionError::InvalidNumber {
        literal: literal.to_string(),
        component: component.to_string(),
    })
}

fn validate_pre_release(literal: &str, pre_release: &str) -> Result<(), VersionError> {
    let invalid = || VersionError::InvalidPreRelease {
        literal: literal.to_string(),
        pre_release: pre_release.to_string(),
    };

    for identifier in pre_release.split('.') {
        if !IDENTIFIER_RE.is_match(identifier) {
            return Err(invalid());
        }
        if NUMERIC_RE.is_match(identifier) && identifier.len() > 1 && identifier.starts_with('0') {
            return Err(invalid());
        }
    }
    Ok(())
}

fn validate_build(literal: &str, build: &str) -> Result<(), VersionError> {
    if build.split('.').all(|identifier| IDENTIFIER_RE.is_match(identifier)) {
        Ok(())
    } else {
        Err(VersionError::InvalidBuild {
            literal: literal.to_string(),
            build: build.to_string(),
        })
    }
}

fn validated_suffixes(
    literal: &str,
    parts: &LiteralParts<'_>,
) -> Result<(Option<String>, Option<String>), VersionError> {
    if let Some(pre) = parts.pre_release {
        validate_pre_release(literal, pre)?;
    }
    if let Some(build) = parts.build {
        validate_build(literal, build)?;
    }
    Ok((
        parts.pre_release.map(str::to_string),
        parts.build.map(str::to_string),
    ))
}

/// Parse a fully specified `major.minor.patch[-pre][+build]` literal
pub fn parse_version(literal: &str) -> Result<Version, VersionError> {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return Err(VersionError::Empty);
    }

    let parts = split_literal(trimmed);
    let components: Vec<&str> = parts.core.split('.').collect();
    if components.len() != 3 {
        return Err(VersionError::ComponentCount(trimmed.to_string()));
    }

    let major = parse_number(trimmed, components[0])?;
    let minor = parse_number(trimmed, components[1])?;
    let patch = parse_number(trimmed, components[2])?;
    let (pre_release, build) = validated_suffixes(trimmed, &parts)?;

    Ok(Version {
        major,
        minor,
        patch,
        pre_release,
        build,
    })
}

/// One component of a partial version literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Part {
    Number(u64),
    Wildcard,
}

/// A version literal as written inside a constraint: components may be
/// missing or wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PartialVersion {
    literal: String,
    pub major: Option<Part>,
    pub minor: Option<Part>,
    pub patch: Option<Part>,
    pub pre_release: Option<String>,
    pub build: Option<String>,
}

impl PartialVersion {
    /// Parse a constraint-side literal such as `1`, `1.2`, `1.x`, `*`, `ANY` or `1.2.3-beta`
    pub fn parse(literal: &str) -> Result<Self, VersionError> {
        let parts = split_literal(literal);
        let (pre_release, build) = validated_suffixes(literal, &parts)?;

        let mut partial = PartialVersion {
            literal: literal.to_string(),
            major: None,
            minor: None,
            patch: None,
            pre_release,
            build,
        };

        if parts.core.is_empty() || parts.core == "ANY" {
            if parts.core == "ANY" {
                partial.major = Some(Part::Wildcard);
            }
            return Ok(partial);
        }

        let components: Vec<&str> = parts.core.split('.').collect();
        if components.len() > 3 {
            return Err(VersionError::ComponentCount(literal.to_string()));
        }

        let mut slots = [None; 3];
        for (slot, component) in slots.iter_mut().zip(&components) {
            *slot = Some(if is_wildcard_char(component) {
                Part::Wildcard
            } else {
                Part::Number(parse_number(literal, component)?)
            });
        }
        [partial.major, partial.minor, partial.patch] = slots;

        Ok(partial)
    }

    /// True when every written component is a wildcard (or nothing is written at all)
    pub fn is_any(&self) -> bool {
        [self.major, self.minor, self.patch]
            .iter()
            .flatten()
            .all(|part| *part == Part::Wildcard)
    }

    /// True when the component is missing or a wildcard
    pub fn is_open(part: Option<Part>) -> bool {
        !matches!(part, Some(Part::Number(_)))
    }

    /// Numeric value of a component, failing on wildcards and missing parts
    pub fn number(&self, part: Option<Part>) -> Result<u64, VersionError> {
        match part {
            Some(Part::Number(n)) => Ok(n),
            _ => Err(VersionError::WildcardComponent(self.literal.clone())),
        }
    }

    /// Numeric value of a component, treating wildcards and missing parts as zero
    pub fn number_or_zero(part: Option<Part>) -> u64 {
        match part {
            Some(Part::Number(n)) => n,
            _ => 0,
        }
    }

    /// Add one to a component, rejecting wildcard remnants
    pub fn increment(&self, part: Option<Part>) -> Result<u64, VersionError> {
        let value = self.number(part)?;
        value.checked_add(1).ok_or_else(|| VersionError::Overflow {
            literal: self.literal.clone(),
            value,
        })
    }

    /// The version with wildcards and missing components replaced by zero,
    /// pre-release and build metadata kept
    pub fn zero_filled(&self) -> Version {
        Version {
            major: Self::number_or_zero(self.major),
            minor: Self::number_or_zero(self.minor),
            patch: Self::number_or_zero(self.patch),
            pre_release: self.pre_release.clone(),
            build: self.build.clone(),
        }
    }

    /// The exact version this literal names, failing if any component is open
    pub fn exact(&self) -> Result<Version, VersionError> {
        Ok(Version {
            major: self.number(self.major)?,
            minor: self.number(self.minor)?,
            patch: self.number(self.patch)?,
            pre_release: self.pre_release.clone(),
            build: self.build.clone(),
        })
    }
}
