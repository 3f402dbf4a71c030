//! Desugaring of validated token groups into ranges
//!
//! Caret, tilde, hyphen and x-ranges are all shorthand for one or two plain
//! comparator bounds:
//!
//! | Input           | Range                 |
//! |-----------------|-----------------------|
//! | `^1.2.3`        | `>=1.2.3 <2.0.0`      |
//! | `^0.2.3`        | `>=0.2.3 <0.3.0`      |
//! | `~1.2.3`        | `>=1.2.3 <1.3.0`      |
//! | `1.2.3 - 2.3`   | `>=1.2.3 <2.4.0`      |
//! | `1.x`           | `>=1.0.0 <2.0.0`      |
//! | `*`             | `>=0.0.0`             |

use super::constraint::{ConstraintError, Join};
use super::token::{render, Token, TokenKind};
use super::{Bound, Operator, Range};
use crate::version_parser::{Part, PartialVersion};
use crate::Version;

/// Split a validated token stream on join operators and desugar every group
pub fn desugar(tokens: &[Token]) -> Result<(Vec<Range>, Vec<Join>), ConstraintError> {
    let mut ranges = Vec::new();
    let mut joins = Vec::new();
    let mut group: Vec<&Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Start => {}
            TokenKind::And | TokenKind::Or | TokenKind::End => {
                ranges.push(desugar_group(&group)?);
                group.clear();
                match token.kind {
                    TokenKind::And => joins.push(Join::Conjunction),
                    TokenKind::Or => joins.push(Join::Disjunction),
                    _ => {}
                }
            }
            _ => group.push(token),
        }
    }

    Ok((ranges, joins))
}

fn desugar_group(group: &[&Token]) -> Result<Range, ConstraintError> {
    let range = match group {
        [start, op, end]
            if start.is_version() && op.is(TokenKind::Hyphen) && end.is_version() =>
        {
            hyphen_range(&start.literal, &end.literal)?
        }
        [op, version] if op.is(TokenKind::Caret) && version.is_version() => caret_range(&version.literal)?,
        [op, version] if op.is(TokenKind::Tilde) && version.is_version() => tilde_range(&version.literal)?,
        [op, version] if op.kind.is_comparison() && version.is_version() => {
            Range::new(comparator_bound(op, version)?, None)
        }
        [op1, v1, op2, v2]
            if op1.kind.is_comparison()
                && v1.is_version()
                && op2.kind.is_comparison()
                && v2.is_version() =>
        {
            Range::new(comparator_bound(op1, v1)?, Some(comparator_bound(op2, v2)?))
        }
        [op, version] if op.is(TokenKind::Eq) && version.is_static_version() => {
            Range::single(Operator::Equal, Version::parse(&version.literal)?)
        }
        [op, version] if op.is(TokenKind::Eq) && version.is_version() => x_range(&version.literal)?,
        [version] if version.is_version() && !version.is_static_version() => {
            x_range(&version.literal)?
        }
        [] => x_range("")?,
        _ => {
            let owned: Vec<Token> = group.iter().map(|t| (*t).clone()).collect();
            return Err(ConstraintError::UnknownSubConstraint {
                rendering: render(&owned, &[]),
            });
        }
    };

    Ok(range)
}

/// A plain `op version` clause; wildcards and missing parts become zero
fn comparator_bound(op: &Token, version: &Token) -> Result<Bound, ConstraintError> {
    let operator = Operator::from_token(op.kind).ok_or_else(|| {
        ConstraintError::UnknownSubConstraint {
            rendering: op.to_string(),
        }
    })?;
    let partial = PartialVersion::parse(&version.literal)?;
    Ok(Bound::new(operator, partial.zero_filled()))
}

fn release(major: u64, minor: u64, patch: u64) -> Version {
    Version::new(major, minor, patch)
}

/// `^M.m.p` allows changes that keep the left-most non-zero component
fn caret_range(literal: &str) -> Result<Range, ConstraintError> {
    let partial = PartialVersion::parse(literal)?;
    if partial.is_any() {
        return Ok(Range::any());
    }

    let lower = partial.zero_filled();
    let major = partial.number(partial.major)?;

    let upper = if PartialVersion::is_open(partial.minor) {
        release(partial.increment(partial.major)?, 0, 0)
    } else {
        let minor = partial.number(partial.minor)?;
        if major != 0 {
            release(partial.increment(partial.major)?, 0, 0)
        } else if PartialVersion::is_open(partial.patch) || minor != 0 {
            release(0, partial.increment(partial.minor)?, 0)
        } else {
            release(0, 0, partial.increment(partial.patch)?)
        }
    };

    Ok(Range::between(lower, upper))
}

/// `~M.m.p` allows patch-level changes, `~M` minor-level ones
fn tilde_range(literal: &str) -> Result<Range, ConstraintError> {
    let partial = PartialVersion::parse(literal)?;
    if partial.is_any() {
        return Ok(Range::any());
    }

    let lower = partial.zero_filled();
    let major = partial.number(partial.major)?;

    let upper = if PartialVersion::is_open(partial.minor) {
        release(partial.increment(partial.major)?, 0, 0)
    } else {
        release(major, partial.increment(partial.minor)?, 0)
    };

    Ok(Range::between(lower, upper))
}

/// `A - B` is inclusive on both ends when `B` is complete, otherwise it
/// stops below the next release after `B`'s last given component.
fn hyphen_range(start: &str, end: &str) -> Result<Range, ConstraintError> {
    let start = PartialVersion::parse(start)?;
    let end = PartialVersion::parse(end)?;

    let lower = Bound::new(Operator::GreaterThanOrEqual, start.zero_filled());

    let upper = match (end.minor, end.patch) {
        (Some(Part::Number(_)), Some(Part::Number(_))) => {
            Bound::new(Operator::LessThanOrEqual, end.exact()?)
        }
        (Some(Part::Number(_)), _) => Bound::new(
            Operator::LessThan,
            release(end.number(end.major)?, end.increment(end.minor)?, 0),
        ),
        _ => Bound::new(Operator::LessThan, release(end.increment(end.major)?, 0, 0)),
    };

    Ok(Range::new(lower, Some(upper)))
}

/// `*`, `1.x`, `1.2` and the empty constraint
fn x_range(literal: &str) -> Result<Range, ConstraintError> {
    let partial = PartialVersion::parse(literal)?;
    if partial.is_any() || PartialVersion::is_open(partial.major) {
        return Ok(Range::any());
    }

    let major = partial.number(partial.major)?;

    let range = if PartialVersion::is_open(partial.minor) {
        Range::between(release(major, 0, 0), release(partial.increment(partial.major)?, 0, 0))
    } else if PartialVersion::is_open(partial.patch) {
        let minor = partial.number(partial.minor)?;
        Range::between(
            release(major, minor, 0),
            release(major, partial.increment(partial.minor)?, 0),
        )
    } else {
        Range::single(Operator::Equal, partial.exact()?)
    };

    Ok(range)
}
