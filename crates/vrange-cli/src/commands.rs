//! Subcommand implementations
//!
//! Every command returns the process exit code: 0 on success, 1 when a
//! `satisfies` or `max` query finds no match.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use vrange_semver::{evaluator, Comparator, Constraint, Semver, Version};

use crate::config::OutputFormat;

/// Settings resolved from vrange.toml and command line flags
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub include_prereleases: bool,
    pub format: OutputFormat,
}

impl Settings {
    /// The command line flag wins over the configured default in both directions
    fn include_prereleases(&self, flag: Option<bool>) -> bool {
        flag.unwrap_or(self.include_prereleases)
    }
}

#[derive(Args, Debug)]
pub struct SatisfiesArgs {
    /// Version to test, e.g. 1.2.3-beta.1
    pub version: String,

    /// Constraint to test against, e.g. "^1.2 || >=2.0.0 <2.5.0"
    pub constraint: String,

    /// Let pre-releases match ranges that do not name their major.minor.patch
    /// (`--include-prereleases=false` turns off a vrange.toml default)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub include_prereleases: Option<bool>,
}

#[derive(Args, Debug)]
pub struct MaxArgs {
    /// Constraint to test against
    pub constraint: String,

    /// Candidate versions
    #[arg(required = true)]
    pub versions: Vec<String>,

    /// Let pre-releases match ranges that do not name their major.minor.patch
    /// (`--include-prereleases=false` turns off a vrange.toml default)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub include_prereleases: Option<bool>,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Constraint to test against
    pub constraint: String,

    /// Candidate versions
    #[arg(required = true)]
    pub versions: Vec<String>,

    /// Let pre-releases match ranges that do not name their major.minor.patch
    /// (`--include-prereleases=false` turns off a vrange.toml default)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub include_prereleases: Option<bool>,
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Versions to sort
    #[arg(required = true)]
    pub versions: Vec<String>,

    /// Sort from highest to lowest
    #[arg(short, long)]
    pub reverse: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    pub left: String,
    pub right: String,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Constraint to parse
    pub constraint: String,
}

fn parse_constraint(input: &str) -> Result<Constraint> {
    Constraint::parse(input).with_context(|| format!("Failed to parse constraint {:?}", input))
}

fn parse_version(input: &str) -> Result<Version> {
    Version::parse(input).with_context(|| format!("Failed to parse version {:?}", input))
}

fn parse_versions(inputs: &[String]) -> Result<Vec<Version>> {
    inputs.iter().map(|v| parse_version(v)).collect()
}

pub fn satisfies(args: SatisfiesArgs, settings: Settings) -> Result<i32> {
    let version = parse_version(&args.version)?;
    let constraint = parse_constraint(&args.constraint)?;
    let include = settings.include_prereleases(args.include_prereleases);

    let satisfied = evaluator::satisfies(&version, &constraint, include);
    log::info!("{} against {}: {}", version, constraint, satisfied);

    match settings.format {
        OutputFormat::Text => println!("{}", satisfied),
        OutputFormat::Json => println!(
            "{}",
            json!({ "version": version, "constraint": constraint, "satisfied": satisfied })
        ),
    }

    Ok(if satisfied { 0 } else { 1 })
}

pub fn max(args: MaxArgs, settings: Settings) -> Result<i32> {
    let constraint = parse_constraint(&args.constraint)?;
    let include = settings.include_prereleases(args.include_prereleases);

    let best = evaluator::max_satisfying_strs(&args.versions, &constraint, include)
        .context("Failed to parse candidate versions")?;

    match settings.format {
        OutputFormat::Text => {
            if let Some(version) = &best {
                println!("{}", version);
            }
        }
        OutputFormat::Json => println!(
            "{}",
            json!({ "constraint": constraint, "max": best })
        ),
    }

    Ok(if best.is_some() { 0 } else { 1 })
}

/// The literals whose parsed version satisfies the constraint, in input order
fn matching_literals<'a>(
    literals: &'a [String],
    versions: &[Version],
    constraint: &Constraint,
    include: bool,
) -> Vec<&'a str> {
    literals
        .iter()
        .zip(versions)
        .filter(|(_, version)| evaluator::satisfies(version, constraint, include))
        .map(|(literal, _)| literal.as_str())
        .collect()
}

pub fn filter(args: FilterArgs, settings: Settings) -> Result<i32> {
    let constraint = parse_constraint(&args.constraint)?;
    let include = settings.include_prereleases(args.include_prereleases);
    let versions = parse_versions(&args.versions)?;

    let matched = matching_literals(&args.versions, &versions, &constraint, include);

    match settings.format {
        OutputFormat::Text => {
            for literal in &matched {
                println!("{}", literal);
            }
        }
        OutputFormat::Json => println!("{}", json!(matched)),
    }

    Ok(0)
}

pub fn sort(args: SortArgs, settings: Settings) -> Result<i32> {
    let literals: Vec<&str> = args.versions.iter().map(String::as_str).collect();
    let sorted = if args.reverse {
        Semver::rsort(&literals)
    } else {
        Semver::sort(&literals)
    }
    .context("Failed to sort versions")?;

    match settings.format {
        OutputFormat::Text => {
            for version in &sorted {
                println!("{}", version);
            }
        }
        OutputFormat::Json => println!("{}", json!(sorted)),
    }

    Ok(0)
}

pub fn compare(args: CompareArgs, settings: Settings) -> Result<i32> {
    let left = parse_version(&args.left)?;
    let right = parse_version(&args.right)?;
    let result = Comparator::compare_int(&left, &right, false);

    match settings.format {
        OutputFormat::Text => println!("{}", result),
        OutputFormat::Json => println!(
            "{}",
            json!({ "left": left, "right": right, "result": result })
        ),
    }

    Ok(0)
}

pub fn parse(args: ParseArgs, settings: Settings) -> Result<i32> {
    let constraint = parse_constraint(&args.constraint)?;

    match settings.format {
        OutputFormat::Text => println!("{}", constraint),
        OutputFormat::Json => {
            let ranges: Vec<String> = constraint.ranges().iter().map(|r| r.to_string()).collect();
            let joins: Vec<&str> = constraint.joins().iter().map(|j| j.as_str()).collect();
            println!(
                "{}",
                json!({
                    "original": constraint,
                    "normalized": constraint.to_string(),
                    "ranges": ranges,
                    "joins": joins,
                })
            );
        }
    }

    Ok(0)
}
