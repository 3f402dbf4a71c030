mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::Settings;
use config::{OutputFormat, VrangeConfig};

#[derive(Parser, Debug)]
#[command(name = "vrange")]
#[command(about = "Check versions against node-semver style range constraints")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Output format (overrides vrange.toml)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether a version satisfies a constraint (exit code 1 if not)
    Satisfies(commands::SatisfiesArgs),

    /// Print the highest version satisfying a constraint (exit code 1 if none)
    Max(commands::MaxArgs),

    /// Print every version satisfying a constraint, in input order
    Filter(commands::FilterArgs),

    /// Sort versions by precedence
    Sort(commands::SortArgs),

    /// Compare two versions, printing -1, 0 or 1
    Compare(commands::CompareArgs),

    /// Show the ranges a constraint desugars to
    Parse(commands::ParseArgs),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run() -> Result<i32> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = VrangeConfig::load_from_cwd()?.unwrap_or_default();
    let settings = Settings {
        include_prereleases: config.evaluation.include_prereleases,
        format: args.format.unwrap_or(config.output.format),
    };
    log::debug!("resolved settings: {:?}", settings);

    match args.command {
        Commands::Satisfies(a) => commands::satisfies(a, settings),
        Commands::Max(a) => commands::max(a, settings),
        Commands::Filter(a) => commands::filter(a, settings),
        Commands::Sort(a) => commands::sort(a, settings),
        Commands::Compare(a) => commands::compare(a, settings),
        Commands::Parse(a) => commands::parse(a, settings),
    }
}

/// Map a command result to the process exit status, printing the error chain on failure
fn exit_status(result: Result<i32>) -> u8 {
    match result {
        Ok(code) => code as u8,
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            2
        }
    }
}

fn main() -> ExitCode {
    ExitCode::from(exit_status(run()))
}
