//! Query tool for a names database file.
//!
//! # Responsibility
//! - Run one read-only query through `names_core::Names`.
//! - Print results as JSON on stdout and failures on stderr.
//!
//! Logging is enabled only when `--log-dir`/`NAMES_LOG_DIR` is set.

use clap::{Args, Parser, Subcommand};
use names_core::{
    init_logging, LogLevel, LoggingConfig, Name, Names, RepoResult, StorageHandle,
};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "names")]
#[command(version)]
#[command(about = "Query a names database and print JSON")]
struct Cli {
    /// Path to an existing names database file
    db_path: PathBuf,

    /// Directory for rolling log files (absolute path)
    #[arg(long, env = "NAMES_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "NAMES_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Total number of names
    Count,
    /// Whether a name exists (case-insensitive)
    Exists { name: String },
    /// One name by exact, case-insensitive match
    Get { name: String },
    /// Names whose most common country matches
    Country { country: String },
    /// Names whose highest-density country matches
    Density { country: String },
    /// Every name
    All,
    /// Names with world usage outside [min, max]
    UsageWorld(Bounds),
    /// Names with country usage outside [min, max]
    UsageCountry(Bounds),
    /// Names with world rank outside [min, max]
    RankWorld(Bounds),
    /// Names with country rank outside [min, max]
    RankCountry(Bounds),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Args)]
struct Bounds {
    #[arg(allow_negative_numbers = true)]
    min: i64,
    #[arg(allow_negative_numbers = true)]
    max: i64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = init_logging_from(&cli) {
        eprintln!("logging disabled: {message}");
    }

    let handle = StorageHandle::new(cli.db_path);
    match run(&Names::new(&handle), &cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            log::error!("event=cli_query module=cli status=error error={message}");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging_from(cli: &Cli) -> Result<(), String> {
    let Some(log_dir) = cli.log_dir.as_deref() else {
        return Ok(());
    };
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(LogLevel::default_for_build().as_str());
    let config = LoggingConfig::parse(level, log_dir).map_err(|err| err.to_string())?;
    init_logging(&config).map_err(|err| err.to_string())
}

fn run(names: &Names<'_>, command: &Command) -> Result<String, String> {
    let value = match command {
        Command::Count => Value::from(names.count().map_err(|err| err.to_string())?),
        Command::Exists { name } => {
            Value::from(names.exists(name).map_err(|err| err.to_string())?)
        }
        Command::Get { name } => {
            serde_json::to_value(names.get_by_name(name).map_err(|err| err.to_string())?)
                .map_err(|err| err.to_string())?
        }
        Command::Country { country } => to_json(names.get_by_country(country))?,
        Command::Density { country } => to_json(names.get_by_country_density(country))?,
        Command::All => to_json(names.get_all())?,
        Command::UsageWorld(bounds) => {
            to_json(names.get_between_usage_world(bounds.min, bounds.max))?
        }
        Command::UsageCountry(bounds) => {
            to_json(names.get_between_usage_country(bounds.min, bounds.max))?
        }
        Command::RankWorld(bounds) => {
            to_json(names.get_between_rank_world(bounds.min, bounds.max))?
        }
        Command::RankCountry(bounds) => {
            to_json(names.get_between_rank_country(bounds.min, bounds.max))?
        }
    };

    serde_json::to_string_pretty(&value).map_err(|err| err.to_string())
}

fn to_json(result: RepoResult<Vec<Name>>) -> Result<Value, String> {
    let names = result.map_err(|err| err.to_string())?;
    serde_json::to_value(names).map_err(|err| err.to_string())
}
