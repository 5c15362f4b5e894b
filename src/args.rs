//! These structs provide the CLI interface for the sponsors CLI.

use crate::model::parse_timestamp;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// sponsors: Sort your GitHub sponsors into tiers.
///
/// Reads a GitHub Sponsors export (a JSON array of sponsors and their transactions), places every
/// public sponsor into one of four categories (special, current, past or backer) and writes a
/// summary document that a website can render directly.
///
/// Profile details such as avatars and websites are looked up on GitHub when a token is available
/// through --github-token or GITHUB_TOKEN. Without one, values derived from the export are used.
#[derive(Debug, Parser, Clone)]
#[command(name = "sponsors", version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify the sponsors in an export and write the summary document.
    ///
    /// Private sponsors and sponsors without a settled transaction are left out. Records that
    /// cannot be read are skipped with a warning and the rest of the export is still processed.
    Summarize(SummarizeArgs),
    /// Write a CSV table with one row per classified sponsor, for review in a spreadsheet.
    Report(ReportArgs),
    /// Compare two summary documents and list the sponsors that were added, removed or changed.
    Diff(DiffArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// A configuration file. Defaults to sponsor-tiers/config.json in the platform's config
    /// directory, if it exists.
    #[arg(long, env = "SPONSORS_CONFIG")]
    config: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>) -> Self {
        Self { log_level, config }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// Args for the `sponsors summarize` command.
#[derive(Debug, Parser, Clone)]
pub struct SummarizeArgs {
    /// The GitHub Sponsors export to read.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the summary document.
    #[arg(long)]
    output: PathBuf,

    /// The reference time for all day counts, e.g. 2025-06-15 or 2025-06-15T12:00:00Z. Defaults
    /// to the current time.
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    /// Do not look up sponsor profiles on GitHub.
    #[arg(long, env = "SPONSORS_OFFLINE")]
    offline: bool,

    /// A GitHub token used for profile lookups.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

impl SummarizeArgs {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            now: None,
            offline: false,
            github_token: None,
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn now(&self) -> Option<DateTime<Utc>> {
        self.now
    }

    pub fn offline(&self) -> bool {
        self.offline
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Args for the `sponsors report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The GitHub Sponsors export to read.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the CSV table.
    #[arg(long)]
    output: PathBuf,

    /// The reference time for all day counts. Defaults to the current time.
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,
}

impl ReportArgs {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            now: None,
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn now(&self) -> Option<DateTime<Utc>> {
        self.now
    }
}

/// Args for the `sponsors diff` command.
#[derive(Debug, Parser, Clone)]
pub struct DiffArgs {
    /// The earlier summary document.
    #[arg(long)]
    old: PathBuf,

    /// The later summary document.
    #[arg(long)]
    new: PathBuf,
}

impl DiffArgs {
    pub fn new(old: impl Into<PathBuf>, new: impl Into<PathBuf>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn old(&self) -> &Path {
        &self.old
    }

    pub fn new_path(&self) -> &Path {
        &self.new
    }
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(s).map_err(|e| e.to_string())
}
