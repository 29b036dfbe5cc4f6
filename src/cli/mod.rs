//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "sklog",
    version,
    about = "Track your skills, practice time and learning streak",
    propagate_version = true
)]
pub struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true, env = "SKLOG_ROBOT")]
    pub robot: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use this config file instead of the global and project files
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// `--format` wins; `--robot` alone means JSON.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        match (self.format, self.robot) {
            (Some(format), _) => format,
            (None, true) => OutputFormat::Json,
            (None, false) => OutputFormat::Human,
        }
    }

    /// Whether errors should be reported as JSON on stdout.
    #[must_use]
    pub fn wants_json_errors(&self) -> bool {
        self.robot || self.output_format().is_machine()
    }
}
