// rollcall: weekly registration report for committee rosters

mod exit_codes;
mod report;
mod text;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Match a committee roster against weekly registrations and report coverage")]
#[command(version)]
struct Cli {
    /// Log progress to stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the committee and role tables from a roster and a weekly extract
    #[command(after_help = "\
Examples:
  rollcall report --fixed master.xlsx --weekly week42.csv
  rollcall report --fixed master.csv --weekly week42.csv --xlsx weekly_report.xlsx
  rollcall report --fixed master.csv --weekly week42.csv --json --quiet
  rollcall report --fixed master.csv --weekly week42.csv --csv-dir out/ -c report.toml
  rollcall report --fixed master.xlsx --fixed-sheet Roster --weekly week42.xlsx --weekly-sheet 'Week 42'

Exit codes:
  0   Report built
  2   Usage error (unknown file extension)
  60  Invalid config
  61  Input missing a required column
  62  A table came out empty
  63  Read/write failure")]
    Report(report::ReportArgs),

    /// Check a report config without running it
    #[command(after_help = "\
Examples:
  rollcall validate report.toml")]
    Validate {
        /// Config file (.toml)
        config: PathBuf,
    },

    /// Print the categories and role rows the report lists, in order
    #[command(after_help = "\
Examples:
  rollcall layout
  rollcall layout --toml > report.toml
  rollcall layout -c report.toml")]
    Layout {
        /// Read the layout from this config instead of the built-in one
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Print the full config as TOML, ready to edit
        #[arg(long)]
        toml: bool,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            eprintln!("Usage: rollcall <command> [options]");
            eprintln!("       rollcall --help for more information");
            Err(CliError { code: EXIT_USAGE, message: String::new(), hint: None })
        }
        Some(Commands::Report(args)) => report::cmd_report(args),
        Some(Commands::Validate { config }) => report::cmd_validate(config),
        Some(Commands::Layout { config, toml }) => report::cmd_layout(config, toml),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
