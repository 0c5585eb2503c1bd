//! `rollcall report`, `validate` and `layout` commands.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use rollcall_io::{load_dataset, Format};
use rollcall_recon::config::ReportConfig;
use tracing::info;

use crate::exit_codes::{io_exit_code, recon_exit_code, EXIT_ERROR, EXIT_REPORT_IO};
use crate::CliError;

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl From<InputFormat> for Format {
    fn from(f: InputFormat) -> Self {
        match f {
            InputFormat::Csv => Format::Csv,
            InputFormat::Tsv => Format::Tsv,
            InputFormat::Xlsx => Format::Xlsx,
        }
    }
}

#[derive(Args)]
pub struct ReportArgs {
    /// Fixed master roster (csv, tsv, xlsx, xls, ods)
    #[arg(long, env = "ROLLCALL_FIXED")]
    pub fixed: PathBuf,

    /// Weekly registration extract (csv, tsv, xlsx, xls, ods)
    #[arg(long)]
    pub weekly: PathBuf,

    /// Report config (.toml); built-in layout and column names when omitted
    #[arg(long, short = 'c', env = "ROLLCALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Input format for both files (default: inferred from extension)
    #[arg(long, short = 'f')]
    pub from: Option<InputFormat>,

    /// Worksheet to read from both Excel inputs (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Worksheet of the fixed roster workbook; overrides --sheet
    #[arg(long, value_name = "SHEET")]
    pub fixed_sheet: Option<String>,

    /// Worksheet of the weekly workbook; overrides --sheet
    #[arg(long, value_name = "SHEET")]
    pub weekly_sheet: Option<String>,

    /// Write the report workbook here
    #[arg(long)]
    pub xlsx: Option<PathBuf>,

    /// Leave the summary block out of the workbook
    #[arg(long)]
    pub no_summary: bool,

    /// Write committees.csv and roles.csv into this directory
    #[arg(long, value_name = "DIR")]
    pub csv_dir: Option<PathBuf>,

    /// Output JSON to stdout instead of the text tables
    #[arg(long)]
    pub json: bool,

    /// Write JSON output to file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Suppress the text tables and the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

fn report_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig, CliError> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };
    let config_str = std::fs::read_to_string(path).map_err(|e| {
        report_err(EXIT_REPORT_IO, format!("cannot read config {}: {e}", path.display()))
    })?;
    ReportConfig::from_toml(&config_str).map_err(|e| {
        report_err(recon_exit_code(&e), e.to_string()).with_hint(format!("in {}", path.display()))
    })
}

pub fn cmd_report(args: ReportArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let format = args.from.map(Format::from);
    let fixed_sheet = args.fixed_sheet.as_deref().or(args.sheet.as_deref());
    let weekly_sheet = args.weekly_sheet.as_deref().or(args.sheet.as_deref());

    let fixed = load_dataset(&args.fixed, "fixed", format, fixed_sheet).map_err(|e| {
        report_err(io_exit_code(&e), format!("Unable to read fixed master file: {e}"))
    })?;
    let weekly = load_dataset(&args.weekly, "weekly", format, weekly_sheet).map_err(|e| {
        report_err(io_exit_code(&e), format!("Unable to read weekly file: {e}"))
    })?;

    let report = rollcall_recon::run(&config, &fixed, &weekly).map_err(|e| {
        let err = report_err(recon_exit_code(&e), e.to_string());
        match e {
            rollcall_recon::ReconError::MissingColumn { .. } => {
                err.with_hint("column names are set in the [fixed] / [weekly] tables of --config")
            }
            _ => err,
        }
    })?;

    if let Some(ref path) = args.xlsx {
        rollcall_io::xlsx::export_report(&report, path, !args.no_summary)
            .map_err(|e| report_err(io_exit_code(&e), e.to_string()))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(ref dir) = args.csv_dir {
        std::fs::create_dir_all(dir).map_err(|e| {
            report_err(EXIT_REPORT_IO, format!("cannot create {}: {e}", dir.display()))
        })?;
        for (table, file) in report.tables.iter().zip(["committees.csv", "roles.csv"]) {
            let path = dir.join(file);
            rollcall_io::csv::export_table(table, &path)
                .map_err(|e| report_err(io_exit_code(&e), e.to_string()))?;
            eprintln!("wrote {}", path.display());
        }
    }

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| report_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json_str)
            .map_err(|e| report_err(EXIT_REPORT_IO, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if args.json {
        println!("{json_str}");
    } else if !args.quiet {
        print!("{}", crate::text::render_report(&report));
    }

    let s = &report.summary;
    info!(
        unlisted = s.roster_unlisted_category,
        unmatched = s.weekly_unmatched_ids,
        "reconciliation detail"
    );
    if !args.quiet {
        eprintln!(
            "{} cadre, {} registered ({}); {} weekly rows, {} without a usable id",
            s.total_strength,
            s.registered,
            s.registered_percent,
            s.weekly_records,
            s.weekly_unrecoverable,
        );
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(config_path.as_path()))?;
    eprintln!(
        "valid: report '{}' with {} categor{}, {} role row(s)",
        config.name,
        config.layout.categories.len(),
        if config.layout.categories.len() == 1 { "y" } else { "ies" },
        config.layout.roles.len(),
    );
    Ok(())
}

pub fn cmd_layout(config_path: Option<PathBuf>, as_toml: bool) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;

    if as_toml {
        let text = config
            .to_toml()
            .map_err(|e| report_err(recon_exit_code(&e), e.to_string()))?;
        print!("{text}");
        return Ok(());
    }

    for category in &config.layout.categories {
        println!("{category}");
        for role in config.layout.roles_for(category) {
            println!("  {role}");
        }
    }
    Ok(())
}
