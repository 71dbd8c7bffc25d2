//! # Validate Subcommand
//!
//! Validates one CSV file against one schema file and writes the report
//! to stdout, to `--output`, or to a timestamped file under the report
//! directory.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use csvschema::CsvSchema;

use crate::config::CliConfig;
use crate::output::{render, report_file_name, ReportFormat, RunSummary};

/// Arguments for `csvschema validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON Schema carrying `csvDelimiter` and `csvHasHeader`.
    #[arg(long, value_name = "PATH")]
    pub schema: PathBuf,

    /// CSV file to validate.
    #[arg(long, value_name = "PATH")]
    pub csv: PathBuf,

    /// Report format. Overrides the config file.
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write the report to this file instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a timestamped report file into this directory. Overrides the
    /// config file; ignored when `--output` is given.
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Treat the `format` keyword as an annotation only.
    #[arg(long)]
    pub no_format_validation: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the CSV is valid, 1 when the report holds
/// errors.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let mut settings = config.settings();
    if args.no_format_validation {
        settings.validate_formats = false;
    }
    let format = args.format.or(config.format).unwrap_or_default();

    let started = Instant::now();

    let schema_file = File::open(&args.schema)
        .with_context(|| format!("cannot open schema {}", args.schema.display()))?;
    let schema = CsvSchema::from_reader(BufReader::new(schema_file), &settings)
        .with_context(|| format!("cannot load schema {}", args.schema.display()))?;

    let csv_file = File::open(&args.csv)
        .with_context(|| format!("cannot open csv {}", args.csv.display()))?;
    let response = schema.validate(BufReader::new(csv_file));

    tracing::info!(
        schema = %args.schema.display(),
        csv = %args.csv.display(),
        is_valid = response.is_valid(),
        errors = response.error_count(),
        "validation complete"
    );

    let schema_name = crate::display_name(&args.schema);
    let csv_name = crate::display_name(&args.csv);
    let report = render(
        format,
        &response,
        &RunSummary {
            schema_name: &schema_name,
            csv_name: &csv_name,
            elapsed: started.elapsed(),
        },
    )?;

    match report_destination(args, config, format) {
        Some(path) => {
            std::fs::write(&path, report)
                .with_context(|| format!("cannot write report {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{report}"),
    }

    Ok(if response.is_valid() { 0 } else { 1 })
}

/// Where the report goes: explicit file, timestamped file, or stdout (`None`).
fn report_destination(
    args: &ValidateArgs,
    config: &CliConfig,
    format: ReportFormat,
) -> Option<PathBuf> {
    if let Some(output) = &args.output {
        return Some(output.clone());
    }
    let dir: &Path = args.report_dir.as_deref().or(config.report_dir.as_deref())?;
    Some(dir.join(report_file_name(format, chrono::Utc::now())))
}
