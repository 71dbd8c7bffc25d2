//! # Inspect Subcommand
//!
//! Prints the dialect and the ordered column specs a schema declares,
//! without reading any CSV.

use std::fmt::Write as _;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use csvschema::{CsvSchema, ValidationSettings};

/// Arguments for `csvschema inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// JSON Schema to inspect.
    #[arg(long, value_name = "PATH")]
    pub schema: PathBuf,
}

/// Execute the inspect subcommand.
///
/// Returns exit code: 0 when the dialect directives are usable, 1 otherwise.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let file = File::open(&args.schema)
        .with_context(|| format!("cannot open schema {}", args.schema.display()))?;
    let schema = CsvSchema::from_reader(BufReader::new(file), &ValidationSettings::default())
        .with_context(|| format!("cannot load schema {}", args.schema.display()))?;

    print!("{}", describe(&schema));
    Ok(if schema.dialect().is_ok() { 0 } else { 1 })
}

fn describe(schema: &CsvSchema) -> String {
    let mut out = String::new();
    match schema.dialect() {
        Ok(dialect) => {
            let _ = writeln!(out, "Delimiter: {:?}", dialect.delimiter);
            let _ = writeln!(out, "Has header: {}", dialect.has_header);
        }
        Err(errors) => {
            for error in errors {
                let _ = writeln!(out, "Pre-processing error: {error}");
            }
        }
    }

    let _ = writeln!(out, "Columns: {}", schema.columns().len());
    for (i, column) in schema.columns().iter().enumerate() {
        let declared = column
            .declared_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "untyped".to_string());
        let _ = writeln!(out, "  {}. {} ({declared})", i + 1, column.name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_columns_in_order() {
        let schema = CsvSchema::parse(
            r#"{
                "csvDelimiter": ";",
                "csvHasHeader": "false",
                "properties": {
                    "id": { "type": "integer" },
                    "score": { "type": ["number", "null"] },
                    "note": {}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            describe(&schema),
            "Delimiter: ';'\nHas header: false\nColumns: 3\n  1. id (integer)\n  2. score (number|null)\n  3. note (untyped)\n"
        );
    }

    #[test]
    fn test_describe_reports_directive_errors() {
        let schema = CsvSchema::parse(r#"{ "csvDelimiter": "ab", "properties": {} }"#).unwrap();
        let text = describe(&schema);
        assert!(text.contains("Pre-processing error: csvDelimiter can only be a single character"));
        assert!(text.contains(
            "Pre-processing error: Schema does not include: csvHasHeader which is mandatory"
        ));
        assert!(text.ends_with("Columns: 0\n"));
    }

    #[test]
    fn test_run_inspect_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.schema.json");
        std::fs::write(&good, r#"{ "csvDelimiter": ",", "csvHasHeader": "true" }"#).unwrap();
        assert_eq!(run_inspect(&InspectArgs { schema: good }).unwrap(), 0);

        let bad = dir.path().join("bad.schema.json");
        std::fs::write(&bad, r#"{ "csvDelimiter": "," }"#).unwrap();
        assert_eq!(run_inspect(&InspectArgs { schema: bad }).unwrap(), 1);
    }
}
