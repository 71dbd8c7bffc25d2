//! # Report Rendering
//!
//! Text output is the line-oriented console report (`Line N is valid`, ...);
//! JSON output is the `ValidationResponse` serialization.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use csvschema::ValidationResponse;

/// How the report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// What was validated, for the report header.
#[derive(Debug, Clone)]
pub struct RunSummary<'a> {
    pub schema_name: &'a str,
    pub csv_name: &'a str,
    pub elapsed: Duration,
}

/// Render a report in the requested format.
pub fn render(
    format: ReportFormat,
    response: &ValidationResponse,
    summary: &RunSummary<'_>,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(response, summary)),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(response)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn render_text(response: &ValidationResponse, summary: &RunSummary<'_>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "########## Processing File ##########");
    let _ = writeln!(out);
    let _ = writeln!(out, "Processing Schema: {}", summary.schema_name);
    let _ = writeln!(out, "Processing CSV: {}", summary.csv_name);
    let _ = writeln!(out);
    let verdict = if response.is_valid() {
        "Passed"
    } else {
        "Failed"
    };
    let _ = writeln!(out, "File Valid: {verdict}");
    let _ = writeln!(out);

    for result in response.results() {
        let _ = writeln!(out, "{result}");
    }

    let secs = summary.elapsed.as_secs();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Time Elapsed: {}:{}:{}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60
    );
    out
}

/// File name for a persisted report, e.g. `result_20260115T093000123Z.txt`.
pub fn report_file_name(format: ReportFormat, at: DateTime<Utc>) -> String {
    format!(
        "result_{}.{}",
        at.format("%Y%m%dT%H%M%S%3fZ"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SCHEMA: &str = r#"{
        "csvDelimiter": ",",
        "csvHasHeader": "true",
        "properties": { "name": { "type": "string" }, "age": { "type": "integer" } }
    }"#;

    fn summary() -> RunSummary<'static> {
        RunSummary {
            schema_name: "names.schema.json",
            csv_name: "names.csv",
            elapsed: Duration::from_secs(3723),
        }
    }

    #[test]
    fn test_text_report_layout() {
        let response =
            csvschema::validate_csv(SCHEMA, "name,age\nann,4\nbob,x\n".as_bytes()).unwrap();
        let text = render(ReportFormat::Text, &response, &summary()).unwrap();
        let expected = "\
########## Processing File ##########

Processing Schema: names.schema.json
Processing CSV: names.csv

File Valid: Failed

Line 1 is valid
Error on line: 2 with column: age; ";
        assert!(text.starts_with(expected), "got:\n{text}");
        assert!(text.ends_with("\nTime Elapsed: 1:2:3\n"), "got:\n{text}");
    }

    #[test]
    fn test_text_report_pre_processing() {
        let response = csvschema::validate_csv(SCHEMA, "".as_bytes()).unwrap();
        let text = render(ReportFormat::Text, &response, &summary()).unwrap();
        assert!(text.contains(
            "Pre-processing error: CSV content is empty, please check your input data"
        ));
    }

    #[test]
    fn test_json_report() {
        let response = csvschema::validate_csv(SCHEMA, "name,age\nann,4\n".as_bytes()).unwrap();
        let json = render(ReportFormat::Json, &response, &summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["isValid"], true);
        assert_eq!(value["results"][0]["lineNumber"], 1);
    }

    #[test]
    fn test_report_file_name() {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
        assert_eq!(
            report_file_name(ReportFormat::Text, at),
            "result_20260115T093000000Z.txt"
        );
        assert_eq!(
            report_file_name(ReportFormat::Json, at),
            "result_20260115T093000000Z.json"
        );
    }
}
