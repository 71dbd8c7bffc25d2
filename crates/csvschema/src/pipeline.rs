//! # Validation Pipeline
//!
//! Runs one validation: dialect check, decode, then coerce and evaluate
//! every row, aggregating as it goes.
//!
//! ```text
//! Start -> DialectCheck -> Fail (terminal)
//!                       -> Decode -> EmptyFail (terminal)
//!                                 -> RowLoop -> Aggregate (terminal)
//! ```
//!
//! With the `parallel` feature rows are evaluated on the rayon pool. The
//! indexed collect keeps row order, so the report is identical to a
//! sequential run.

use std::io::Read;

use crate::coerce::coerce_row;
use crate::decode::{decode_rows, DecodeFailure, RawRow};
use crate::error::CsvSchemaError;
use crate::evaluate::evaluate_row;
use crate::report::{
    ReportBuilder, ValidationResponse, ValidationResult, EMPTY_CONTENT_MESSAGE, NO_COLUMN,
};
use crate::schema::CsvSchema;
use crate::settings::ValidationSettings;

/// Validate CSV content against schema text using default settings.
///
/// # Errors
///
/// Only when the schema cannot be parsed or compiled. Every other problem
/// is reported inside the returned [`ValidationResponse`].
pub fn validate_csv<R: Read>(schema: &str, csv: R) -> Result<ValidationResponse, CsvSchemaError> {
    Ok(CsvSchema::parse(schema)?.validate(csv))
}

/// Validate CSV content against a schema read from a stream.
pub fn validate_csv_stream<S: Read, R: Read>(
    schema: S,
    csv: R,
    settings: &ValidationSettings,
) -> Result<ValidationResponse, CsvSchemaError> {
    Ok(CsvSchema::from_reader(schema, settings)?.validate(csv))
}

impl CsvSchema {
    /// Validate CSV content against this schema.
    ///
    /// Always produces a complete report. Directive errors stop the run
    /// before `csv` is read.
    pub fn validate<R: Read>(&self, csv: R) -> ValidationResponse {
        let dialect = match self.dialect() {
            Ok(dialect) => dialect,
            Err(errors) => {
                tracing::warn!(count = errors.len(), "schema dialect directives invalid");
                return ReportBuilder::new()
                    .pre_processing(errors.iter().map(ToString::to_string))
                    .finish();
            }
        };

        let rows = decode_rows(dialect, csv);
        if rows.is_empty() {
            tracing::warn!("csv content has no data rows");
            return ReportBuilder::new()
                .pre_processing([EMPTY_CONTENT_MESSAGE])
                .finish();
        }
        tracing::debug!(rows = rows.len(), delimiter = ?dialect.delimiter, "csv decoded");

        let mut report = ReportBuilder::new();
        for block in self.evaluate_rows(&rows) {
            report.push_row(block);
        }
        let response = report.finish();

        tracing::debug!(
            rows = rows.len(),
            errors = response.error_count(),
            is_valid = response.is_valid(),
            "validation finished"
        );
        response
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_rows(&self, rows: &[Result<RawRow, DecodeFailure>]) -> Vec<Vec<ValidationResult>> {
        rows.iter().map(|row| self.evaluate_decoded(row)).collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_rows(&self, rows: &[Result<RawRow, DecodeFailure>]) -> Vec<Vec<ValidationResult>> {
        use rayon::prelude::*;

        rows.par_iter().map(|row| self.evaluate_decoded(row)).collect()
    }

    /// Result block for one decoded row.
    fn evaluate_decoded(&self, row: &Result<RawRow, DecodeFailure>) -> Vec<ValidationResult> {
        let row = match row {
            Ok(row) => row,
            Err(failure) => {
                return vec![ValidationResult::row_error(
                    failure.line_number,
                    NO_COLUMN,
                    failure.to_string(),
                )];
            }
        };

        match coerce_row(row, self.columns()) {
            Ok(coerced) => evaluate_row(self.validator(), row.line_number, coerced),
            Err(mismatch) => vec![ValidationResult::row_error(
                row.line_number,
                NO_COLUMN,
                mismatch.to_string(),
            )],
        }
    }
}
