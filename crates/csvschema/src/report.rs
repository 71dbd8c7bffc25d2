//! # Validation Report
//!
//! Result entries and their aggregation into a [`ValidationResponse`].
//!
//! Ordering is fixed: pre-processing errors (line `-1`) first, then one
//! block per data row in row order. A row block holds either a single
//! `Valid` entry or one or more error entries, never both. Nothing is
//! deduplicated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Line number used for errors found before any row is examined.
pub const PRE_PROCESSING_LINE: i64 = -1;

/// Column marker for results not attributable to a single column.
pub const NO_COLUMN: &str = "-";

/// Message carried by a row that passed evaluation.
pub const VALID_MESSAGE: &str = "Valid";

/// Message for input that decodes to zero data rows.
pub const EMPTY_CONTENT_MESSAGE: &str = "CSV content is empty, please check your input data";

/// One entry of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// 1-based data-row index, or [`PRE_PROCESSING_LINE`].
    pub line_number: i64,
    pub is_valid: bool,
    /// Failing column name, or [`NO_COLUMN`].
    pub column: String,
    pub message: String,
}

impl ValidationResult {
    /// A pre-processing error (line `-1`, no column).
    pub fn pre_processing(message: impl Into<String>) -> Self {
        Self {
            line_number: PRE_PROCESSING_LINE,
            is_valid: false,
            column: NO_COLUMN.to_string(),
            message: message.into(),
        }
    }

    /// Confirmation that a row passed evaluation.
    pub fn valid_row(line_number: i64) -> Self {
        Self {
            line_number,
            is_valid: true,
            column: NO_COLUMN.to_string(),
            message: VALID_MESSAGE.to_string(),
        }
    }

    /// A failure on a data row.
    pub fn row_error(
        line_number: i64,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            is_valid: false,
            column: column.into(),
            message: message.into(),
        }
    }

    /// Whether this entry was produced before any row was examined.
    pub fn is_pre_processing(&self) -> bool {
        self.line_number == PRE_PROCESSING_LINE
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            write!(f, "Line {} is valid", self.line_number)
        } else if self.is_pre_processing() {
            write!(f, "Pre-processing error: {}", self.message)
        } else {
            write!(
                f,
                "Error on line: {} with column: {}; {}",
                self.line_number, self.column, self.message
            )
        }
    }
}

/// Final report of a validation run.
///
/// `is_valid` is true iff no result is invalid. Built once by
/// [`ReportBuilder::finish`] and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    is_valid: bool,
    results: Vec<ValidationResult>,
}

impl ValidationResponse {
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    /// Number of invalid entries.
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_valid).count()
    }
}

/// Collects results in pipeline order.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    results: Vec<ValidationResult>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record pre-processing errors (directive or empty-content).
    pub fn pre_processing<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.results
            .extend(messages.into_iter().map(ValidationResult::pre_processing));
        self
    }

    /// Record one row's block of results.
    pub fn push_row(&mut self, block: Vec<ValidationResult>) {
        self.results.extend(block);
    }

    pub fn finish(self) -> ValidationResponse {
        let is_valid = self.results.iter().all(|r| r.is_valid);
        ValidationResponse {
            is_valid,
            results: self.results,
        }
    }
}
