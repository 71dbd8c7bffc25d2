//! # Fatal Errors
//!
//! Only problems with the schema document itself are fatal. They surface
//! as `Err(CsvSchemaError)` and are never converted into report entries;
//! every other problem is collected into the [`ValidationResponse`].
//!
//! [`ValidationResponse`]: crate::report::ValidationResponse

use thiserror::Error;

/// Error that aborts a validation run before any report is produced.
#[derive(Error, Debug)]
pub enum CsvSchemaError {
    /// The schema text is not valid JSON.
    #[error("schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),

    /// The schema is valid JSON but the evaluator rejected it as a schema.
    #[error("schema compile error: {reason}")]
    SchemaCompile {
        /// Evaluator diagnostic.
        reason: String,
    },

    /// The schema stream could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
