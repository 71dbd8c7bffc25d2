//! # csvschema — Schema-Driven CSV Validation
//!
//! Validates delimiter-separated tabular data against a JSON Schema that
//! carries two extra root-level directives describing the CSV dialect:
//!
//! ```json
//! {
//!   "type": "object",
//!   "csvDelimiter": ",",
//!   "csvHasHeader": "true",
//!   "properties": {
//!     "firstName": { "type": "string" },
//!     "age": { "type": "integer", "minimum": 0 }
//!   }
//! }
//! ```
//!
//! Every data row is paired positionally with the schema's `properties`
//! (in declaration order), coerced to typed JSON values, and evaluated
//! against the full schema. The outcome is a [`ValidationResponse`] with
//! one or more [`ValidationResult`] entries per row.
//!
//! ## Pipeline
//!
//! 1. [`dialect`] — reads `csvDelimiter` / `csvHasHeader`, collecting every
//!    directive error.
//! 2. [`columns`] — ordered column specs from `properties`.
//! 3. [`decode`] — tokenizes the CSV under the dialect.
//! 4. [`coerce`] — best-effort typed conversion of each cell.
//! 5. [`evaluate`] — submits the coerced row to the JSON Schema evaluator.
//! 6. [`report`] — ordered, line-numbered aggregation.
//!
//! ## Error Model
//!
//! A schema that cannot be parsed or compiled is a fatal
//! [`CsvSchemaError`]. Everything else (directive problems, empty input,
//! row shape, constraint failures) is collected into the report.

pub mod coerce;
pub mod columns;
pub mod decode;
pub mod dialect;
pub mod error;
pub mod evaluate;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod settings;

pub use coerce::{coerce_row, parse_bool_literal, CoercedRow, ColumnCountMismatch};
pub use columns::{ColumnSpec, ColumnType, TypeTag};
pub use decode::{decode_rows, DecodeFailure, RawRow};
pub use dialect::{Dialect, DialectError};
pub use error::CsvSchemaError;
pub use evaluate::Violation;
pub use pipeline::{validate_csv, validate_csv_stream};
pub use report::{ValidationResponse, ValidationResult, NO_COLUMN, PRE_PROCESSING_LINE};
pub use schema::CsvSchema;
pub use settings::ValidationSettings;
