//! # Row Coercion
//!
//! Pairs a [`RawRow`]'s cells positionally with the column specs and turns
//! each cell into a typed JSON value.
//!
//! Coercion is best-effort: a cell that does not parse as its declared
//! type is passed through as the original string. The evaluator then
//! reports the type mismatch, so every type diagnostic comes from one
//! place.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::columns::{ColumnSpec, ColumnType};
use crate::decode::RawRow;

/// A row's cell count differs from the number of declared columns.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Expected columns - {expected} but provided columns - {provided}")]
pub struct ColumnCountMismatch {
    pub expected: usize,
    pub provided: usize,
}

/// A coerced row: column name to typed value, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedRow {
    values: Map<String, Value>,
}

impl CoercedRow {
    /// Value for a column, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// The row as the JSON object submitted to the evaluator.
    pub fn into_document(self) -> Value {
        Value::Object(self.values)
    }
}

/// Coerce one row against the column specs.
///
/// # Errors
///
/// Returns [`ColumnCountMismatch`] without coercing anything when the
/// cell count differs from the column count.
pub fn coerce_row(row: &RawRow, columns: &[ColumnSpec]) -> Result<CoercedRow, ColumnCountMismatch> {
    if row.cells.len() != columns.len() {
        return Err(ColumnCountMismatch {
            expected: columns.len(),
            provided: row.cells.len(),
        });
    }

    let values = columns
        .iter()
        .zip(&row.cells)
        .map(|(column, cell)| (column.name.clone(), coerce_cell(column, cell.as_deref())))
        .collect();

    Ok(CoercedRow { values })
}

fn coerce_cell(column: &ColumnSpec, cell: Option<&str>) -> Value {
    let Some(raw) = cell else {
        return Value::Null;
    };

    let parsed = match column.declared_type.map(|t| t.base) {
        Some(ColumnType::Integer) => raw.trim().parse::<i64>().ok().map(Value::from),
        Some(ColumnType::Number) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        Some(ColumnType::Boolean) => parse_bool_literal(raw).map(Value::Bool),
        Some(ColumnType::String) | None => None,
    };

    parsed.unwrap_or_else(|| Value::String(raw.to_owned()))
}

/// Parse a boolean literal: `true` or `false`, ASCII case-insensitive,
/// surrounding whitespace ignored.
pub fn parse_bool_literal(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
