//! # Row Evaluation
//!
//! Submits a coerced row, as a JSON object keyed by column name, to the
//! compiled JSON Schema validator and flattens every reported error into
//! report entries for that row.
//!
//! The `jsonschema` crate ignores the `csvDelimiter` / `csvHasHeader`
//! keywords, so the whole schema document is used as-is.

use jsonschema::Validator;
use serde_json::Value;

use crate::coerce::CoercedRow;
use crate::report::{ValidationResult, NO_COLUMN};

/// A single evaluator failure for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the row document.
    pub instance_path: String,
    /// Evaluator diagnostic, verbatim.
    pub message: String,
}

impl Violation {
    /// Column the violation belongs to: the first segment of the instance
    /// path, or `-` for failures at the row level (e.g. `required`).
    pub fn column(&self) -> String {
        self.instance_path
            .strip_prefix('/')
            .and_then(|path| path.split('/').next())
            .filter(|segment| !segment.is_empty())
            .map(unescape_pointer_segment)
            .unwrap_or_else(|| NO_COLUMN.to_string())
    }
}

/// Every violation the validator reports for `document`.
pub fn collect_violations(validator: &Validator, document: &Value) -> Vec<Violation> {
    validator
        .iter_errors(document)
        .map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect()
}

/// Evaluate one coerced row.
///
/// A valid row yields a single `Valid` entry; an invalid row yields one
/// entry per violation, all carrying `line_number`.
pub fn evaluate_row(
    validator: &Validator,
    line_number: i64,
    row: CoercedRow,
) -> Vec<ValidationResult> {
    let document = row.into_document();
    let violations = collect_violations(validator, &document);

    if violations.is_empty() {
        return vec![ValidationResult::valid_row(line_number)];
    }

    tracing::trace!(
        line_number,
        count = violations.len(),
        "row failed evaluation"
    );
    violations
        .into_iter()
        .map(|v| ValidationResult::row_error(line_number, v.column(), v.message))
        .collect()
}

fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce_row;
    use crate::columns::extract_columns;
    use crate::decode::RawRow;
    use serde_json::json;

    fn person_schema() -> Value {
        json!({
            "type": "object",
            "csvDelimiter": ",",
            "csvHasHeader": "true",
            "required": ["firstName", "lastName", "age"],
            "properties": {
                "firstName": { "type": "string" },
                "lastName": { "type": "string" },
                "age": { "type": "integer", "minimum": 0 }
            }
        })
    }

    fn evaluate(schema: &Value, cells: &[&str]) -> Vec<ValidationResult> {
        let validator = jsonschema::validator_for(schema).unwrap();
        let columns = extract_columns(schema);
        let raw = RawRow::from_strings(4, cells.iter().copied());
        let row = coerce_row(&raw, &columns).unwrap();
        evaluate_row(&validator, 4, row)
    }

    #[test]
    fn test_valid_row() {
        let results = evaluate(&person_schema(), &["John", "Fish", "5"]);
        assert_eq!(results, vec![ValidationResult::valid_row(4)]);
    }

    #[test]
    fn test_type_mismatch_names_column() {
        let results = evaluate(&person_schema(), &["John", "Fish", "ERROR"]);
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_valid);
        assert_eq!(results[0].line_number, 4);
        assert_eq!(results[0].column, "age");
        assert!(
            results[0].message.contains("integer"),
            "unexpected message: {}",
            results[0].message
        );
    }

    #[test]
    fn test_multiple_failures_on_one_row() {
        let results = evaluate(&person_schema(), &["John", "Fish", "-3"]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].column, "age");

        let schema = json!({
            "properties": {
                "a": { "type": "integer" },
                "b": { "type": "boolean" }
            }
        });
        let results = evaluate(&schema, &["x", "y"]);
        let columns: Vec<&str> = results.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(columns, ["a", "b"]);
        assert!(results.iter().all(|r| !r.is_valid && r.line_number == 4));
    }

    #[test]
    fn test_format_assertion() {
        let schema = json!({
            "properties": { "email": { "type": "string", "format": "email" } }
        });
        let mut options = jsonschema::options();
        options.should_validate_formats(true);
        let validator = options.build(&schema).unwrap();
        let row = coerce_row(
            &RawRow::from_strings(1, ["not-an-email"]),
            &extract_columns(&schema),
        )
        .unwrap();
        let results = evaluate_row(&validator, 1, row);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].column, "email");
    }

    #[test]
    fn test_root_level_failure_has_no_column() {
        let v = Violation {
            instance_path: String::new(),
            message: r#""kind" is a required property"#.to_string(),
        };
        assert_eq!(v.column(), "-");
    }

    #[test]
    fn test_column_from_escaped_pointer() {
        let v = Violation {
            instance_path: "/unit~1price".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(v.column(), "unit/price");
    }
}
