//! # CSV Schema
//!
//! Everything extracted from a schema document once per run: dialect
//! directives, ordered column specs and the compiled validator. All of it
//! is read-only afterwards and can be shared across rows.

use std::fmt;
use std::io::Read;

use jsonschema::Validator;
use serde_json::Value;

use crate::columns::{extract_columns, ColumnSpec};
use crate::dialect::{Dialect, DialectDirectives, DialectError};
use crate::error::CsvSchemaError;
use crate::settings::ValidationSettings;

/// A JSON Schema extended with CSV dialect directives.
pub struct CsvSchema {
    dialect: Result<Dialect, Vec<DialectError>>,
    directives: Option<DialectDirectives>,
    columns: Vec<ColumnSpec>,
    validator: Validator,
}

impl CsvSchema {
    /// Parse schema text with default settings.
    ///
    /// # Errors
    ///
    /// [`CsvSchemaError::SchemaParse`] if the text is not JSON,
    /// [`CsvSchemaError::SchemaCompile`] if it is not a valid JSON Schema.
    /// Directive problems are not errors here; see [`CsvSchema::dialect`].
    pub fn parse(text: &str) -> Result<Self, CsvSchemaError> {
        Self::with_settings(text, &ValidationSettings::default())
    }

    /// Parse schema text with explicit settings.
    pub fn with_settings(
        text: &str,
        settings: &ValidationSettings,
    ) -> Result<Self, CsvSchemaError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(&document, settings)
    }

    /// Read and parse a schema from a byte stream.
    pub fn from_reader<R: Read>(
        mut reader: R,
        settings: &ValidationSettings,
    ) -> Result<Self, CsvSchemaError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::with_settings(&text, settings)
    }

    /// Build from an already-parsed document.
    pub fn from_value(
        document: &Value,
        settings: &ValidationSettings,
    ) -> Result<Self, CsvSchemaError> {
        let mut options = jsonschema::options();
        options.should_validate_formats(settings.validate_formats);
        let validator = options
            .build(document)
            .map_err(|e| CsvSchemaError::SchemaCompile {
                reason: e.to_string(),
            })?;

        let (directives, dialect) = match DialectDirectives::read(document) {
            Ok(directives) => {
                let dialect = directives.resolve();
                (Some(directives), dialect)
            }
            Err(e) => (None, Err(vec![e])),
        };
        let columns = extract_columns(document);

        tracing::debug!(
            columns = columns.len(),
            dialect_ok = dialect.is_ok(),
            "schema loaded"
        );

        Ok(Self {
            dialect,
            directives,
            columns,
            validator,
        })
    }

    /// The resolved dialect, or every directive error.
    pub fn dialect(&self) -> Result<&Dialect, &[DialectError]> {
        self.dialect.as_ref().map_err(Vec::as_slice)
    }

    /// `csvDelimiter`, if present and well-formed.
    pub fn delimiter(&self) -> Option<char> {
        self.directives.as_ref().and_then(DialectDirectives::delimiter)
    }

    /// `csvHasHeader`, if present and well-formed.
    pub fn has_header(&self) -> Option<bool> {
        self.directives.as_ref().and_then(DialectDirectives::has_header)
    }

    /// Column specs in declaration order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub(crate) fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl fmt::Debug for CsvSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvSchema")
            .field("dialect", &self.dialect)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}
