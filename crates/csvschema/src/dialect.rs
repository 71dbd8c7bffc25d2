//! # CSV Dialect Directives
//!
//! Two root-level schema keywords describe how the CSV is laid out:
//!
//! - `csvDelimiter` — a single character separating cells.
//! - `csvHasHeader` — `"true"` or `"false"`; whether the first physical
//!   row is a header.
//!
//! Both are mandatory. Each directive is read independently so that a
//! schema missing both reports both. Any directive error is terminal for
//! the run: no CSV is read.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::coerce::parse_bool_literal;

/// Keyword naming the cell delimiter.
pub const DELIMITER_KEYWORD: &str = "csvDelimiter";
/// Keyword naming the header-presence flag.
pub const HAS_HEADER_KEYWORD: &str = "csvHasHeader";

/// Resolved CSV dialect. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Cell delimiter. Always ASCII.
    pub delimiter: char,
    /// Whether the first physical row is a header.
    pub has_header: bool,
}

impl Dialect {
    /// Delimiter as the single byte the tokenizer expects.
    pub fn delimiter_byte(&self) -> u8 {
        // ASCII is guaranteed by `read_delimiter`.
        self.delimiter as u8
    }
}

/// A missing or malformed dialect directive.
///
/// The `Display` text is what appears in the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialectError {
    /// The schema root is not an object, so it has no keywords at all.
    #[error("Schema keywords are null, there could be an issue with your file, please check")]
    NoKeywords,

    #[error("Schema does not include: csvDelimiter which is mandatory")]
    MissingDelimiter,

    #[error("csvDelimiter must have a value")]
    EmptyDelimiter,

    #[error("csvDelimiter can only be a single character")]
    DelimiterTooLong,

    #[error("csvDelimiter must be an ASCII character")]
    DelimiterNotAscii,

    #[error("Schema does not include: csvHasHeader which is mandatory")]
    MissingHeaderFlag,

    #[error("csvHasHeader must have a value")]
    EmptyHeaderFlag,

    #[error("csvHasHeader must be true or false")]
    HeaderFlagNotBoolean,
}

/// Both directives as read from the schema, each with its own outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectDirectives {
    delimiter: Result<char, DialectError>,
    has_header: Result<bool, DialectError>,
}

impl DialectDirectives {
    /// Read both directives from the schema root.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::NoKeywords`] when the root is not a JSON
    /// object (e.g. the boolean schema `true`).
    pub fn read(schema: &Value) -> Result<Self, DialectError> {
        let root = schema.as_object().ok_or(DialectError::NoKeywords)?;
        Ok(Self {
            delimiter: read_delimiter(root),
            has_header: read_has_header(root),
        })
    }

    /// The delimiter, if the directive is present and well-formed.
    pub fn delimiter(&self) -> Option<char> {
        self.delimiter.as_ref().ok().copied()
    }

    /// The header flag, if the directive is present and well-formed.
    pub fn has_header(&self) -> Option<bool> {
        self.has_header.as_ref().ok().copied()
    }

    /// Combine both directives into a [`Dialect`].
    ///
    /// # Errors
    ///
    /// Every directive error, delimiter first.
    pub fn resolve(&self) -> Result<Dialect, Vec<DialectError>> {
        match (&self.delimiter, &self.has_header) {
            (Ok(delimiter), Ok(has_header)) => Ok(Dialect {
                delimiter: *delimiter,
                has_header: *has_header,
            }),
            (delimiter, has_header) => Err(delimiter
                .as_ref()
                .err()
                .into_iter()
                .chain(has_header.as_ref().err())
                .cloned()
                .collect()),
        }
    }
}

/// Extract the dialect from a parsed schema, collecting every directive error.
pub fn extract_dialect(schema: &Value) -> Result<Dialect, Vec<DialectError>> {
    DialectDirectives::read(schema)
        .map_err(|e| vec![e])?
        .resolve()
}

fn read_delimiter(root: &Map<String, Value>) -> Result<char, DialectError> {
    let value = root
        .get(DELIMITER_KEYWORD)
        .ok_or(DialectError::MissingDelimiter)?;
    let text = directive_text(value).ok_or(DialectError::EmptyDelimiter)?;

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(DialectError::EmptyDelimiter),
        (Some(_), Some(_)) => Err(DialectError::DelimiterTooLong),
        (Some(c), None) if !c.is_ascii() => Err(DialectError::DelimiterNotAscii),
        (Some(c), None) => Ok(c),
    }
}

fn read_has_header(root: &Map<String, Value>) -> Result<bool, DialectError> {
    let value = root
        .get(HAS_HEADER_KEYWORD)
        .ok_or(DialectError::MissingHeaderFlag)?;
    let text = directive_text(value).ok_or(DialectError::EmptyHeaderFlag)?;
    if text.is_empty() {
        return Err(DialectError::EmptyHeaderFlag);
    }
    parse_bool_literal(&text).ok_or(DialectError::HeaderFlagNotBoolean)
}

/// Directive value as text. `null` has no text; non-string values are
/// read through their JSON rendering.
fn directive_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
