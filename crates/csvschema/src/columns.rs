//! # Column Specs
//!
//! The schema's `properties` map, in declaration order, defines the
//! columns. Each property's `type` keyword drives how cells are coerced.
//! A property with no usable type leaves its cells as strings; the
//! evaluator is left to reject them.

use std::fmt;

use serde_json::Value;

/// Scalar type a column can be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ColumnType {
    fn from_keyword(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// The JSON Schema spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// Declared column type, optionally unioned with `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTag {
    pub base: ColumnType,
    pub nullable: bool,
}

impl TypeTag {
    /// Read a `type` keyword value.
    ///
    /// Accepts a single type name or an array of names. `"null"` entries
    /// set `nullable`; exactly one remaining scalar name is required.
    /// Anything else (objects, arrays, mixed unions) yields `None`.
    pub fn from_type_keyword(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => ColumnType::from_keyword(name).map(|base| Self {
                base,
                nullable: false,
            }),
            Value::Array(names) => {
                let mut nullable = false;
                let mut bases = Vec::with_capacity(names.len());
                for name in names {
                    match name.as_str()? {
                        "null" => nullable = true,
                        other => bases.push(ColumnType::from_keyword(other)?),
                    }
                }
                match bases.as_slice() {
                    [base] => Some(Self {
                        base: *base,
                        nullable,
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}|null", self.base.as_str())
        } else {
            f.write_str(self.base.as_str())
        }
    }
}

/// One column: property name and declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    /// `None` when the property declares no coercible type.
    pub declared_type: Option<TypeTag>,
}

/// Ordered column specs from the schema's `properties`.
///
/// A missing or non-object `properties` yields no columns.
pub fn extract_columns(schema: &Value) -> Vec<ColumnSpec> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, property)| ColumnSpec {
            name: name.clone(),
            declared_type: property.get("type").and_then(TypeTag::from_type_keyword),
        })
        .collect()
}
