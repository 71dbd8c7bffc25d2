//! Validation settings.
//!
//! Deserializable so that callers can load them from a config file; every
//! field has a default.

use serde::{Deserialize, Serialize};

/// Knobs applied when compiling the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationSettings {
    /// Assert the `format` keyword (`email`, `date`, ...) instead of
    /// treating it as an annotation.
    pub validate_formats: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            validate_formats: true,
        }
    }
}
