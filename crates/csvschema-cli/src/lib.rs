//! # csvschema-cli — Command-Line Interface
//!
//! Thin front end over the `csvschema` library. Argument parsing and
//! report rendering live here; all validation logic lives in the library.
//!
//! ## Subcommands
//!
//! - `csvschema validate --schema S --csv C` — validate a CSV file and print
//!   or persist the report.
//! - `csvschema inspect --schema S` — show the dialect and column specs a
//!   schema declares.
//!
//! ## Exit Codes
//!
//! `0` valid, `1` invalid report, `2` operational error (unreadable file,
//! schema that cannot be parsed).

pub mod config;
pub mod inspect;
pub mod output;
pub mod validate;

use std::path::Path;

/// File name component of a path, for display.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
