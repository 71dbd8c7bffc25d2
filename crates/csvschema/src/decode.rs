//! # CSV Decoding
//!
//! Tokenizes CSV input under a [`Dialect`] using the `csv` crate. The
//! reader is `flexible`: rows with the wrong number of cells are decoded
//! as-is and rejected later by the coercer, one row at a time.
//!
//! Line numbers are 1-based positions among data rows; the header row,
//! when present, is not counted.

use std::io::Read;

use csv::ReaderBuilder;
use thiserror::Error;

use crate::dialect::Dialect;

/// One decoded data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line_number: i64,
    /// Cells in physical order. `None` marks an absent value.
    pub cells: Vec<Option<String>>,
}

impl RawRow {
    /// Build a row where every cell is present.
    pub fn from_strings<I, S>(line_number: i64, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line_number,
            cells: cells.into_iter().map(|c| Some(c.into())).collect(),
        }
    }
}

/// A data row the tokenizer could not decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Row could not be decoded: {reason}")]
pub struct DecodeFailure {
    pub line_number: i64,
    pub reason: String,
}

/// Decode every data row of `input`.
///
/// Malformed records are returned as [`DecodeFailure`]s in place and
/// decoding continues. An I/O error is recorded once and ends decoding.
/// An empty result means the input held no data rows.
pub fn decode_rows<R: Read>(dialect: &Dialect, input: R) -> Vec<Result<RawRow, DecodeFailure>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(dialect.delimiter_byte())
        .has_headers(dialect.has_header)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let line_number = index as i64 + 1;
        match record {
            Ok(record) => rows.push(Ok(RawRow::from_strings(line_number, record.iter()))),
            Err(e) => {
                let stop = e.is_io_error();
                rows.push(Err(DecodeFailure {
                    line_number,
                    reason: e.to_string(),
                }));
                if stop {
                    tracing::warn!(line_number, error = %e, "csv input read failed");
                    break;
                }
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMA_WITH_HEADER: Dialect = Dialect {
        delimiter: ',',
        has_header: true,
    };

    fn cells(row: &Result<RawRow, DecodeFailure>) -> Vec<&str> {
        row.as_ref()
            .unwrap()
            .cells
            .iter()
            .map(|c| c.as_deref().unwrap())
            .collect()
    }

    #[test]
    fn test_header_is_skipped_and_not_counted() {
        let rows = decode_rows(
            &COMMA_WITH_HEADER,
            "firstName,lastName,age\nJohn,Fish,5\nDavid,Ayres,22".as_bytes(),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].as_ref().unwrap().line_number, 1);
        assert_eq!(cells(&rows[0]), ["John", "Fish", "5"]);
        assert_eq!(rows[1].as_ref().unwrap().line_number, 2);
    }

    #[test]
    fn test_without_header_first_row_is_data() {
        let dialect = Dialect {
            delimiter: ';',
            has_header: false,
        };
        let rows = decode_rows(&dialect, "a;b\nc;d\n".as_bytes());
        assert_eq!(rows.len(), 2);
        assert_eq!(cells(&rows[0]), ["a", "b"]);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let rows = decode_rows(&COMMA_WITH_HEADER, "a,b\n1\n1,2,3\n".as_bytes());
        assert_eq!(cells(&rows[0]), ["1"]);
        assert_eq!(cells(&rows[1]), ["1", "2", "3"]);
    }

    #[test]
    fn test_quoted_delimiter() {
        let rows = decode_rows(&COMMA_WITH_HEADER, "name,note\nx,\"a, b\"\n".as_bytes());
        assert_eq!(cells(&rows[0]), ["x", "a, b"]);
    }

    #[test]
    fn test_empty_and_header_only_inputs() {
        assert!(decode_rows(&COMMA_WITH_HEADER, "".as_bytes()).is_empty());
        assert!(decode_rows(&COMMA_WITH_HEADER, "a,b,c\n".as_bytes()).is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_reported_in_place() {
        let input: &[u8] = b"a,b\n1,2\n\xff,3\n4,5\n";
        let rows = decode_rows(&COMMA_WITH_HEADER, input);
        assert_eq!(rows.len(), 3);
        let failure = rows[1].as_ref().unwrap_err();
        assert_eq!(failure.line_number, 2);
        assert!(failure.to_string().starts_with("Row could not be decoded: "));
        assert_eq!(cells(&rows[2]), ["4", "5"]);
    }
}
