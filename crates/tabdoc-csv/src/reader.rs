//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use tabdoc_core::{DocTable, ExtractionRow, FIXED_COLUMNS};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a documentation CSV file back into a table
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<DocTable> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read a documentation CSV from a reader
    ///
    /// The header must start with the fixed documentation columns; any
    /// further columns become extra attribute columns. Cells equal to
    /// `options.null_value` read as null.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<DocTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for (column, expected) in FIXED_COLUMNS.iter().enumerate() {
            let found = headers.get(column).unwrap_or_default();
            if found != *expected {
                return Err(CsvError::InvalidHeader {
                    column,
                    expected,
                    found: found.to_string(),
                });
            }
        }

        let mut table = DocTable::new(headers.iter().skip(FIXED_COLUMNS.len()));

        for result in csv_reader.records() {
            let record = result?;
            let row = ExtractionRow::from_values(record.iter().map(|cell| {
                if cell == options.null_value {
                    None
                } else {
                    Some(cell.to_string())
                }
            }));
            table.push(row)?;
        }

        Ok(table)
    }
}
