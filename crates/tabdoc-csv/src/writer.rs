//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use tabdoc_core::DocTable;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a table to a CSV file, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(
        table: &DocTable,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(table, file, options)
    }

    /// Write a table to a writer
    ///
    /// One record per row, no index column. Null cells are written as
    /// `options.null_value`.
    pub fn write<W: Write>(table: &DocTable, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(table.columns())?;
        }

        for row in table.rows() {
            let record = row
                .values()
                .map(|value| value.unwrap_or(options.null_value.as_str()));
            csv_writer.write_record(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render a table as a CSV string
    pub fn to_string(table: &DocTable, options: &CsvWriteOptions) -> CsvResult<String> {
        let mut buf = Vec::new();
        Self::write(table, &mut buf, options)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
