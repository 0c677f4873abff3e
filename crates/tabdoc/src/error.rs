//! Error types for tabdoc

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while documenting workbooks
#[derive(Debug, Error)]
pub enum Error {
    /// Workbook could not be opened or read
    #[error("{0}")]
    Read(#[from] tabdoc_twb::TwbError),

    /// Documentation table could not be written
    #[error("{0}")]
    Csv(#[from] tabdoc_csv::CsvError),

    /// Document model error
    #[error("{0}")]
    Core(#[from] tabdoc_core::Error),

    /// IO error outside workbook reading (directory listing, output directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input path does not exist
    #[error("Input path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Concatenation requested but no workbook was documented
    #[error("No workbook was documented successfully; nothing to concatenate")]
    EmptyAggregation,
}
