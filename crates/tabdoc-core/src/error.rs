//! Error types for tabdoc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the document model
#[derive(Debug, Error)]
pub enum Error {
    /// Datasource not found by name
    #[error("Datasource not found: {0}")]
    UnknownDatasource(String),

    /// Worksheet name already present in the workbook
    #[error("Worksheet name already exists: {0}")]
    DuplicateWorksheet(String),

    /// Row or table with a different column set
    #[error("Column count mismatch: expected {expected}, got {actual}")]
    ColumnMismatch { expected: usize, actual: usize },

    /// Concatenation over no tables at all
    #[error("No tables to concatenate")]
    EmptyAggregation,
}
