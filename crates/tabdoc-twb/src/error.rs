//! TWB/TWBX error types

use thiserror::Error;

/// Result type for workbook reading
pub type TwbResult<T> = std::result::Result<T, TwbError>;

/// Errors that can occur while reading a workbook
#[derive(Debug, Error)]
pub enum TwbError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Packaged workbook without a `.twb` document inside
    #[error("No .twb document found in package")]
    MissingDocument,

    /// Invalid file format
    #[error("Invalid workbook format: {0}")]
    InvalidFormat(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] tabdoc_core::Error),
}
