//! `.twbx` package handling

use std::io::{BufRead, Read, Seek};

use crate::error::{TwbError, TwbResult};
use tabdoc_core::WORKBOOK_EXTENSION;

/// Local file header signature every zip archive starts with
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Check whether the buffered input starts like a zip archive
///
/// Does not consume any input.
pub fn is_package<R: BufRead>(reader: &mut R) -> TwbResult<bool> {
    let head = reader.fill_buf()?;
    Ok(head.starts_with(ZIP_MAGIC))
}

/// Index of the workbook document inside a package
///
/// The first entry whose name ends in `.twb` wins, wherever it sits in the
/// archive.
pub fn find_document<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> TwbResult<usize> {
    let suffix = format!(".{WORKBOOK_EXTENSION}");
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if !entry.is_dir() && entry.name().to_ascii_lowercase().ends_with(&suffix) {
            return Ok(index);
        }
    }
    Err(TwbError::MissingDocument)
}
