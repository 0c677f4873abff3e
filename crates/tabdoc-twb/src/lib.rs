//! # tabdoc-twb
//!
//! Read-only reader for Tableau workbooks (`.twb` documents and `.twbx`
//! packages) into the tabdoc document model.
//!
//! Only the parts of the document needed for field documentation are read:
//! worksheet names, datasource columns, connection metadata records and the
//! columns each worksheet depends on.

pub mod error;
pub mod package;
pub mod reader;

pub use error::{TwbError, TwbResult};
pub use reader::TwbReader;
