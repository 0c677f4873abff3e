//! # tabdoc
//!
//! Document the fields of Tableau workbooks as CSV tables.
//!
//! For every worksheet of a workbook, tabdoc lists the fields it uses along
//! with their calculation, datatype, role and aggregation, and writes the
//! result to `<workbook>_docs.csv`.
//!
//! ## Features
//!
//! - Read `.twb` documents and `.twbx` packages
//! - Document a single workbook or every `.twbx` in a directory
//! - Add any field attribute as an extra column
//! - Combine the tables of a whole directory into one
//!
//! ## Example
//!
//! ```rust,no_run
//! use tabdoc::prelude::*;
//!
//! let processor = BatchDashboardProcessor::new("dashboards", None, false)?;
//! let extras = vec!["description".to_string()];
//!
//! if let Some(table) = processor.process(&extras, true)? {
//!     println!("{} rows documented", table.len());
//! }
//! # Ok::<(), tabdoc::Error>(())
//! ```

pub mod batch;
pub mod error;
pub mod extract;
pub mod prelude;

pub use batch::{
    discover_workbooks, resolve_output_dir, BatchDashboardProcessor, BatchReport,
    FailedWorkbook, ProcessedWorkbook, ProcessorOptions, OUTPUT_SUFFIX,
};
pub use error::{Error, Result};
pub use extract::{extract_workbook, TwbOpener, WorkbookFieldExtractor, WorkbookOpener};

// Re-export core types
pub use tabdoc_core::{
    dashboard_name, Datasource, DocTable, ExtractionRow, Field, FieldAttribute, Workbook,
    FIXED_COLUMNS,
};

// Re-export I/O types
pub use tabdoc_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator};
pub use tabdoc_twb::{TwbError, TwbReader};
