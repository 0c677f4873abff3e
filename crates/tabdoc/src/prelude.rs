//! Prelude module - common imports for tabdoc users
//!
//! ```rust
//! use tabdoc::prelude::*;
//! ```

pub use crate::{
    // Processing
    BatchDashboardProcessor,
    BatchReport,
    // I/O types
    CsvReadOptions,
    CsvReader,
    CsvWriteOptions,
    CsvWriter,

    // Model types
    Datasource,
    DocTable,
    // Error types
    Error,
    ExtractionRow,
    Field,
    FieldAttribute,
    ProcessorOptions,
    Result,

    TwbReader,
    Workbook,
    WorkbookFieldExtractor,
};
