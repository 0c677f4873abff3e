//! # tabdoc-core
//!
//! Core document model for the tabdoc workbook documentation tool.
//!
//! This crate provides the types every other tabdoc crate works with:
//! - [`Workbook`] - worksheet names and datasources read from one file
//! - [`Datasource`] - an ordered, id-indexed collection of fields
//! - [`Field`] - a column definition and the worksheets that use it
//! - [`FieldAttribute`] - attributes readable off a field by name
//! - [`DocTable`] - the flattened documentation rows of a workbook
//!
//! ## Example
//!
//! ```rust
//! use tabdoc_core::{Datasource, Field, Workbook};
//!
//! let mut workbook = Workbook::new("reports/Q1.twbx");
//! workbook.add_worksheet("Overview").unwrap();
//! workbook.add_datasource(
//!     Datasource::new("federated.1").with_field(Field::new("[Sales]").with_role("measure")),
//! );
//! workbook.mark_used("federated.1", "[Sales]", "Overview").unwrap();
//!
//! assert_eq!(workbook.dashboard_name(), "Q1");
//! ```

pub mod attribute;
pub mod datasource;
pub mod error;
pub mod field;
pub mod table;
pub mod workbook;

pub use attribute::{read_attribute, FieldAttribute, UnknownAttribute};
pub use datasource::Datasource;
pub use error::{Error, Result};
pub use field::Field;
pub use table::{DocTable, ExtractionRow, FIXED_COLUMNS};
pub use workbook::{dashboard_name, Workbook};

/// File extension of packaged workbooks
pub const PACKAGED_WORKBOOK_EXTENSION: &str = "twbx";

/// File extension of bare workbook documents
pub const WORKBOOK_EXTENSION: &str = "twb";
