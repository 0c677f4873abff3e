//! Workbook type - the main document structure

use std::path::{Path, PathBuf};

use crate::datasource::Datasource;
use crate::error::{Error, Result};

/// A Tableau workbook
///
/// Holds the worksheet names and datasources read from one `.twb`/`.twbx`
/// file. Worksheets are plain names; field usage is recorded on the fields
/// themselves.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Workbook {
    filename: PathBuf,
    worksheets: Vec<String>,
    datasources: Vec<Datasource>,
}

impl Workbook {
    /// Create an empty workbook for the given file
    pub fn new<P: Into<PathBuf>>(filename: P) -> Self {
        Self {
            filename: filename.into(),
            worksheets: Vec::new(),
            datasources: Vec::new(),
        }
    }

    /// Path the workbook was read from
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// File name with directory and extension stripped
    ///
    /// `reports/Q1.twbx` becomes `Q1`.
    pub fn dashboard_name(&self) -> String {
        dashboard_name(&self.filename)
    }

    /// Iterate over worksheet names in document order
    pub fn worksheets(&self) -> impl Iterator<Item = &str> {
        self.worksheets.iter().map(String::as_str)
    }

    /// Number of worksheets
    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Add a worksheet name
    pub fn add_worksheet<S: Into<String>>(&mut self, name: S) -> Result<usize> {
        let name = name.into();
        if self.worksheets.contains(&name) {
            return Err(Error::DuplicateWorksheet(name));
        }
        self.worksheets.push(name);
        Ok(self.worksheets.len() - 1)
    }

    /// Iterate over datasources in document order
    pub fn datasources(&self) -> impl Iterator<Item = &Datasource> {
        self.datasources.iter()
    }

    /// Number of datasources
    pub fn datasource_count(&self) -> usize {
        self.datasources.len()
    }

    /// Add a datasource
    pub fn add_datasource(&mut self, datasource: Datasource) -> usize {
        self.datasources.push(datasource);
        self.datasources.len() - 1
    }

    /// Get a datasource by internal name
    pub fn datasource(&self, name: &str) -> Option<&Datasource> {
        self.datasources.iter().find(|ds| ds.name == name)
    }

    /// Get a mutable datasource by internal name
    pub fn datasource_mut(&mut self, name: &str) -> Option<&mut Datasource> {
        self.datasources.iter_mut().find(|ds| ds.name == name)
    }

    /// Record that `worksheet` depends on column `field_id` of `datasource`
    ///
    /// Columns the datasource does not declare are ignored. An undeclared
    /// datasource is an error.
    pub fn mark_used(&mut self, datasource: &str, field_id: &str, worksheet: &str) -> Result<()> {
        let ds = self
            .datasource_mut(datasource)
            .ok_or_else(|| Error::UnknownDatasource(datasource.to_string()))?;

        if let Some(field) = ds.field_mut(field_id) {
            field.add_used_in(worksheet);
        }
        Ok(())
    }
}

/// File name of `path` with directory and extension stripped
pub fn dashboard_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    #[test]
    fn test_dashboard_name_strips_dir_and_extension() {
        let wb = Workbook::new("reports/Q1.twbx");
        assert_eq!(wb.dashboard_name(), "Q1");

        assert_eq!(dashboard_name(Path::new("Sales.Summary.twb")), "Sales.Summary");
        assert_eq!(dashboard_name(Path::new("noext")), "noext");
    }

    #[test]
    fn test_duplicate_worksheet_rejected() {
        let mut wb = Workbook::new("a.twb");
        wb.add_worksheet("Overview").unwrap();
        assert!(matches!(
            wb.add_worksheet("Overview"),
            Err(Error::DuplicateWorksheet(_))
        ));
    }

    #[test]
    fn test_mark_used() {
        let mut wb = Workbook::new("a.twb");
        wb.add_worksheet("Overview").unwrap();
        wb.add_datasource(Datasource::new("federated.1").with_field(Field::new("[Sales]")));

        wb.mark_used("federated.1", "[Sales]", "Overview").unwrap();
        wb.mark_used("federated.1", "[Unknown]", "Overview").unwrap();

        let ds = wb.datasource("federated.1").unwrap();
        assert!(ds.field("[Sales]").unwrap().is_used_in("Overview"));
        assert_eq!(ds.field_count(), 1);

        assert!(matches!(
            wb.mark_used("federated.2", "[Sales]", "Overview"),
            Err(Error::UnknownDatasource(_))
        ));
    }
}
