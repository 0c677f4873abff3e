//! Field extraction - flatten one workbook into documentation rows

use std::path::Path;

use crate::error::Result;
use tabdoc_core::{DocTable, ExtractionRow, Field, FieldAttribute, Workbook};
use tabdoc_twb::TwbReader;

/// Opens a workbook file into the document model
///
/// Any `Fn(&Path) -> Result<Workbook>` is an opener, which lets tests and
/// embedders substitute their own source of workbooks.
pub trait WorkbookOpener {
    /// Open the workbook at `path`
    fn open(&self, path: &Path) -> Result<Workbook>;
}

impl<F> WorkbookOpener for F
where
    F: Fn(&Path) -> Result<Workbook>,
{
    fn open(&self, path: &Path) -> Result<Workbook> {
        self(path)
    }
}

/// Opener backed by [`TwbReader`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TwbOpener;

impl WorkbookOpener for TwbOpener {
    fn open(&self, path: &Path) -> Result<Workbook> {
        Ok(TwbReader::read_file(path)?)
    }
}

/// Produces the documentation table of a single workbook
#[derive(Debug, Clone, Default)]
pub struct WorkbookFieldExtractor<O = TwbOpener> {
    opener: O,
}

impl WorkbookFieldExtractor {
    /// Extractor reading `.twb`/`.twbx` files from disk
    pub fn new() -> Self {
        Self { opener: TwbOpener }
    }
}

impl<O: WorkbookOpener> WorkbookFieldExtractor<O> {
    /// Extractor using a custom opener
    pub fn with_opener(opener: O) -> Self {
        Self { opener }
    }

    /// Open the workbook at `path` and flatten it
    ///
    /// Errors from opening the workbook are returned unchanged.
    pub fn extract<P: AsRef<Path>>(&self, path: P, extra_attributes: &[String]) -> Result<DocTable> {
        let workbook = self.opener.open(path.as_ref())?;
        extract_workbook(&workbook, extra_attributes)
    }
}

/// Flatten an opened workbook into one row per (worksheet, field) pair
///
/// Rows come out worksheet by worksheet, then datasource by datasource, then
/// field by field, for every field the worksheet uses. A field reachable
/// through two datasources yields two rows. Each name in `extra_attributes`
/// adds a column read through [`FieldAttribute`]; unknown names and absent
/// values are null.
pub fn extract_workbook(workbook: &Workbook, extra_attributes: &[String]) -> Result<DocTable> {
    log::info!("Analyzing workbook: {}", workbook.filename().display());

    let attributes: Vec<Option<FieldAttribute>> = extra_attributes
        .iter()
        .map(|name| name.parse().ok())
        .collect();
    let dashboard_name = workbook.dashboard_name();
    let mut table = DocTable::new(extra_attributes.iter().cloned());

    for worksheet in workbook.worksheets() {
        for datasource in workbook.datasources() {
            for field in datasource.fields().filter(|f| f.is_used_in(worksheet)) {
                table.push(row(&dashboard_name, worksheet, field, &attributes))?;
            }
        }
    }

    Ok(table)
}

fn row(
    dashboard_name: &str,
    worksheet: &str,
    field: &Field,
    attributes: &[Option<FieldAttribute>],
) -> ExtractionRow {
    ExtractionRow {
        dashboard_name: dashboard_name.to_string(),
        worksheet_name: worksheet.to_string(),
        field_name: field.name().to_string(),
        field_calculation: field.calculation.clone(),
        field_type: field.datatype.clone(),
        field_role: field.role.clone(),
        field_aggregation: field.aggregation.clone(),
        extras: attributes
            .iter()
            .map(|attr| attr.and_then(|a| a.read(field)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use tabdoc_core::Datasource;

    fn workbook() -> Workbook {
        let mut wb = Workbook::new("reports/Q1.twbx");
        wb.add_worksheet("Overview").unwrap();
        wb.add_worksheet("Detail").unwrap();
        wb.add_worksheet("Unused").unwrap();

        wb.add_datasource(
            Datasource::new("federated.1")
                .with_field(
                    Field::new("[Sales]")
                        .with_caption("Revenue")
                        .with_datatype("real")
                        .with_role("measure")
                        .with_aggregation("Sum")
                        .with_worksheet("Overview")
                        .with_worksheet("Detail"),
                )
                .with_field(
                    Field::new("[Calculation_1]")
                        .with_caption("Margin")
                        .with_calculation("SUM([Profit])/SUM([Sales])")
                        .with_worksheet("Detail"),
                )
                .with_field(Field::new("[Orphan]")),
        );
        wb.add_datasource(
            Datasource::new("federated.2").with_field(
                Field::new("[Sales]")
                    .with_description("Sales from the second source")
                    .with_worksheet("Overview"),
            ),
        );
        wb
    }

    fn pairs(table: &DocTable) -> Vec<(&str, &str)> {
        table
            .rows()
            .iter()
            .map(|r| (r.worksheet_name.as_str(), r.field_name.as_str()))
            .collect()
    }

    #[test]
    fn test_rows_follow_worksheet_then_datasource_order() {
        let table = extract_workbook(&workbook(), &[]).unwrap();
        assert_eq!(
            pairs(&table),
            vec![
                ("Overview", "Revenue"),
                ("Overview", "[Sales]"),
                ("Detail", "Revenue"),
                ("Detail", "Margin"),
            ]
        );
    }

    #[test]
    fn test_row_count_counts_every_datasource() {
        let wb = workbook();
        let expected: usize = wb
            .worksheets()
            .map(|sheet| {
                wb.datasources()
                    .flat_map(|ds| ds.fields())
                    .filter(|f| f.is_used_in(sheet))
                    .count()
            })
            .sum();

        let table = extract_workbook(&wb, &[]).unwrap();
        assert_eq!(table.len(), expected);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_fixed_columns() {
        let table = extract_workbook(&workbook(), &[]).unwrap();
        let margin = &table.rows()[3];

        assert_eq!(margin.dashboard_name, "Q1");
        assert_eq!(margin.field_calculation.as_deref(), Some("SUM([Profit])/SUM([Sales])"));
        assert_eq!(margin.field_type, None);

        let revenue = &table.rows()[0];
        assert_eq!(revenue.field_type.as_deref(), Some("real"));
        assert_eq!(revenue.field_role.as_deref(), Some("measure"));
        assert_eq!(revenue.field_aggregation.as_deref(), Some("Sum"));
        assert!(table.rows().iter().all(|r| r.dashboard_name == "Q1"));
    }

    #[test]
    fn test_extra_attributes_default_to_null() {
        let extras = vec!["description".to_string(), "no_such_attribute".to_string()];
        let table = extract_workbook(&workbook(), &extras).unwrap();

        assert_eq!(table.extra_columns(), extras.as_slice());
        assert_eq!(table.rows()[0].extras, vec![None, None]);
        assert_eq!(
            table.rows()[1].extras,
            vec![Some("Sales from the second source".to_string()), None]
        );
    }

    #[test]
    fn test_workbook_without_worksheets() {
        let mut wb = Workbook::new("empty.twbx");
        wb.add_datasource(Datasource::new("federated.1").with_field(Field::new("[A]")));

        let table = extract_workbook(&wb, &[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 7);
    }

    #[test]
    fn test_custom_opener() {
        let extractor =
            WorkbookFieldExtractor::with_opener(|_: &Path| -> Result<Workbook> { Ok(workbook()) });
        let table = extractor.extract("ignored.twbx", &[]).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_opener_failure_propagates() {
        let extractor = WorkbookFieldExtractor::with_opener(|path: &Path| -> Result<Workbook> {
            Err(Error::NotFound(path.to_path_buf()))
        });
        assert!(matches!(
            extractor.extract("missing.twbx", &[]),
            Err(Error::NotFound(_))
        ));
    }
}
