//! Documentation table - the flattened (worksheet, field) rows of a workbook

use crate::error::{Error, Result};

/// Header of the columns every table carries, in output order
pub const FIXED_COLUMNS: [&str; 7] = [
    "Dashboard Name",
    "Worksheet Name",
    "Field Name",
    "Field Calculation",
    "Field Type",
    "Field Role",
    "Field Aggregation",
];

/// One (worksheet, field) association
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionRow {
    pub dashboard_name: String,
    pub worksheet_name: String,
    pub field_name: String,
    pub field_calculation: Option<String>,
    pub field_type: Option<String>,
    pub field_role: Option<String>,
    pub field_aggregation: Option<String>,
    /// Values of the extra attribute columns, in table column order
    pub extras: Vec<Option<String>>,
}

impl ExtractionRow {
    /// Cell values in column order; `None` is a null cell
    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        [
            Some(self.dashboard_name.as_str()),
            Some(self.worksheet_name.as_str()),
            Some(self.field_name.as_str()),
            self.field_calculation.as_deref(),
            self.field_type.as_deref(),
            self.field_role.as_deref(),
            self.field_aggregation.as_deref(),
        ]
        .into_iter()
        .chain(self.extras.iter().map(Option::as_deref))
    }

    /// Build a row from cell values in column order
    ///
    /// Null cells in the first three columns become empty strings.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut values = values.into_iter();
        let mut next = || values.next().flatten();

        let mut row = ExtractionRow {
            dashboard_name: next().unwrap_or_default(),
            worksheet_name: next().unwrap_or_default(),
            field_name: next().unwrap_or_default(),
            field_calculation: next(),
            field_type: next(),
            field_role: next(),
            field_aggregation: next(),
            extras: Vec::new(),
        };
        row.extras = values.collect();
        row
    }
}

/// A table of extraction rows sharing one column set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocTable {
    extra_columns: Vec<String>,
    rows: Vec<ExtractionRow>,
}

impl DocTable {
    /// Create an empty table with the given extra attribute columns
    pub fn new<I, S>(extra_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra_columns: extra_columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Names of the extra attribute columns
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Full header: fixed columns followed by extra columns
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        FIXED_COLUMNS
            .iter()
            .copied()
            .chain(self.extra_columns.iter().map(String::as_str))
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        FIXED_COLUMNS.len() + self.extra_columns.len()
    }

    /// Append a row
    ///
    /// Fails if the row does not carry exactly one value per extra column.
    pub fn push(&mut self, row: ExtractionRow) -> Result<()> {
        if row.extras.len() != self.extra_columns.len() {
            return Err(Error::ColumnMismatch {
                expected: self.column_count(),
                actual: FIXED_COLUMNS.len() + row.extras.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[ExtractionRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stack tables in order into one
    ///
    /// All tables must share the same extra columns. Concatenating nothing
    /// is an error, not an empty table.
    pub fn concat<I>(tables: I) -> Result<DocTable>
    where
        I: IntoIterator<Item = DocTable>,
    {
        let mut tables = tables.into_iter();
        let mut combined = tables.next().ok_or(Error::EmptyAggregation)?;

        for table in tables {
            if table.extra_columns != combined.extra_columns {
                return Err(Error::ColumnMismatch {
                    expected: combined.column_count(),
                    actual: table.column_count(),
                });
            }
            combined.rows.extend(table.rows);
        }

        Ok(combined)
    }
}

impl IntoIterator for DocTable {
    type Item = ExtractionRow;
    type IntoIter = std::vec::IntoIter<ExtractionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(sheet: &str, field: &str, extras: Vec<Option<String>>) -> ExtractionRow {
        ExtractionRow {
            dashboard_name: "Q1".into(),
            worksheet_name: sheet.into(),
            field_name: field.into(),
            extras,
            ..Default::default()
        }
    }

    #[test]
    fn test_columns() {
        let table = DocTable::new(["description"]);
        let columns: Vec<_> = table.columns().collect();
        assert_eq!(columns.len(), 8);
        assert_eq!(columns[0], "Dashboard Name");
        assert_eq!(columns[6], "Field Aggregation");
        assert_eq!(columns[7], "description");
    }

    #[test]
    fn test_push_checks_width() {
        let mut table = DocTable::new(["description"]);
        assert!(table.push(row("A", "[x]", vec![None])).is_ok());
        assert!(matches!(
            table.push(row("A", "[y]", vec![])),
            Err(Error::ColumnMismatch {
                expected: 8,
                actual: 7
            })
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_values_round_trip() {
        let original = ExtractionRow {
            field_calculation: Some("SUM([Sales])".into()),
            field_role: Some("measure".into()),
            ..row("Trend", "Total", vec![Some("note".into()), None])
        };

        let values: Vec<Option<String>> = original
            .values()
            .map(|v| v.map(str::to_string))
            .collect();
        assert_eq!(values.len(), 9);
        assert_eq!(ExtractionRow::from_values(values), original);
    }

    #[test]
    fn test_concat_keeps_order() {
        let mut first = DocTable::new(Vec::<String>::new());
        first.push(row("A", "[1]", vec![])).unwrap();
        let mut second = DocTable::new(Vec::<String>::new());
        second.push(row("B", "[2]", vec![])).unwrap();
        second.push(row("B", "[3]", vec![])).unwrap();

        let combined = DocTable::concat([first, second]).unwrap();
        let fields: Vec<_> = combined.rows().iter().map(|r| r.field_name.as_str()).collect();
        assert_eq!(fields, vec!["[1]", "[2]", "[3]"]);
    }

    #[test]
    fn test_concat_nothing_fails() {
        assert!(matches!(
            DocTable::concat(Vec::new()),
            Err(Error::EmptyAggregation)
        ));
    }

    #[test]
    fn test_concat_rejects_different_columns() {
        let first = DocTable::new(["description"]);
        let second = DocTable::new(Vec::<String>::new());
        assert!(matches!(
            DocTable::concat([first, second]),
            Err(Error::ColumnMismatch { .. })
        ));
    }
}
