//! Writing a documentation table to disk and reading it back.

use tabdoc_core::{DocTable, ExtractionRow};
use tabdoc_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};

fn sample_table() -> DocTable {
    let mut table = DocTable::new(["description", "hidden"]);
    for (sheet, field, calc) in [
        ("Overview", "Revenue", None),
        ("Overview", "Profit Ratio", Some("SUM([Profit])/SUM([Sales])")),
        ("Detail", "Region", None),
    ] {
        table
            .push(ExtractionRow {
                dashboard_name: "Superstore".into(),
                worksheet_name: sheet.into(),
                field_name: field.into(),
                field_calculation: calc.map(String::from),
                field_type: Some("real".into()),
                field_role: Some("measure".into()),
                field_aggregation: Some("Sum".into()),
                extras: vec![Some("multi\nline, quoted \"text\"".into()), None],
            })
            .unwrap();
    }
    table
}

#[test]
fn test_roundtrip_keeps_rows_and_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Superstore_docs.csv");
    let table = sample_table();

    CsvWriter::write_file(&table, &path, &CsvWriteOptions::default()).unwrap();
    let back = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();

    assert_eq!(back.len(), table.len());
    assert_eq!(
        back.columns().collect::<Vec<_>>(),
        table.columns().collect::<Vec<_>>()
    );
    assert_eq!(back, table);
}

#[test]
fn test_roundtrip_with_semicolons() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("semi.csv");
    let table = sample_table();

    let write = CsvWriteOptions {
        delimiter: b';',
        ..Default::default()
    };
    let read = CsvReadOptions {
        delimiter: b';',
        ..Default::default()
    };

    CsvWriter::write_file(&table, &path, &write).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Dashboard Name;Worksheet Name;"));

    assert_eq!(CsvReader::read_file(&path, &read).unwrap(), table);
}
