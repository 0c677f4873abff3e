//! Integration tests reading workbooks from disk.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use tabdoc_twb::{TwbError, TwbReader};

const DOCUMENT: &str = r#"<?xml version='1.0' encoding='utf-8' ?>
<workbook>
  <datasources>
    <datasource caption='Orders' name='federated.1'>
      <column caption='Order Date' datatype='date' name='[Order Date]' role='dimension' type='ordinal' />
      <column datatype='real' name='[Sales]' role='measure' type='quantitative' aggregation='Sum' />
    </datasource>
  </datasources>
  <worksheets>
    <worksheet name='Trend'>
      <table><view>
        <datasource-dependencies datasource='federated.1'>
          <column name='[Order Date]' />
          <column name='[Sales]' />
        </datasource-dependencies>
      </view></table>
    </worksheet>
  </worksheets>
</workbook>
"#;

fn write_package(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn summary(path: &Path) -> Vec<(String, String, Vec<String>)> {
    let wb = TwbReader::read_file(path).unwrap();
    wb.datasources()
        .flat_map(|ds| {
            ds.fields().map(move |f| {
                (
                    ds.name.clone(),
                    f.name().to_string(),
                    f.worksheets.iter().cloned().collect(),
                )
            })
        })
        .collect()
}

#[test]
fn test_package_and_document_read_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let twb = dir.path().join("Trend.twb");
    let twbx = dir.path().join("Trend.twbx");

    std::fs::write(&twb, DOCUMENT).unwrap();
    write_package(
        &twbx,
        &[("Data/Extracts/federated.hyper", "binary"), ("Trend.twb", DOCUMENT)],
    );

    assert_eq!(summary(&twb), summary(&twbx));
    assert_eq!(
        summary(&twbx),
        vec![
            (
                "federated.1".to_string(),
                "Order Date".to_string(),
                vec!["Trend".to_string()]
            ),
            (
                "federated.1".to_string(),
                "[Sales]".to_string(),
                vec!["Trend".to_string()]
            ),
        ]
    );
}

#[test]
fn test_filename_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let twbx = dir.path().join("Q1.twbx");
    write_package(&twbx, &[("Q1.twb", DOCUMENT)]);

    let wb = TwbReader::read_file(&twbx).unwrap();
    assert_eq!(wb.filename(), twbx.as_path());
    assert_eq!(wb.dashboard_name(), "Q1");
}

#[test]
fn test_package_without_document() {
    let dir = tempfile::tempdir().unwrap();
    let twbx = dir.path().join("empty.twbx");
    write_package(&twbx, &[("readme.txt", "nothing here")]);

    assert!(matches!(
        TwbReader::read_file(&twbx),
        Err(TwbError::MissingDocument)
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        TwbReader::read_file(dir.path().join("nope.twbx")),
        Err(TwbError::Io(_))
    ));
}

#[test]
fn test_truncated_package() {
    let dir = tempfile::tempdir().unwrap();
    let twbx = dir.path().join("broken.twbx");
    std::fs::write(&twbx, b"PK\x03\x04garbage").unwrap();

    assert!(matches!(TwbReader::read_file(&twbx), Err(TwbError::Zip(_))));
}
