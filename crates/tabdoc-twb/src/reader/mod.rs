//! TWB document reader

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{TwbError, TwbResult};
use crate::package;
use tabdoc_core::{Datasource, Field, Workbook};

/// Workbook file reader
///
/// Understands bare `.twb` documents and `.twbx` packages. Packages are
/// recognised by content, not by extension.
pub struct TwbReader;

impl TwbReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> TwbResult<Workbook> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);

        if package::is_package(&mut reader)? {
            Self::read_package(reader, path)
        } else {
            Self::read_document(reader, path)
        }
    }

    /// Read a `.twbx` package from a reader
    pub fn read_package<R: Read + Seek, P: Into<PathBuf>>(
        reader: R,
        filename: P,
    ) -> TwbResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let index = package::find_document(&mut archive)?;
        let entry = archive.by_index(index)?;
        log::debug!("Reading workbook document {}", entry.name());

        Self::read_document(BufReader::new(entry), filename)
    }

    /// Read a bare `.twb` document from a reader
    pub fn read_document<R: BufRead, P: Into<PathBuf>>(
        reader: R,
        filename: P,
    ) -> TwbResult<Workbook> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut parser = DocumentParser::new(Workbook::new(filename));
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = element_name(&e);
                    parser.open(&name, &e, false)?;
                    parser.stack.push(name);
                }
                Ok(Event::Empty(e)) => {
                    let name = element_name(&e);
                    parser.open(&name, &e, true)?;
                }
                Ok(Event::End(e)) => {
                    parser.stack.pop();
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    parser.close(&name);
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape()?;
                    parser.text(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(TwbError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        parser.finish()
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attr(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn append(slot: &mut Option<String>, text: &str) {
    slot.get_or_insert_with(String::new).push_str(text);
}

/// Build a field from a datasource `<column>` element
///
/// Values set on the column win over its metadata record. The record only
/// fills what the column leaves out, so `aggregation` comes from the record
/// only when the column has no `aggregation` attribute, and a column without
/// `datatype` takes the record's `local-type`.
fn column_field(e: &BytesStart<'_>) -> Field {
    Field {
        id: attr(e, "name").unwrap_or_default(),
        caption: attr(e, "caption"),
        alias: attr(e, "alias"),
        datatype: attr(e, "datatype"),
        role: attr(e, "role"),
        field_type: attr(e, "type"),
        aggregation: attr(e, "aggregation"),
        default_aggregation: attr(e, "default-aggregation"),
        hidden: attr(e, "hidden").map(|v| v == "true"),
        ..Default::default()
    }
}

/// A datasource whose `<column>`s and metadata records are still being read
struct PendingDatasource {
    datasource: Datasource,
    columns: Vec<Field>,
    metadata: Vec<Field>,
}

impl PendingDatasource {
    fn new(datasource: Datasource) -> Self {
        Self {
            datasource,
            columns: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Columns first, each backed by its metadata record; then fields only
    /// the connection metadata knows about.
    fn build(self) -> Datasource {
        let PendingDatasource {
            mut datasource,
            columns,
            metadata,
        } = self;

        for mut column in columns {
            if let Some(record) = metadata.iter().find(|m| m.id == column.id) {
                // Remote aliases only name metadata-only fields.
                let record = Field {
                    alias: None,
                    ..record.clone()
                };
                column.fill_missing_from(&record);
            }
            datasource.insert_field(column);
        }

        for record in metadata {
            if !datasource.contains_field(&record.id) {
                datasource.insert_field(record);
            }
        }

        datasource
    }
}

/// Streaming state for one TWB document
struct DocumentParser {
    workbook: Workbook,
    stack: Vec<String>,
    saw_root: bool,
    datasource: Option<PendingDatasource>,
    column: Option<Field>,
    description: Option<String>,
    record: Option<Field>,
    record_child: Option<String>,
    worksheet: Option<String>,
    dependency: Option<String>,
    /// (datasource, column id, worksheet)
    dependencies: Vec<(String, String, String)>,
}

const DATASOURCES: [&str; 2] = ["workbook", "datasources"];
const DATASOURCE: [&str; 3] = ["workbook", "datasources", "datasource"];
const WORKSHEETS: [&str; 2] = ["workbook", "worksheets"];

impl DocumentParser {
    fn new(workbook: Workbook) -> Self {
        Self {
            workbook,
            stack: Vec::new(),
            saw_root: false,
            datasource: None,
            column: None,
            description: None,
            record: None,
            record_child: None,
            worksheet: None,
            dependency: None,
            dependencies: Vec::new(),
        }
    }

    /// Whether the open elements are exactly `path`
    fn at(&self, path: &[&str]) -> bool {
        self.stack.iter().map(String::as_str).eq(path.iter().copied())
    }

    fn parent(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// Handle a start or empty element; `self.stack` holds its ancestors.
    fn open(&mut self, name: &str, e: &BytesStart<'_>, empty: bool) -> TwbResult<()> {
        match name {
            "workbook" if self.stack.is_empty() => self.saw_root = true,
            "datasource" if self.at(&DATASOURCES) => {
                let mut datasource = Datasource::new(attr(e, "name").unwrap_or_default());
                datasource.caption = attr(e, "caption");
                if empty {
                    self.workbook.add_datasource(datasource);
                } else {
                    self.datasource = Some(PendingDatasource::new(datasource));
                }
            }
            "column" if self.at(&DATASOURCE) => {
                let field = column_field(e);
                if empty {
                    if let Some(ds) = self.datasource.as_mut() {
                        ds.columns.push(field);
                    }
                } else {
                    self.column = Some(field);
                }
            }
            "calculation" if self.parent() == Some("column") => {
                if let Some(column) = self.column.as_mut() {
                    column.calculation = attr(e, "formula");
                }
            }
            "desc" if self.column.is_some() && !empty => self.description = Some(String::new()),
            "metadata-record" if self.datasource.is_some() && !empty => {
                if attr(e, "class").as_deref() == Some("column") {
                    self.record = Some(Field::default());
                }
            }
            _ if self.record.is_some() && self.parent() == Some("metadata-record") => {
                if !empty {
                    self.record_child = Some(name.to_string());
                }
            }
            "worksheet" if self.at(&WORKSHEETS) => {
                let sheet = attr(e, "name").ok_or_else(|| {
                    TwbError::InvalidFormat("worksheet without a name".into())
                })?;
                self.workbook.add_worksheet(sheet.clone())?;
                if !empty {
                    self.worksheet = Some(sheet);
                }
            }
            "datasource-dependencies" if self.worksheet.is_some() && !empty => {
                self.dependency = attr(e, "datasource");
            }
            "column" if self.parent() == Some("datasource-dependencies") => {
                if let (Some(ds), Some(sheet), Some(column)) =
                    (&self.dependency, &self.worksheet, attr(e, "name"))
                {
                    self.dependencies
                        .push((ds.clone(), column, sheet.clone()));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle an end element; `self.stack` holds its ancestors.
    fn close(&mut self, name: &str) {
        match name {
            "column" if self.at(&DATASOURCE) => {
                if let (Some(column), Some(ds)) = (self.column.take(), self.datasource.as_mut()) {
                    ds.columns.push(column);
                }
            }
            "desc" => {
                if let (Some(text), Some(column)) = (self.description.take(), self.column.as_mut())
                {
                    if !text.is_empty() {
                        column.description = Some(text);
                    }
                }
            }
            "metadata-record" => {
                if let (Some(record), Some(ds)) = (self.record.take(), self.datasource.as_mut()) {
                    if !record.id.is_empty() {
                        ds.metadata.push(record);
                    }
                }
            }
            "datasource" if self.at(&DATASOURCES) => {
                if let Some(ds) = self.datasource.take() {
                    self.workbook.add_datasource(ds.build());
                }
            }
            "worksheet" if self.at(&WORKSHEETS) => self.worksheet = None,
            "datasource-dependencies" => self.dependency = None,
            _ => {}
        }

        if self.record_child.as_deref() == Some(name) {
            self.record_child = None;
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(description) = self.description.as_mut() {
            description.push_str(text);
            return;
        }

        let (Some(record), Some(child)) = (self.record.as_mut(), self.record_child.as_deref())
        else {
            return;
        };

        match child {
            "local-name" => record.id.push_str(text),
            "remote-name" => append(&mut record.remote_name, text),
            "local-type" => append(&mut record.datatype, text),
            "aggregation" => append(&mut record.aggregation, text),
            "parent-name" => append(&mut record.parent_name, text),
            "remote-alias" => append(&mut record.alias, text),
            _ => {}
        }
    }

    fn finish(mut self) -> TwbResult<Workbook> {
        if !self.saw_root {
            return Err(TwbError::InvalidFormat(
                "missing <workbook> root element".into(),
            ));
        }

        for (datasource, column, worksheet) in std::mem::take(&mut self.dependencies) {
            self.workbook.mark_used(&datasource, &column, &worksheet)?;
        }

        log::debug!(
            "Read {} worksheets and {} datasources from {}",
            self.workbook.worksheet_count(),
            self.workbook.datasource_count(),
            self.workbook.filename().display()
        );

        Ok(self.workbook)
    }
}
