//! Batch processing - document every workbook under a path

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::extract::{TwbOpener, WorkbookFieldExtractor, WorkbookOpener};
use tabdoc_core::{dashboard_name, DocTable, PACKAGED_WORKBOOK_EXTENSION};
use tabdoc_csv::{CsvWriteOptions, CsvWriter};

/// Suffix appended to the workbook base name for its CSV file
pub const OUTPUT_SUFFIX: &str = "_docs.csv";

/// Options for [`BatchDashboardProcessor`]
#[derive(Debug, Clone, Default)]
pub struct ProcessorOptions {
    /// Requested output directory; the input path when unset
    pub output_path: Option<PathBuf>,
    /// Create the output directory if it does not exist yet
    pub create_output_dir: bool,
    /// How the per-workbook CSV files are written
    pub csv: CsvWriteOptions,
}

/// A workbook whose fields were extracted
#[derive(Debug)]
pub struct ProcessedWorkbook {
    /// Workbook file
    pub input: PathBuf,
    /// CSV file written for it; `None` when writing failed
    pub csv_path: Option<PathBuf>,
    /// Extracted table
    pub table: DocTable,
}

/// A workbook that could not be extracted or whose CSV could not be written
#[derive(Debug)]
pub struct FailedWorkbook {
    /// Workbook file
    pub input: PathBuf,
    /// What went wrong
    pub error: Error,
}

/// Outcome of one batch run, in discovery order
///
/// A workbook that extracted but could not be saved shows up in both lists.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedWorkbook>,
    pub failed: Vec<FailedWorkbook>,
}

impl BatchReport {
    /// Whether every discovered workbook was extracted and saved
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Stack the tables of all extracted workbooks, saved or not
    ///
    /// Fails with [`Error::EmptyAggregation`] when nothing was extracted.
    pub fn into_combined(self) -> Result<DocTable> {
        if self.processed.is_empty() {
            return Err(Error::EmptyAggregation);
        }
        Ok(DocTable::concat(self.processed.into_iter().map(|p| p.table))?)
    }

    fn fail(&mut self, file: &Path, error: Error) {
        log::error!("Failed to analyze {}: {}", file.display(), error);
        self.failed.push(FailedWorkbook {
            input: file.to_path_buf(),
            error,
        });
    }
}

/// Documents a single workbook file or every workbook in a directory
///
/// Files are discovered and the output directory is resolved when the
/// processor is built; errors there abort immediately. Errors while
/// processing an individual workbook are logged and skipped.
#[derive(Debug)]
pub struct BatchDashboardProcessor<O = TwbOpener> {
    input_path: PathBuf,
    output_dir: PathBuf,
    files: Vec<PathBuf>,
    extractor: WorkbookFieldExtractor<O>,
    csv_options: CsvWriteOptions,
}

impl BatchDashboardProcessor {
    /// Build a processor reading workbooks with [`TwbOpener`]
    pub fn new<P: Into<PathBuf>>(
        input_path: P,
        output_path: Option<PathBuf>,
        create_output_dir: bool,
    ) -> Result<Self> {
        Self::with_options(
            input_path,
            ProcessorOptions {
                output_path,
                create_output_dir,
                ..Default::default()
            },
        )
    }

    /// Build a processor from options
    pub fn with_options<P: Into<PathBuf>>(input_path: P, options: ProcessorOptions) -> Result<Self> {
        Self::with_opener(input_path, options, TwbOpener)
    }
}

impl<O: WorkbookOpener> BatchDashboardProcessor<O> {
    /// Build a processor with a custom workbook opener
    pub fn with_opener<P: Into<PathBuf>>(
        input_path: P,
        options: ProcessorOptions,
        opener: O,
    ) -> Result<Self> {
        let input_path = input_path.into();
        let files = discover_workbooks(&input_path)?;
        let output_dir = resolve_output_dir(
            &input_path,
            options.output_path.as_deref(),
            options.create_output_dir,
        )?;

        log::debug!(
            "Found {} workbook(s) under {}, writing to {}",
            files.len(),
            input_path.display(),
            output_dir.display()
        );

        Ok(Self {
            input_path,
            output_dir,
            files,
            extractor: WorkbookFieldExtractor::with_opener(opener),
            csv_options: options.csv,
        })
    }

    /// Path the processor was built for
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Directory the CSV files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Workbook files that will be processed, in order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Document every workbook
    ///
    /// With `concatenate` set, returns all extracted tables stacked in
    /// discovery order; that fails with [`Error::EmptyAggregation`] if no
    /// workbook could be extracted. Otherwise returns `None`.
    pub fn process(&self, extra_attributes: &[String], concatenate: bool) -> Result<Option<DocTable>> {
        let report = self.process_with_report(extra_attributes);
        if concatenate {
            report.into_combined().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Document every workbook and report what happened to each
    pub fn process_with_report(&self, extra_attributes: &[String]) -> BatchReport {
        let mut report = BatchReport::default();

        for file in &self.files {
            let table = match self.extractor.extract(file, extra_attributes) {
                Ok(table) => table,
                Err(error) => {
                    report.fail(file, error);
                    continue;
                }
            };

            // The table counts as extracted even if saving it fails.
            let csv_path = match self.save(file, &table) {
                Ok(path) => Some(path),
                Err(error) => {
                    report.fail(file, error);
                    None
                }
            };

            report.processed.push(ProcessedWorkbook {
                input: file.clone(),
                csv_path,
                table,
            });
        }

        report
    }

    fn save(&self, file: &Path, table: &DocTable) -> Result<PathBuf> {
        let csv_path = self
            .output_dir
            .join(format!("{}{}", dashboard_name(file), OUTPUT_SUFFIX));
        CsvWriter::write_file(table, &csv_path, &self.csv_options)?;
        log::info!("Saved data to {}", csv_path.display());
        Ok(csv_path)
    }
}

/// List the workbook files under `input`
///
/// A file is returned as is, whatever its extension. For a directory, every
/// direct child that is a regular file named `*.twbx` is returned, sorted by
/// name; subdirectories are not entered.
pub fn discover_workbooks(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.exists() {
        return Err(Error::NotFound(input.to_path_buf()));
    }

    let suffix = format!(".{PACKAGED_WORKBOOK_EXTENSION}");
    let mut files = Vec::new();

    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&suffix));

        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Decide where CSV files go
///
/// The requested output path (the input path when none or an empty one is
/// given) is used only when `create_output_dir` is set and that path does
/// not exist yet, in which case it is created. In every other case the
/// output goes to the input path itself.
pub fn resolve_output_dir(
    input: &Path,
    output: Option<&Path>,
    create_output_dir: bool,
) -> Result<PathBuf> {
    let requested = output
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or(input);

    if create_output_dir && !requested.exists() {
        fs::create_dir_all(requested)?;
        Ok(requested.to_path_buf())
    } else {
        Ok(input.to_path_buf())
    }
}
