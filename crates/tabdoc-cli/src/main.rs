//! tabdoc CLI - document Tableau workbook fields as CSV

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tabdoc::prelude::*;
use tabdoc::extract_workbook;

#[derive(Parser)]
#[command(name = "tabdoc")]
#[command(
    author,
    version,
    about = "Document the fields used by Tableau workbooks"
)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write <name>_docs.csv for a workbook or every .twbx in a directory
    Docs {
        /// Workbook file or directory of .twbx files
        input: PathBuf,

        /// Directory for the CSV files (only used when --create-dir creates it)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Create the output directory if it does not exist
        #[arg(long)]
        create_dir: bool,

        /// Extra field attribute to add as a column (repeatable)
        #[arg(short = 'a', long = "attr")]
        attributes: Vec<String>,

        /// Also print all tables combined as one CSV
        #[arg(short, long)]
        concat: bool,

        /// Write the combined CSV to this file instead of stdout
        #[arg(long, requires = "concat")]
        combined: Option<PathBuf>,
    },

    /// Show worksheets and datasources of a workbook
    Info {
        /// Workbook file (.twb or .twbx)
        input: PathBuf,
    },

    /// Print the documentation table of one workbook to stdout
    Fields {
        /// Workbook file (.twb or .twbx)
        input: PathBuf,

        /// Extra field attribute to add as a column (repeatable)
        #[arg(short = 'a', long = "attr")]
        attributes: Vec<String>,
    },

    /// List the field attributes usable with --attr
    Attributes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match cli.command {
        Commands::Docs {
            input,
            output,
            create_dir,
            attributes,
            concat,
            combined,
        } => docs(
            &input,
            output,
            create_dir,
            &attributes,
            concat,
            combined.as_deref(),
        ),
        Commands::Info { input } => show_info(&input),
        Commands::Fields { input, attributes } => print_fields(&input, &attributes),
        Commands::Attributes => list_attributes(),
    }
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn docs(
    input: &Path,
    output: Option<PathBuf>,
    create_dir: bool,
    attributes: &[String],
    concat: bool,
    combined: Option<&Path>,
) -> Result<()> {
    warn_unknown_attributes(attributes);

    let processor = BatchDashboardProcessor::new(input, output, create_dir)
        .with_context(|| format!("Failed to prepare '{}'", input.display()))?;

    if processor.files().is_empty() {
        log::warn!("No .twbx files found in '{}'", input.display());
    }

    let Some(table) = processor.process(attributes, concat)? else {
        return Ok(());
    };

    match combined {
        Some(path) => {
            CsvWriter::write_file(&table, path, &CsvWriteOptions::default())
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log::info!("Saved combined data to {}", path.display());
        }
        None => write_stdout(&table)?,
    }

    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let workbook =
        TwbReader::read_file(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Worksheets: {}", workbook.worksheet_count());
    for sheet in workbook.worksheets() {
        println!("  {}", sheet);
    }

    println!("Datasources: {}", workbook.datasource_count());
    for ds in workbook.datasources() {
        let calculated = ds.fields().filter(|f| f.is_calculated()).count();
        println!();
        println!("  \"{}\" ({})", ds.display_name(), ds.name);
        println!("    Fields: {}", ds.field_count());
        println!("    Calculated: {}", calculated);
    }

    Ok(())
}

fn print_fields(input: &Path, attributes: &[String]) -> Result<()> {
    warn_unknown_attributes(attributes);

    let workbook =
        TwbReader::read_file(input).with_context(|| format!("Failed to open '{}'", input.display()))?;
    let table = extract_workbook(&workbook, attributes)?;
    write_stdout(&table)
}

fn list_attributes() -> Result<()> {
    for attr in FieldAttribute::ALL {
        println!("{}", attr);
    }
    Ok(())
}

/// Unknown attributes still produce a (null) column; say so up front
fn warn_unknown_attributes(attributes: &[String]) {
    for name in attributes {
        if name.parse::<FieldAttribute>().is_err() {
            log::warn!("Unknown field attribute '{}', its column will be empty", name);
        }
    }
}

fn write_stdout(table: &DocTable) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    CsvWriter::write(table, &mut handle, &CsvWriteOptions::default())
        .context("Failed to write to stdout")?;
    handle.flush().context("Failed to write to stdout")?;
    Ok(())
}
