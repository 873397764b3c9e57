use log::info;

use candidate_roster::{Aggregator, Roster};
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

pub mod config_reader;
pub mod io_eval;
pub mod io_flat;
pub mod io_forms;
pub mod io_master;

#[derive(Debug, Snafu)]
pub enum HztError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Missing sheet {index} in workbook {path}"))]
    MissingSheet { index: usize, path: String },
    #[snafu(display("Error opening config file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing config file"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening master file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a line of the master file {path}"))]
    CsvLineParse { source: csv::Error, path: String },
    #[snafu(display("Error writing the flat export {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error creating output directory {path}"))]
    CreatingDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing workbook {path}"))]
    WritingWorkbook {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error listing input directory {path}"))]
    ListingInput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type HztResult<T> = Result<T, HztError>;

/// One of the two evaluation contexts present in every source workbook,
/// addressed by a fixed sheet position.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExerciseType {
    pub name: &'static str,
    pub sheet_index: usize,
}

impl ExerciseType {
    pub fn all() -> [ExerciseType; 2] {
        [
            ExerciseType {
                name: "חקר ביצועים",
                sheet_index: 1,
            },
            ExerciseType {
                name: "Solution",
                sheet_index: 0,
            },
        ]
    }
}

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Runs the whole pipeline: read the roster and every evaluation workbook,
/// aggregate by candidate and team, write the selected output and finally
/// report every identity that could not be resolved.
pub fn run(config_path: String, output: Option<String>) -> HztResult<()> {
    let config = config_reader::read_config(&config_path)?;
    info!("config: {:?}", config);

    let entries = io_master::read_master(&config.master_file_path)?;
    let mut roster = Roster::new(entries);

    let mut paths: Vec<PathBuf> = fs::read_dir(&config.input_directory)
        .context(ListingInputSnafu {
            path: config.input_directory.clone(),
        })?
        .map(|entry_r| entry_r.map(|entry| entry.path()))
        .collect::<Result<_, _>>()
        .context(ListingInputSnafu {
            path: config.input_directory.clone(),
        })?;
    // Directory listing order is platform dependent.
    paths.sort();

    let mut aggregator = Aggregator::new();
    for path in paths.iter() {
        info!("Reading file {}", path.display());
        let source = simplify_file_name(path);
        for record in io_eval::read_workbook(path)? {
            aggregator.add_record(&mut roster, &record, &source);
        }
    }
    info!("Read totally {} files", paths.len());

    let teams = aggregator.into_teams(&roster);

    match output.as_deref() {
        None | Some("flat") => io_flat::write(&teams, &config.flat_output_path())?,
        Some("forms") => io_forms::write(&teams, &roster, &config.forms_output_directory())?,
        Some(x) => whatever!("Unknown output {:?} (expected 'flat' or 'forms')", x),
    }

    roster.report_unresolved();
    Ok(())
}
