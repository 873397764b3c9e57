// The flat export: one CSV row per (candidate, evaluation, axis).

use crate::hzt::*;

use candidate_roster::{Axis, Teams};
use log::info;
use snafu::prelude::*;

pub const HEADER: [&str; 6] = [
    "id_num",
    "evaluated_by",
    "exercise",
    "axis",
    "verbal_eval",
    "numeric_eval",
];

/// Flattens the team grouping into rows, 5 rows per evaluation.
pub fn flat_rows(teams: &Teams) -> Vec<[String; 6]> {
    let mut rows: Vec<[String; 6]> = Vec::new();
    for candidates in teams.values() {
        for candidate in candidates {
            for evaluation in candidate.evaluations.iter() {
                for axis in Axis::ALL {
                    let attribute = axis.of(evaluation);
                    rows.push([
                        candidate.identifier.clone(),
                        evaluation.evaluator_name.clone(),
                        evaluation.exercise_name.clone(),
                        axis.name().to_string(),
                        attribute.text.clone(),
                        attribute.num.clone(),
                    ]);
                }
            }
        }
    }
    rows
}

pub fn write(teams: &Teams, path: &str) -> HztResult<()> {
    let rows = flat_rows(teams);
    info!("Writing {} rows to {}", rows.len(), path);
    let mut writer = csv::Writer::from_path(path).context(CsvWriteSnafu { path })?;
    writer.write_record(HEADER).context(CsvWriteSnafu { path })?;
    for row in rows.iter() {
        writer.write_record(row).context(CsvWriteSnafu { path })?;
    }
    writer
        .flush()
        .whatever_context(format!("Could not flush the flat export {}", path))?;
    Ok(())
}
