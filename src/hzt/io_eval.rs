// Extractor for the fixed-layout evaluation workbooks.

use crate::hzt::*;

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use candidate_roster::{Attribute, Evaluation, RawRecord};
use log::{debug, warn};
use snafu::prelude::*;
use std::path::Path;

/// Named cell coordinates of the evaluation sheet layout, 0-based.
/// The traversal below only consumes named fields.
struct SheetLayout {
    evaluator: (u32, u32),
    team: (u32, u32),
    name_col: u32,
    first_row: u32,
    row_stride: u32,
    slots: u32,
    // Start column of each axis block. An attribute's numeric cell is at
    // (row, col), its text cell at (row + 1, col).
    axis_cols: [u32; 5],
}

const LAYOUT: SheetLayout = SheetLayout {
    evaluator: (5, 1),
    team: (5, 2),
    name_col: 4,
    first_row: 5,
    row_stride: 2,
    slots: 5,
    axis_cols: [5, 10, 15, 20, 25],
};

/// Reads all candidate records from both exercise sheets of one workbook.
pub fn read_workbook(path: &Path) -> HztResult<Vec<RawRecord>> {
    let path_s = path.display().to_string();
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu {
        path: path_s.clone(),
    })?;

    let mut records: Vec<RawRecord> = Vec::new();
    for exercise in ExerciseType::all() {
        let range = workbook
            .worksheet_range_at(exercise.sheet_index)
            .context(MissingSheetSnafu {
                index: exercise.sheet_index,
                path: path_s.clone(),
            })?
            .context(OpeningExcelSnafu {
                path: path_s.clone(),
            })?;
        records.extend(read_sheet(&range, &exercise, &path_s));
    }
    Ok(records)
}

fn read_sheet(range: &Range<DataType>, exercise: &ExerciseType, path: &str) -> Vec<RawRecord> {
    let evaluator_name = cell_text(range, LAYOUT.evaluator);
    // Most evaluators write their name in the name of the file they upload,
    // so a mismatch often means the evaluator name in the sheet is wrong.
    if !evaluator_name.is_empty() && !path.contains(&evaluator_name) {
        warn!(
            "evaluator name {} not in file path {}: it may be incorrect",
            evaluator_name, path
        );
    }
    let team_name = sanitize_team(&cell_text(range, LAYOUT.team));

    let mut records: Vec<RawRecord> = Vec::new();
    for slot in 0..LAYOUT.slots {
        let row = LAYOUT.first_row + slot * LAYOUT.row_stride;
        let candidate_name = cell_text(range, (row, LAYOUT.name_col));
        if candidate_name.is_empty() {
            continue;
        }
        if team_name.is_empty() {
            // The record still goes through resolution under the empty team,
            // which reliably misses and surfaces the problem in the report.
            warn!("No team in {} (evaluator is {})", path, evaluator_name);
        }
        let evaluation = Evaluation {
            evaluator_name: evaluator_name.clone(),
            exercise_name: exercise.name.to_string(),
            learning_ability: read_attribute(range, row, LAYOUT.axis_cols[0]),
            personal: read_attribute(range, row, LAYOUT.axis_cols[1]),
            interpersonal: read_attribute(range, row, LAYOUT.axis_cols[2]),
            leader: read_attribute(range, row, LAYOUT.axis_cols[3]),
            summary: read_attribute(range, row, LAYOUT.axis_cols[4]),
        };
        debug!(
            "read_sheet: {} candidate {:?} team {:?}",
            exercise.name, candidate_name, team_name
        );
        records.push(RawRecord {
            candidate_name,
            team: team_name.clone(),
            evaluation,
        });
    }
    records
}

fn read_attribute(range: &Range<DataType>, row: u32, col: u32) -> Attribute {
    Attribute {
        num: sanitize_num(range.get_value((row, col))),
        text: cell_text(range, (row + 1, col)),
    }
}

/// The numeric part of an attribute as an integer-valued string.
///
/// Spreadsheet libraries hand back numbers as floats, so an integer score
/// shows up as e.g. 4.0. Anything that is not a number becomes the empty
/// string.
fn sanitize_num(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::Float(f)) => format!("{}", *f as i64),
        Some(DataType::Int(i)) => i.to_string(),
        _ => String::new(),
    }
}

fn cell_text(range: &Range<DataType>, pos: (u32, u32)) -> String {
    match range.get_value(pos) {
        Some(DataType::String(s)) => s.clone(),
        Some(DataType::Int(i)) => i.to_string(),
        Some(DataType::Float(f)) => f.to_string(),
        Some(DataType::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Removes the tick so that e.g. א and א' name the same team.
fn sanitize_team(team_name: &str) -> String {
    team_name.replace('\'', "")
}
