// The formatted "Hazanot-O-mat" export: one workbook per (team, exercise),
// one worksheet per axis, evaluators in fixed column pairs.

use crate::hzt::*;

use candidate_roster::{Axis, Candidate, Roster, Teams};
use log::{info, warn};
use rust_xlsxwriter::Workbook;
use snafu::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Evaluators beyond this count do not fit the fixed column slots of the
/// reviewed layout. The output is still written in full.
const MAX_EVALUATORS: usize = 4;

pub fn write(teams: &Teams, roster: &Roster, out_dir: &str) -> HztResult<()> {
    info!("Writing the formatted workbooks under {}", out_dir);
    for (team_name, candidates) in teams.iter() {
        for exercise in ExerciseType::all() {
            write_team_file(team_name, candidates, &exercise, roster, out_dir)?;
        }
    }
    Ok(())
}

fn write_team_file(
    team_name: &str,
    candidates: &[Candidate],
    exercise: &ExerciseType,
    roster: &Roster,
    out_dir: &str,
) -> HztResult<()> {
    let filtered: Vec<Candidate> = candidates
        .iter()
        .map(|c| filter_evaluations(c, exercise.name))
        .collect();
    let evaluators = extract_evaluators(&filtered);

    let dir = Path::new(out_dir).join(exercise.name);
    fs::create_dir_all(&dir).context(CreatingDirSnafu {
        path: dir.display().to_string(),
    })?;
    let path = dir.join(format!("צוות {}.xlsx", team_name));
    let path_s = path.display().to_string();

    let mut workbook = Workbook::new();
    fill_workbook(&mut workbook, &filtered, &evaluators, exercise.name, roster).context(
        WritingWorkbookSnafu {
            path: path_s.clone(),
        },
    )?;
    workbook
        .save(&path)
        .context(WritingWorkbookSnafu { path: path_s })?;
    Ok(())
}

fn fill_workbook(
    workbook: &mut Workbook,
    candidates: &[Candidate],
    evaluators: &[String],
    exercise_name: &str,
    roster: &Roster,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    for axis in Axis::ALL {
        let sheet = workbook.add_worksheet();
        sheet.set_name(axis.name())?;
        sheet.write_string(0, 0, exercise_name)?;
        for (j, evaluator) in evaluators.iter().enumerate() {
            sheet.write_string(0, evaluator_col(j), evaluator.as_str())?;
        }
        for (i, candidate) in candidates.iter().enumerate() {
            let row = (i + 1) as u32;
            let display_name = roster.display_name(&candidate.identifier);
            sheet.write_string(row, 0, display_name.as_str())?;
            for evaluation in candidate.evaluations.iter() {
                if let Some(j) = evaluators
                    .iter()
                    .position(|e| e == &evaluation.evaluator_name)
                {
                    let col = evaluator_col(j);
                    let attribute = axis.of(evaluation);
                    sheet.write_string(row, col, attribute.num.as_str())?;
                    sheet.write_string(row, col + 1, attribute.text.as_str())?;
                }
            }
        }
    }
    Ok(())
}

// The name of evaluator j sits above its (numeric, text) column pair.
fn evaluator_col(j: usize) -> u16 {
    (1 + 2 * j) as u16
}

/// The sorted evaluators that evaluated at least one of the candidates.
fn extract_evaluators(candidates: &[Candidate]) -> Vec<String> {
    let evaluators: BTreeSet<String> = candidates
        .iter()
        .flat_map(|c| c.evaluations.iter().map(|e| e.evaluator_name.clone()))
        .collect();
    if evaluators.len() > MAX_EVALUATORS {
        warn!("Too many evaluators for a single team: {:?}", evaluators);
    }
    evaluators.into_iter().collect()
}

/// A copy of the candidate keeping only the evaluations of the given exercise.
fn filter_evaluations(candidate: &Candidate, exercise_name: &str) -> Candidate {
    Candidate {
        identifier: candidate.identifier.clone(),
        evaluations: candidate
            .evaluations
            .iter()
            .filter(|e| e.exercise_name == exercise_name)
            .cloned()
            .collect(),
    }
}
