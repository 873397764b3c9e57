// Reader for the master roster file.

use crate::hzt::*;

use candidate_roster::RosterEntry;
use log::debug;
use snafu::prelude::*;

/// Reads the headerless master roster.
///
/// Rows carry three columns (identifier, team, full name) or four
/// (identifier, team, secondary id, full name); the full name is always the
/// last column.
pub fn read_master(path: &str) -> HztResult<Vec<RosterEntry>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut entries: Vec<RosterEntry> = Vec::new();
    for line_r in rdr.into_records() {
        let line = line_r.context(CsvLineParseSnafu { path })?;
        let identifier = line.get(0).unwrap_or("").to_string();
        if identifier.is_empty() {
            continue;
        }
        let team = line.get(1).unwrap_or("").to_string();
        let full_name_idx = if line.len() >= 4 { 3 } else { 2 };
        let full_name = line.get(full_name_idx).unwrap_or("").to_string();
        entries.push(RosterEntry {
            identifier,
            team,
            full_name,
        });
    }
    debug!("read_master: {} entries from {}", entries.len(), path);
    Ok(entries)
}
