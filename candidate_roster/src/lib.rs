mod model;
use log::{debug, error, info, warn};

use std::collections::{BTreeMap, BTreeSet};

pub use crate::model::*;

/// Resolves human-entered (team, name) pairs to stable identifiers and owns
/// the diagnostics accumulated along the way.
///
/// Evaluators type names by hand: a name may be the full name or only the
/// first name, and two roster members may share a team and a first name.
/// Both failure classes are surfaced distinctly (missing vs collision)
/// instead of silently dropping or silently guessing, because downstream
/// aggregation cannot proceed without a unique identifier.
///
/// Resolution never aborts the run. Diagnostics are write-only while files
/// are being processed and are read exactly once, by [Roster::report_unresolved],
/// at the end of the run.
pub struct Roster {
    entries: Vec<RosterEntry>,
    missing: BTreeSet<MissingIdentity>,
    collisions: BTreeSet<IdentityCollision>,
}

fn first_token(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Roster {
        info!("Roster loaded with {} entries", entries.len());
        Roster {
            entries,
            missing: BTreeSet::new(),
            collisions: BTreeSet::new(),
        }
    }

    /// Resolves a (team, name) pair to an identifier.
    ///
    /// An entry matches when its team is equal to `team` and `name` is equal
    /// to either the full name or its first token. The team is expected to be
    /// already normalized by the caller.
    ///
    /// Returns the identifier only when exactly one entry matches. Zero or
    /// multiple matches record a diagnostic keyed by the source file and
    /// return `None`; the affected record is for the caller to drop.
    pub fn resolve(&mut self, team: &str, name: &str, source: &str) -> Option<String> {
        let mut options: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| {
                entry.team == team
                    && (name == entry.full_name || name == first_token(&entry.full_name))
            })
            .map(|entry| entry.identifier.clone())
            .collect();
        debug!(
            "resolve: team {:?} name {:?} source {:?} -> {:?}",
            team, name, source, options
        );
        match options.len() {
            0 => {
                self.missing.insert(MissingIdentity {
                    team: team.to_string(),
                    name: name.to_string(),
                    source: source.to_string(),
                });
                None
            }
            1 => options.pop(),
            _ => {
                self.collisions.insert(IdentityCollision {
                    team: team.to_string(),
                    name: name.to_string(),
                    source: source.to_string(),
                    options,
                });
                None
            }
        }
    }

    /// The team of a resolved identifier.
    ///
    /// Identifiers handed out by [Roster::resolve] are always roster members,
    /// so a lookup miss indicates an internal inconsistency: it is logged
    /// immediately and the empty team is returned.
    pub fn team_of(&self, identifier: &str) -> String {
        match self.find(identifier) {
            Some(entry) => entry.team.clone(),
            None => {
                error!("No identifier {}", identifier);
                String::new()
            }
        }
    }

    /// The privacy-preserving short form of a resolved identifier's name:
    /// the first whitespace-delimited token of the full name.
    pub fn display_name(&self, identifier: &str) -> String {
        match self.find(identifier) {
            Some(entry) => first_token(&entry.full_name).to_string(),
            None => {
                error!("No identifier {}", identifier);
                String::new()
            }
        }
    }

    fn find(&self, identifier: &str) -> Option<&RosterEntry> {
        self.entries
            .iter()
            .find(|entry| entry.identifier == identifier)
    }

    pub fn missing(&self) -> impl Iterator<Item = &MissingIdentity> {
        self.missing.iter()
    }

    pub fn collisions(&self) -> impl Iterator<Item = &IdentityCollision> {
        self.collisions.iter()
    }

    pub fn has_unresolved(&self) -> bool {
        !self.missing.is_empty() || !self.collisions.is_empty()
    }

    /// Reports every missing and collision diagnostic accumulated since
    /// construction, sorted by (team, name), so that a human can fix the
    /// source data in one pass.
    pub fn report_unresolved(&self) {
        for m in self.missing.iter() {
            error!(
                "Candidate not found: team {} and name {} at {}",
                m.team, m.name, m.source
            );
        }
        for c in self.collisions.iter() {
            error!(
                "Identifier collision: team {} and name {} at {}: identifiers are {:?}",
                c.team, c.name, c.source, c.options
            );
        }
    }
}

/// Accumulates resolved evaluations per identifier, in encounter order
/// across source files, and finally groups the candidates by team.
pub struct Aggregator {
    evaluations: BTreeMap<String, Vec<Evaluation>>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Aggregator::new()
    }
}

impl Aggregator {
    pub fn new() -> Aggregator {
        Aggregator {
            evaluations: BTreeMap::new(),
        }
    }

    /// Resolves the record's identity and appends its evaluation to the
    /// candidate's accumulator.
    ///
    /// A record with no resolvable identifier is dropped here: the roster has
    /// already captured the corresponding diagnostic.
    pub fn add_record(&mut self, roster: &mut Roster, record: &RawRecord, source: &str) {
        if let Some(identifier) = roster.resolve(&record.team, &record.candidate_name, source) {
            self.evaluations
                .entry(identifier)
                .or_default()
                .push(record.evaluation.clone());
        }
    }

    /// Buckets the accumulated candidates into their teams.
    ///
    /// Each identifier's team is looked up once; within a team the candidates
    /// are sorted by identifier.
    pub fn into_teams(self, roster: &Roster) -> Teams {
        let mut teams: Teams = BTreeMap::new();
        for (identifier, evaluations) in self.evaluations {
            let team = roster.team_of(&identifier);
            teams.entry(team).or_default().push(Candidate {
                identifier,
                evaluations,
            });
        }
        for candidates in teams.values_mut() {
            candidates.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        }
        if teams.is_empty() {
            warn!("No candidate could be resolved from the input files");
        }
        teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(identifier: &str, team: &str, full_name: &str) -> RosterEntry {
        RosterEntry {
            identifier: identifier.to_string(),
            team: team.to_string(),
            full_name: full_name.to_string(),
        }
    }

    fn evaluation(evaluator: &str, exercise: &str) -> Evaluation {
        Evaluation {
            evaluator_name: evaluator.to_string(),
            exercise_name: exercise.to_string(),
            learning_ability: Attribute::default(),
            personal: Attribute::default(),
            interpersonal: Attribute::default(),
            leader: Attribute::default(),
            summary: Attribute::default(),
        }
    }

    fn record(name: &str, team: &str, evaluator: &str) -> RawRecord {
        RawRecord {
            candidate_name: name.to_string(),
            team: team.to_string(),
            evaluation: evaluation(evaluator, "Solution"),
        }
    }

    #[test]
    fn resolve_by_full_name() {
        let mut roster = Roster::new(vec![entry("U1", "A", "Noa Katz")]);
        assert_eq!(roster.resolve("A", "Noa Katz", "f.xlsx"), Some("U1".to_string()));
        assert!(!roster.has_unresolved());
    }

    #[test]
    fn resolve_by_first_token() {
        let mut roster = Roster::new(vec![entry("U1", "A", "Noa Katz")]);
        assert_eq!(roster.resolve("A", "Noa", "f.xlsx"), Some("U1".to_string()));
        assert!(!roster.has_unresolved());
    }

    #[test]
    fn resolve_requires_matching_team() {
        let mut roster = Roster::new(vec![entry("U1", "A", "Noa Katz")]);
        assert_eq!(roster.resolve("B", "Noa", "f.xlsx"), None);
        assert_eq!(roster.missing().count(), 1);
    }

    #[test]
    fn resolve_missing_records_one_diagnostic() {
        let mut roster = Roster::new(vec![entry("U1", "A", "Noa Katz")]);
        assert_eq!(roster.resolve("A", "Avi", "f.xlsx"), None);
        // The same pair from the same source is reported once.
        assert_eq!(roster.resolve("A", "Avi", "f.xlsx"), None);
        let missing: Vec<&MissingIdentity> = roster.missing().collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].team, "A");
        assert_eq!(missing[0].name, "Avi");
        assert_eq!(missing[0].source, "f.xlsx");
        assert_eq!(roster.collisions().count(), 0);
    }

    #[test]
    fn resolve_collision_lists_all_options() {
        let mut roster = Roster::new(vec![
            entry("U1", "A", "Dana Levi"),
            entry("U2", "A", "Dana Cohen"),
        ]);
        assert_eq!(roster.resolve("A", "Dana", "f.xlsx"), None);
        let collisions: Vec<&IdentityCollision> = roster.collisions().collect();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].options, vec!["U1".to_string(), "U2".to_string()]);
        assert_eq!(roster.missing().count(), 0);
    }

    #[test]
    fn full_name_still_resolves_among_shared_first_names() {
        let mut roster = Roster::new(vec![
            entry("U1", "A", "Dana Levi"),
            entry("U2", "A", "Dana Cohen"),
        ]);
        assert_eq!(
            roster.resolve("A", "Dana Cohen", "f.xlsx"),
            Some("U2".to_string())
        );
        assert!(!roster.has_unresolved());
    }

    #[test]
    fn diagnostics_are_sorted_by_team_then_name() {
        let mut roster = Roster::new(vec![]);
        roster.resolve("B", "Zohar", "f1.xlsx");
        roster.resolve("A", "Yael", "f2.xlsx");
        roster.resolve("A", "Avi", "f1.xlsx");
        let keys: Vec<(String, String)> = roster
            .missing()
            .map(|m| (m.team.clone(), m.name.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("A".to_string(), "Avi".to_string()),
                ("A".to_string(), "Yael".to_string()),
                ("B".to_string(), "Zohar".to_string()),
            ]
        );
    }

    #[test]
    fn display_name_is_first_token_and_idempotent() {
        let roster = Roster::new(vec![entry("U1", "A", "Noa Katz")]);
        assert_eq!(roster.display_name("U1"), "Noa");
        assert_eq!(first_token(first_token("Noa Katz")), first_token("Noa Katz"));
    }

    #[test]
    fn reverse_lookups_on_unknown_identifier_return_empty() {
        let roster = Roster::new(vec![entry("U1", "A", "Noa Katz")]);
        assert_eq!(roster.team_of("U9"), "");
        assert_eq!(roster.display_name("U9"), "");
    }

    #[test]
    fn aggregation_appends_in_encounter_order() {
        let mut roster = Roster::new(vec![entry("U1", "A", "Noa Katz")]);
        let mut agg = Aggregator::new();
        agg.add_record(&mut roster, &record("Noa", "A", "eval1"), "f1.xlsx");
        agg.add_record(&mut roster, &record("Noa Katz", "A", "eval2"), "f2.xlsx");
        let teams = agg.into_teams(&roster);
        let candidates = &teams["A"];
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].identifier, "U1");
        let evaluators: Vec<&str> = candidates[0]
            .evaluations
            .iter()
            .map(|e| e.evaluator_name.as_str())
            .collect();
        assert_eq!(evaluators, vec!["eval1", "eval2"]);
    }

    #[test]
    fn unresolvable_records_are_dropped_from_aggregation() {
        let mut roster = Roster::new(vec![entry("U1", "A", "Noa Katz")]);
        let mut agg = Aggregator::new();
        agg.add_record(&mut roster, &record("Avi", "A", "eval1"), "f1.xlsx");
        let teams = agg.into_teams(&roster);
        assert!(teams.is_empty());
        assert_eq!(roster.missing().count(), 1);
    }

    #[test]
    fn candidates_sorted_by_identifier_within_team() {
        let mut roster = Roster::new(vec![
            entry("U3", "A", "Gili Bar"),
            entry("U1", "A", "Noa Katz"),
            entry("U2", "B", "Dana Levi"),
        ]);
        let mut agg = Aggregator::new();
        // Encounter order deliberately not the identifier order.
        agg.add_record(&mut roster, &record("Gili", "A", "eval1"), "f.xlsx");
        agg.add_record(&mut roster, &record("Dana", "B", "eval1"), "f.xlsx");
        agg.add_record(&mut roster, &record("Noa", "A", "eval1"), "f.xlsx");
        let teams = agg.into_teams(&roster);
        let ids: Vec<&str> = teams["A"].iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["U1", "U3"]);
        assert_eq!(teams["B"].len(), 1);
    }

    #[test]
    fn axis_accessors_cover_all_fields() {
        let mut e = evaluation("eval1", "Solution");
        e.leader = Attribute {
            num: "5".to_string(),
            text: "strong".to_string(),
        };
        assert_eq!(Axis::Leader.of(&e).num, "5");
        let names: Vec<&str> = Axis::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec!["learning_ability", "personal", "interpersonal", "leader", "summary"]
        );
    }
}
