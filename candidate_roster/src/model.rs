// ********* Roster data structures ***********

/// One line of the master roster: the authoritative mapping from a stable
/// identifier to the (team, full name) pair that evaluators type by hand.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RosterEntry {
    pub identifier: String,
    pub team: String,
    pub full_name: String,
}

// ******** Evaluation data structures *********

/// A single evaluation attribute, containing a numeric part and a textual part.
///
/// The numeric part is kept as an integer-valued string ("1".."5"), or the
/// empty string when the source cell was not a number.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Attribute {
    pub num: String,
    pub text: String,
}

/// The five scored axes of an evaluation.
///
/// Exporters iterate over [Axis::ALL] and use [Axis::of] instead of
/// addressing the fields of [Evaluation] one by one, so the set of axes is
/// defined in a single place.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Axis {
    LearningAbility,
    Personal,
    Interpersonal,
    Leader,
    Summary,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::LearningAbility,
        Axis::Personal,
        Axis::Interpersonal,
        Axis::Leader,
        Axis::Summary,
    ];

    /// The stable name of the axis, as written in the flat export.
    pub fn name(&self) -> &'static str {
        match self {
            Axis::LearningAbility => "learning_ability",
            Axis::Personal => "personal",
            Axis::Interpersonal => "interpersonal",
            Axis::Leader => "leader",
            Axis::Summary => "summary",
        }
    }

    /// The attribute of the given evaluation along this axis.
    pub fn of<'a>(&self, evaluation: &'a Evaluation) -> &'a Attribute {
        match self {
            Axis::LearningAbility => &evaluation.learning_ability,
            Axis::Personal => &evaluation.personal,
            Axis::Interpersonal => &evaluation.interpersonal,
            Axis::Leader => &evaluation.leader,
            Axis::Summary => &evaluation.summary,
        }
    }
}

/// A single evaluation of one candidate: who made it (the evaluator), in
/// which exercise, and the five scored attributes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Evaluation {
    pub evaluator_name: String,
    pub exercise_name: String,
    pub learning_ability: Attribute,
    pub personal: Attribute,
    pub interpersonal: Attribute,
    pub leader: Attribute,
    pub summary: Attribute,
}

/// A raw record read from one candidate slot of one sheet, before identity
/// resolution. Multiple such records may exist for a single candidate.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawRecord {
    pub candidate_name: String,
    pub team: String,
    pub evaluation: Evaluation,
}

/// All the evaluations of a single resolved candidate.
///
/// Used in team context, so the team name is not carried here.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub identifier: String,
    pub evaluations: Vec<Evaluation>,
}

/// Mapping from team name to the candidates of that team, candidates in
/// ascending identifier order.
pub type Teams = std::collections::BTreeMap<String, Vec<Candidate>>;

// ******** Diagnostics *********

// The derived orderings sort by (team, name) first, which is the order
// required of the end-of-run report.

/// A (team, name) pair that matched no roster entry.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone)]
pub struct MissingIdentity {
    pub team: String,
    pub name: String,
    pub source: String,
}

/// A (team, name) pair that matched more than one roster entry.
///
/// All the matched identifiers are kept so that a human can pick the right
/// one in the source data.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone)]
pub struct IdentityCollision {
    pub team: String,
    pub name: String,
    pub source: String,
    pub options: Vec<String>,
}
