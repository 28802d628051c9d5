use std::fmt;
use std::time::Duration;

/// How a single atom fared during an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomOutcome {
    /// The context value lies inside the atom's pattern.
    Matched,
    /// The context value has the right type but lies outside the pattern.
    Rejected,
    /// The context has no value for the field.
    Missing,
    /// The context value's type differs from the field's declared type.
    TypeMismatch,
}

impl AtomOutcome {
    #[must_use]
    pub fn is_match(self) -> bool {
        self == AtomOutcome::Matched
    }
}

impl fmt::Display for AtomOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AtomOutcome::Matched => "matched",
            AtomOutcome::Rejected => "rejected",
            AtomOutcome::Missing => "missing",
            AtomOutcome::TypeMismatch => "type mismatch",
        };
        f.write_str(s)
    }
}

/// Detailed evaluation report returned by
/// [`CompiledRule::evaluate_detailed()`](super::rule::CompiledRule::evaluate_detailed).
///
/// Lists the atoms actually visited, in visiting order; atoms skipped by
/// short-circuiting do not appear.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    result: bool,
    visited: Vec<(String, AtomOutcome)>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(result: bool, visited: Vec<(String, AtomOutcome)>, duration: Duration) -> Self {
        Self {
            result,
            visited,
            duration,
        }
    }

    /// The evaluation result, same as [`CompiledRule::evaluate()`](super::rule::CompiledRule::evaluate).
    #[must_use]
    pub fn result(&self) -> bool {
        self.result
    }

    /// Field names and outcomes of the visited atoms.
    #[must_use]
    pub fn visited(&self) -> &[(String, AtomOutcome)] {
        &self.visited
    }

    /// Outcome of the first visit to `field`, if it was visited at all.
    #[must_use]
    pub fn outcome_of(&self, field: &str) -> Option<AtomOutcome> {
        self.visited
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, outcome)| *outcome)
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result: {}, visited: [", self.result)?;
        for (i, (field, outcome)) in self.visited.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {outcome}")?;
        }
        write!(f, "], duration: {:?}", self.duration)
    }
}
