//! Gathering vs. assessing decision.

use serde::{Deserialize, Serialize};

/// Default number of user turns before the engine asks for a full assessment.
///
/// A fixed heuristic carried over from the chat flow, not derived from any
/// measured signal; exposed through `triage.assessment_threshold`.
pub const DEFAULT_ASSESSMENT_THRESHOLD: usize = 2;

/// What the engine asks the model for on this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriagePhase {
    /// Too few user turns: ask one or two clarifying questions.
    Gathering,
    /// Enough context (or an emergency): produce an assessment.
    Assessing,
}

impl TriagePhase {
    /// Chooses the phase from the number of user turns in the bounded history.
    pub fn decide(user_turns: usize, threshold: usize, emergency: bool) -> Self {
        if emergency || user_turns >= threshold {
            Self::Assessing
        } else {
            Self::Gathering
        }
    }
}
