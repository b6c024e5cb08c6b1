//! Turn guardrails: alternation and repeated-argument checks.
//!
//! Run by the controller before every speaker turn. A violation is fatal to
//! the run; nothing here mutates history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{ArgumentRecord, ParticipantRole};

/// A broken turn-taking invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TurnViolation {
    /// The persona about to speak also produced the latest argument.
    #[error("invalid turn: {role} spoke twice in a row (previous turn was round {previous_round})")]
    TurnOrder {
        role: ParticipantRole,
        previous_round: u32,
    },
    /// Two arguments in history carry identical text.
    #[error("repeated argument detected: round {round} repeats round {earlier_round} verbatim")]
    DuplicateArgument { round: u32, earlier_round: u32 },
}

/// Check that `expected` may speak next given `history`.
///
/// Alternation is checked before repetition. Duplicate detection is an exact
/// match on the raw argument text, so two turns differing only by round
/// number still count as a repeat.
pub fn validate_turn(
    history: &[ArgumentRecord],
    expected: ParticipantRole,
) -> Result<(), TurnViolation> {
    if let Some(last) = history.last() {
        if last.role == expected {
            return Err(TurnViolation::TurnOrder {
                role: expected,
                previous_round: last.round,
            });
        }
    }

    if let Some((round, earlier_round)) = first_duplicate(history) {
        return Err(TurnViolation::DuplicateArgument {
            round,
            earlier_round,
        });
    }

    Ok(())
}

/// Round numbers of the first repeated argument and the record it repeats.
fn first_duplicate(history: &[ArgumentRecord]) -> Option<(u32, u32)> {
    let mut seen: HashMap<&str, u32> = HashMap::with_capacity(history.len());
    for record in history {
        if let Some(&earlier) = seen.get(record.text.as_str()) {
            return Some((record.round, earlier));
        }
        seen.insert(record.text.as_str(), record.round);
    }
    None
}
