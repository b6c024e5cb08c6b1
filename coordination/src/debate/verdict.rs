//! Judge verdict parsing.
//!
//! The judge is asked to declare `Winner: Scientist` or `Winner: Philosopher`
//! verbatim. Anything else parses as `Undecided`; a missing declaration is a
//! normal outcome, not an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::state::{ParticipantRole, Winner};

static WINNER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Winner:\s*(Scientist|Philosopher)").unwrap());

/// Extract the declared winner from a judge response.
///
/// Case-insensitive; the first declaration wins.
pub fn parse_winner(response: &str) -> Winner {
    WINNER_PATTERN
        .captures(response)
        .and_then(|caps| caps.get(1))
        .and_then(|m| role_from_name(m.as_str()))
        .map(Winner::from)
        .unwrap_or(Winner::Undecided)
}

fn role_from_name(name: &str) -> Option<ParticipantRole> {
    ParticipantRole::ALL
        .into_iter()
        .find(|role| role.label().eq_ignore_ascii_case(name))
}

/// Structured judge output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub winner: Winner,
    /// Full judge response, kept whether or not a winner was found.
    pub summary: String,
    /// Whether the response contained a recognizable declaration.
    pub matched: bool,
}

impl Verdict {
    pub fn from_response(response: &str) -> Self {
        let winner = parse_winner(response);
        Self {
            winner,
            summary: response.to_string(),
            matched: winner != Winner::Undecided,
        }
    }
}
