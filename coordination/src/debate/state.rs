//! Debate state: personas, argument records, and the single mutable run record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory value reported when no argument has been recorded yet.
pub const MEMORY_SENTINEL: &str = "No debate history yet.";

/// A debating persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// Argues from facts, evidence, and logic.
    Scientist,
    /// Argues from reasoning, ethics, and philosophy.
    Philosopher,
}

impl ParticipantRole {
    /// Both personas, in canonical order.
    pub const ALL: [ParticipantRole; 2] = [Self::Scientist, Self::Philosopher];

    /// Canonical capitalized role name, as it appears in transcripts and verdicts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Scientist => "Scientist",
            Self::Philosopher => "Philosopher",
        }
    }

    /// The opposing persona.
    pub fn other(self) -> Self {
        match self {
            Self::Scientist => Self::Philosopher,
            Self::Philosopher => Self::Scientist,
        }
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome declared by the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Scientist,
    Philosopher,
    /// The judge response carried no recognizable winner declaration.
    Undecided,
}

impl Winner {
    pub fn label(self) -> &'static str {
        match self {
            Self::Scientist => "Scientist",
            Self::Philosopher => "Philosopher",
            Self::Undecided => "Undecided",
        }
    }

    /// The winning persona, if one was declared.
    pub fn role(self) -> Option<ParticipantRole> {
        match self {
            Self::Scientist => Some(ParticipantRole::Scientist),
            Self::Philosopher => Some(ParticipantRole::Philosopher),
            Self::Undecided => None,
        }
    }
}

impl From<ParticipantRole> for Winner {
    fn from(role: ParticipantRole) -> Self {
        match role {
            ParticipantRole::Scientist => Self::Scientist,
            ParticipantRole::Philosopher => Self::Philosopher,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One argument produced by one persona in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    /// Round number (1-indexed), equal to the state's round right after the turn.
    pub round: u32,
    /// Persona that produced the argument.
    pub role: ParticipantRole,
    /// Raw argument text as returned by the generator, trimmed.
    pub text: String,
}

impl ArgumentRecord {
    pub fn new(round: u32, role: ParticipantRole, text: impl Into<String>) -> Self {
        Self {
            round,
            role,
            text: text.into(),
        }
    }

    /// Presentation form: `[Round N] Role: text`.
    pub fn display_line(&self) -> String {
        format!("[Round {}] {}: {}", self.round, self.role, self.text)
    }
}

/// Errors from mutating a debate state out of protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The verdict was already recorded; it is set exactly once.
    #[error("debate already concluded with winner {winner}")]
    AlreadyConcluded { winner: Winner },
}

/// The single record threaded through every node of a debate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateState {
    /// Unique run identifier.
    pub id: String,
    /// Debate topic, fixed at creation.
    pub topic: String,
    /// Number of arguments produced so far.
    pub round: u32,
    /// Append-only argument history in round order.
    pub history: Vec<ArgumentRecord>,
    /// Latest running summary. Empty until the first memory step.
    pub memory: String,
    /// Judge's declared winner, set once at the end.
    pub winner: Option<Winner>,
    /// Judge's full response, set together with `winner`.
    pub judge_summary: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concluded_at: Option<DateTime<Utc>>,
}

impl DebateState {
    /// Create a fresh state at round 0.
    pub fn new(topic: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            round: 0,
            history: Vec::new(),
            memory: String::new(),
            winner: None,
            judge_summary: None,
            started_at: Utc::now(),
            concluded_at: None,
        }
    }

    /// Role of the most recent argument, if any.
    pub fn last_speaker(&self) -> Option<ParticipantRole> {
        self.history.last().map(|r| r.role)
    }

    pub fn push_argument(&mut self, record: ArgumentRecord) {
        self.history.push(record);
    }

    /// Replace the running summary.
    pub fn overwrite_memory(&mut self, summary: impl Into<String>) {
        self.memory = summary.into();
    }

    /// Record the judge's verdict. Fails if a verdict is already present.
    pub fn conclude(&mut self, winner: Winner, summary: impl Into<String>) -> Result<(), StateError> {
        if let Some(existing) = self.winner {
            return Err(StateError::AlreadyConcluded { winner: existing });
        }
        self.winner = Some(winner);
        self.judge_summary = Some(summary.into());
        self.concluded_at = Some(Utc::now());
        Ok(())
    }

    pub fn is_concluded(&self) -> bool {
        self.winner.is_some()
    }

    /// All display lines joined with newlines, in round order.
    pub fn transcript_text(&self) -> String {
        self.history
            .iter()
            .map(ArgumentRecord::display_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Compact status line.
    pub fn status_line(&self) -> String {
        format!(
            "[{}] round {} | {} arguments | winner={}",
            self.id,
            self.round,
            self.history.len(),
            self.winner.map(|w| w.label()).unwrap_or("pending")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = DebateState::new("Is AI conscious?");
        assert_eq!(state.topic, "Is AI conscious?");
        assert_eq!(state.round, 0);
        assert!(state.history.is_empty());
        assert!(state.memory.is_empty());
        assert!(state.winner.is_none());
        assert!(state.judge_summary.is_none());
        assert!(state.last_speaker().is_none());
        assert!(!state.is_concluded());
    }

    #[test]
    fn test_role_labels_and_other() {
        assert_eq!(ParticipantRole::Scientist.label(), "Scientist");
        assert_eq!(ParticipantRole::Philosopher.to_string(), "Philosopher");
        assert_eq!(ParticipantRole::Scientist.other(), ParticipantRole::Philosopher);
        assert_eq!(ParticipantRole::Philosopher.other(), ParticipantRole::Scientist);
    }

    #[test]
    fn test_display_line_format() {
        let record = ArgumentRecord::new(3, ParticipantRole::Scientist, "Data beats intuition.");
        assert_eq!(record.display_line(), "[Round 3] Scientist: Data beats intuition.");
    }

    #[test]
    fn test_conclude_sets_verdict_once() {
        let mut state = DebateState::new("topic");
        state
            .conclude(Winner::Philosopher, "Winner: Philosopher")
            .unwrap();
        assert_eq!(state.winner, Some(Winner::Philosopher));
        assert_eq!(state.judge_summary.as_deref(), Some("Winner: Philosopher"));
        assert!(state.concluded_at.is_some());

        let err = state.conclude(Winner::Scientist, "again").unwrap_err();
        assert_eq!(
            err,
            StateError::AlreadyConcluded {
                winner: Winner::Philosopher
            }
        );
        assert_eq!(state.judge_summary.as_deref(), Some("Winner: Philosopher"));
    }

    #[test]
    fn test_memory_is_overwritten() {
        let mut state = DebateState::new("topic");
        state.overwrite_memory("first");
        state.overwrite_memory("second");
        assert_eq!(state.memory, "second");
    }

    #[test]
    fn test_transcript_text_in_round_order() {
        let mut state = DebateState::new("topic");
        state.push_argument(ArgumentRecord::new(1, ParticipantRole::Scientist, "a"));
        state.push_argument(ArgumentRecord::new(2, ParticipantRole::Philosopher, "b"));
        assert_eq!(
            state.transcript_text(),
            "[Round 1] Scientist: a\n[Round 2] Philosopher: b"
        );
        assert_eq!(state.last_speaker(), Some(ParticipantRole::Philosopher));
    }

    #[test]
    fn test_winner_from_role() {
        assert_eq!(Winner::from(ParticipantRole::Scientist), Winner::Scientist);
        assert_eq!(Winner::Undecided.role(), None);
        assert_eq!(Winner::Philosopher.role(), Some(ParticipantRole::Philosopher));
    }

    #[test]
    fn test_state_json_roundtrip() {
        let mut state = DebateState::new("topic");
        state.round = 1;
        state.push_argument(ArgumentRecord::new(1, ParticipantRole::Scientist, "a"));
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"scientist\""));
        let parsed: DebateState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.history, state.history);
        assert_eq!(parsed.id, state.id);
    }
}
