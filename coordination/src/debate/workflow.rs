//! Debate workflow state machine: nodes, turn policy, and legal transition guards.
//!
//! A single round counter drives every routing decision:
//!
//! ```text
//! Start → Speaker(opening)
//! Speaker(_) → Judge            if round >= round_limit
//! Speaker(_) → Memory           otherwise
//! Memory → Speaker(other)       if round is odd
//! Memory → Speaker(opening)     if round is even
//! Judge → Done
//! ```
//!
//! The limit check is identical after either persona's turn, so with an odd
//! limit the debate ends on the opening persona's turn.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::state::ParticipantRole;

/// Default number of arguments before the judge takes over.
pub const DEFAULT_ROUND_LIMIT: u32 = 8;

/// A node of the debate workflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateNode {
    /// Topic received, nothing has happened yet.
    Start,
    /// A persona is producing one argument.
    Speaker(ParticipantRole),
    /// The running summary is being refreshed.
    Memory,
    /// The judge is adjudicating the full transcript.
    Judge,
    /// Terminal.
    Done,
}

impl DebateNode {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for DebateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Speaker(role) => write!(f, "Speaker({role})"),
            Self::Memory => write!(f, "Memory"),
            Self::Judge => write!(f, "Judge"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// Round limit and alternation parity for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnPolicy {
    /// Round count at which the judge takes over.
    pub round_limit: u32,
    /// Persona that speaks first and therefore owns the odd rounds.
    pub opening_role: ParticipantRole,
}

impl Default for TurnPolicy {
    fn default() -> Self {
        Self {
            round_limit: DEFAULT_ROUND_LIMIT,
            opening_role: ParticipantRole::Scientist,
        }
    }
}

impl TurnPolicy {
    pub fn validate(&self) -> Result<(), String> {
        if self.round_limit == 0 {
            return Err("round_limit must be > 0".to_string());
        }
        Ok(())
    }

    /// Route after a speaker turn that left the counter at `round`.
    pub fn after_speaker(&self, round: u32) -> DebateNode {
        if round >= self.round_limit {
            DebateNode::Judge
        } else {
            DebateNode::Memory
        }
    }

    /// Route after a memory step with the counter at `round`.
    pub fn after_memory(&self, round: u32) -> DebateNode {
        if round % 2 == 1 {
            DebateNode::Speaker(self.opening_role.other())
        } else {
            DebateNode::Speaker(self.opening_role)
        }
    }

    /// The node that follows `node`, or `None` once terminal.
    pub fn next(&self, node: DebateNode, round: u32) -> Option<DebateNode> {
        match node {
            DebateNode::Start => Some(DebateNode::Speaker(self.opening_role)),
            DebateNode::Speaker(_) => Some(self.after_speaker(round)),
            DebateNode::Memory => Some(self.after_memory(round)),
            DebateNode::Judge => Some(DebateNode::Done),
            DebateNode::Done => None,
        }
    }
}

/// Legal edges of the workflow graph.
pub fn is_legal_transition(from: DebateNode, to: DebateNode) -> bool {
    use DebateNode::*;

    matches!(
        (from, to),
        (Start, Speaker(_))
            | (Speaker(_), Memory)
            | (Speaker(_), Judge)
            | (Memory, Speaker(_))
            | (Judge, Done)
    )
}

/// A single recorded transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: DebateNode,
    pub to: DebateNode,
    /// Round counter at the time of the transition.
    pub round: u32,
    /// Milliseconds since the state machine was created.
    pub elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Error returned when an illegal transition is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal workflow transition: {from} → {to}")]
pub struct IllegalTransition {
    pub from: DebateNode,
    pub to: DebateNode,
}

/// Workflow state machine for one debate run.
///
/// Tracks the current node, enforces legal edges, and keeps a full
/// transition log for diagnostics.
pub struct StateMachine {
    policy: TurnPolicy,
    current: DebateNode,
    created_at: Instant,
    transitions: Vec<TransitionRecord>,
}

impl StateMachine {
    /// Create a state machine at `Start`.
    pub fn new(policy: TurnPolicy) -> Self {
        Self {
            policy,
            current: DebateNode::Start,
            created_at: Instant::now(),
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> DebateNode {
        self.current
    }

    pub fn policy(&self) -> &TurnPolicy {
        &self.policy
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    /// Move to `to` if the edge is legal, recording the transition.
    pub fn advance(
        &mut self,
        to: DebateNode,
        round: u32,
        reason: Option<&str>,
    ) -> Result<(), IllegalTransition> {
        if !is_legal_transition(self.current, to) {
            return Err(IllegalTransition {
                from: self.current,
                to,
            });
        }

        let record = TransitionRecord {
            from: self.current,
            to,
            round,
            elapsed_ms: self.created_at.elapsed().as_millis() as u64,
            reason: reason.map(String::from),
        };

        tracing::debug!(from = %self.current, to = %to, round, "Workflow transition");

        self.transitions.push(record);
        self.current = to;
        Ok(())
    }

    /// Follow the turn policy from the current node.
    pub fn step(&mut self, round: u32) -> Result<DebateNode, IllegalTransition> {
        let to = self
            .policy
            .next(self.current, round)
            .ok_or(IllegalTransition {
                from: self.current,
                to: self.current,
            })?;
        self.advance(to, round, None)?;
        Ok(to)
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// Summary of the path taken so far.
    pub fn summary(&self) -> String {
        let path: Vec<String> = self.transitions.iter().map(|t| t.to.to_string()).collect();
        let mut line = format!(
            "{} → {} ({}ms, {} transitions)",
            DebateNode::Start,
            self.current,
            self.created_at.elapsed().as_millis(),
            self.transitions.len(),
        );
        if !path.is_empty() {
            line.push_str(&format!(" [{}]", path.join(" → ")));
        }
        line
    }
}
