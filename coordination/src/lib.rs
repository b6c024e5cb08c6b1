//! Debate coordination library.
//!
//! Deterministic pieces of a two-persona debate:
//! - turn-taking workflow state machine with an auditable transition log
//! - turn guardrails (alternation, no verbatim repeats)
//! - judge verdict parsing with an `Undecided` fallback
//! - transcript and workflow-diagram rendering
//!
//! Text generation lives in `debate-agents`; nothing here performs I/O.

pub mod debate;

pub use debate::{
    validate_turn, ArgumentRecord, DebateNode, DebateState, ParticipantRole, StateMachine,
    TurnPolicy, TurnViolation, Verdict, Winner,
};
