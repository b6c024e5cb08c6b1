//! Debate protocol: Scientist vs Philosopher with running memory and a judge.
//!
//! Deterministic core of the debate: no inference, no I/O. The agents crate
//! drives these types from its controller.
//!
//! # Debate Flow
//!
//! ```text
//! Start → Speaker(opening) ─┬─ round >= limit → Judge → Done
//!              ▲            └─ otherwise ──────→ Memory
//!              │                                   │
//!              └──── Speaker(by round parity) ◄────┘
//! ```
//!
//! Every speaker turn is preceded by `guardrails::validate_turn`; any
//! violation halts the run.

pub mod guardrails;
pub mod render;
pub mod state;
pub mod verdict;
pub mod workflow;

pub use guardrails::{validate_turn, TurnViolation};
pub use render::{render_transcript, workflow_dot};
pub use state::{
    ArgumentRecord, DebateState, ParticipantRole, StateError, Winner, MEMORY_SENTINEL,
};
pub use verdict::{parse_winner, Verdict};
pub use workflow::{
    is_legal_transition, DebateNode, IllegalTransition, StateMachine, TransitionRecord,
    TurnPolicy, DEFAULT_ROUND_LIMIT,
};
