//! Debate error taxonomy.
//!
//! Every variant except `Generation` is raised before or between port calls;
//! all of them abort the run. A judge response without a winner declaration
//! is not an error (see `coordination::debate::verdict`).

use coordination::debate::{IllegalTransition, StateError, TurnViolation};
use thiserror::Error;

/// Failure of a single text-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request itself failed (network, provider, auth).
    #[error("request failed: {0}")]
    Request(String),
    /// The provider answered with nothing usable.
    #[error("empty response")]
    EmptyResponse,
}

/// Pipeline stage a generation request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Debater,
    Memory,
    Judge,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debater => write!(f, "debater"),
            Self::Memory => write!(f, "memory"),
            Self::Judge => write!(f, "judge"),
        }
    }
}

/// Unified error for a debate run.
#[derive(Debug, Error)]
pub enum DebateError {
    /// Required credential or setting missing or invalid at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The topic could not be read from the operator.
    #[error("Input error: {0}")]
    Input(String),

    /// The operator supplied a blank topic.
    #[error("debate topic must not be empty")]
    EmptyTopic,

    /// Alternation or repeated-argument guardrail tripped.
    #[error(transparent)]
    Turn(#[from] TurnViolation),

    /// The text-generation port failed; never retried.
    #[error("generation failed during {stage} step: {source}")]
    Generation {
        stage: Stage,
        #[source]
        source: GenerationError,
    },

    /// Controller tried to leave the workflow graph.
    #[error(transparent)]
    Transition(#[from] IllegalTransition),

    /// Verdict written twice.
    #[error(transparent)]
    State(#[from] StateError),
}

impl DebateError {
    pub fn generation(stage: Stage, source: GenerationError) -> Self {
        Self::Generation { stage, source }
    }

    /// Stable snake_case label for logs and exit messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Input(_) => "input",
            Self::EmptyTopic => "empty_topic",
            Self::Turn(TurnViolation::TurnOrder { .. }) => "turn_order",
            Self::Turn(TurnViolation::DuplicateArgument { .. }) => "duplicate_argument",
            Self::Generation { .. } => "generation_port",
            Self::Transition(_) => "illegal_transition",
            Self::State(_) => "state",
        }
    }

    /// Process exit code: 2 for startup problems, 1 for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Input(_) => 2,
            _ => 1,
        }
    }
}
