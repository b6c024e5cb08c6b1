//! Agents of the debate: two debaters, the memory summarizer, and the judge.
//!
//! All four share one `TextGenerator`; `AgentSet` wires them together.

pub mod debater;
pub mod judge;
pub mod memory;

use std::sync::Arc;

use coordination::debate::ParticipantRole;

use crate::config::ProviderConfig;
use crate::errors::DebateError;
use crate::generator::{RigGenerator, TextGenerator};

pub use debater::Debater;
pub use judge::Judge;
pub use memory::MemorySummarizer;

/// Every agent needed for one debate run.
pub struct AgentSet {
    pub scientist: Debater,
    pub philosopher: Debater,
    pub memory: MemorySummarizer,
    pub judge: Judge,
}

impl AgentSet {
    /// Build all agents over a shared generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            scientist: Debater::new(ParticipantRole::Scientist, generator.clone()),
            philosopher: Debater::new(ParticipantRole::Philosopher, generator.clone()),
            memory: MemorySummarizer::new(generator.clone()),
            judge: Judge::new(generator),
        }
    }

    /// Build all agents over a rig-backed generator for `provider`.
    pub fn from_provider(provider: &ProviderConfig) -> Result<Self, DebateError> {
        let generator = RigGenerator::new(provider)?;
        Ok(Self::new(Arc::new(generator)))
    }

    pub fn debater(&self, role: ParticipantRole) -> &Debater {
        match role {
            ParticipantRole::Scientist => &self.scientist,
            ParticipantRole::Philosopher => &self.philosopher,
        }
    }
}
