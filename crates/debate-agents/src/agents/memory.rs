//! Memory summarizer: compresses the transcript into a running digest.

use std::sync::Arc;

use coordination::debate::{DebateState, MEMORY_SENTINEL};
use tracing::info;

use crate::errors::{DebateError, Stage};
use crate::generator::TextGenerator;
use crate::prompts;

pub struct MemorySummarizer {
    generator: Arc<dyn TextGenerator>,
}

impl MemorySummarizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Overwrite `state.memory` with a fresh summary of the full history.
    ///
    /// With no history the sentinel is stored and the port is not called.
    pub async fn summarize(&self, state: &mut DebateState) -> Result<String, DebateError> {
        if state.history.is_empty() {
            state.overwrite_memory(MEMORY_SENTINEL);
            return Ok(MEMORY_SENTINEL.to_string());
        }

        let instruction = prompts::memory_instruction(&state.transcript_text());
        let summary = self
            .generator
            .generate(&instruction)
            .await
            .map_err(|e| DebateError::generation(Stage::Memory, e))?;
        let summary = summary.trim().to_string();

        info!(round = state.round, "[Memory] Updated summary: {summary}");
        state.overwrite_memory(summary.clone());
        Ok(summary)
    }
}
