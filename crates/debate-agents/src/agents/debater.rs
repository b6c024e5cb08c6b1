//! Debater agent: one persona, one argument per turn.

use std::sync::Arc;

use coordination::debate::{ArgumentRecord, DebateState, ParticipantRole};
use tracing::info;

use crate::errors::{DebateError, Stage};
use crate::generator::TextGenerator;
use crate::prompts;

/// A debating persona bound to the generation port.
///
/// Turn validation is the controller's job; `speak` assumes it already passed.
pub struct Debater {
    role: ParticipantRole,
    generator: Arc<dyn TextGenerator>,
}

impl Debater {
    pub fn new(role: ParticipantRole, generator: Arc<dyn TextGenerator>) -> Self {
        Self { role, generator }
    }

    pub fn role(&self) -> ParticipantRole {
        self.role
    }

    /// Produce one argument: bump the round, call the port once, append the record.
    ///
    /// The round counter is incremented before the port call, so a failed call
    /// leaves `round` one ahead of `history`; the run is aborted in that case.
    pub async fn speak(&self, state: &mut DebateState) -> Result<ArgumentRecord, DebateError> {
        state.round += 1;
        let round = state.round;
        info!(role = %self.role, round, "Debater speaking");

        let instruction = prompts::debater_instruction(self.role, &state.topic, &state.memory);
        let response = self
            .generator
            .generate(&instruction)
            .await
            .map_err(|e| DebateError::generation(Stage::Debater, e))?;

        let record = ArgumentRecord::new(round, self.role, response.trim());
        info!("{}", record.display_line());
        state.push_argument(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::function;

    use super::*;
    use crate::errors::GenerationError;

    mock! {
        pub Port {}

        #[async_trait]
        impl TextGenerator for Port {
            async fn generate(&self, instruction: &str) -> Result<String, GenerationError>;
        }
    }

    #[tokio::test]
    async fn speak_appends_prefixed_record_and_bumps_round() {
        let mut port = MockPort::new();
        port.expect_generate()
            .with(function(|i: &str| i.contains("You are a Scientist")))
            .times(1)
            .returning(|_| Ok("  Measurements settle this.  ".to_string()));

        let debater = Debater::new(ParticipantRole::Scientist, Arc::new(port));
        let mut state = DebateState::new("Is light a wave?");

        let record = debater.speak(&mut state).await.unwrap();
        assert_eq!(state.round, 1);
        assert_eq!(state.history.len(), 1);
        assert_eq!(record.text, "Measurements settle this.");
        assert_eq!(record.display_line(), "[Round 1] Scientist: Measurements settle this.");
    }

    #[tokio::test]
    async fn speak_uses_current_memory_as_context() {
        let mut port = MockPort::new();
        port.expect_generate()
            .with(function(|i: &str| i.contains("Context: Earlier, the scientist cited data.")))
            .times(1)
            .returning(|_| Ok("Data is not wisdom.".to_string()));

        let debater = Debater::new(ParticipantRole::Philosopher, Arc::new(port));
        let mut state = DebateState::new("t");
        state.round = 1;
        state.overwrite_memory("Earlier, the scientist cited data.");

        let record = debater.speak(&mut state).await.unwrap();
        assert_eq!(record.round, 2);
        assert_eq!(record.role, ParticipantRole::Philosopher);
    }

    #[tokio::test]
    async fn port_failure_propagates_without_appending() {
        let mut port = MockPort::new();
        port.expect_generate()
            .times(1)
            .returning(|_| Err(GenerationError::Request("503".into())));

        let debater = Debater::new(ParticipantRole::Scientist, Arc::new(port));
        let mut state = DebateState::new("t");

        let err = debater.speak(&mut state).await.unwrap_err();
        assert_eq!(err.kind(), "generation_port");
        assert!(state.history.is_empty());
    }
}
