//! Judge agent: adjudicates the full transcript once the round limit is hit.

use std::sync::Arc;

use coordination::debate::{DebateState, Verdict};
use tracing::{info, warn};

use crate::errors::{DebateError, Stage};
use crate::generator::TextGenerator;
use crate::prompts;

pub struct Judge {
    generator: Arc<dyn TextGenerator>,
}

impl Judge {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Ask for summary + winner, parse it, and record the verdict on `state`.
    ///
    /// A response without a `Winner:` line yields `Undecided`, not an error.
    pub async fn adjudicate(&self, state: &mut DebateState) -> Result<Verdict, DebateError> {
        info!("[Judge] Reviewing debate...");
        let instruction = prompts::judge_instruction(&state.topic, &state.transcript_text());
        let response = self
            .generator
            .generate(&instruction)
            .await
            .map_err(|e| DebateError::generation(Stage::Judge, e))?;

        let verdict = Verdict::from_response(&response);
        if !verdict.matched {
            warn!("Judge response contained no winner declaration; verdict is Undecided");
        }
        info!(winner = %verdict.winner, "[Judge] {}", verdict.summary);

        state.conclude(verdict.winner, verdict.summary.clone())?;
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use coordination::debate::{ArgumentRecord, ParticipantRole, Winner};

    use super::*;
    use crate::errors::GenerationError;

    struct Fixed(&'static str);

    #[async_trait]
    impl TextGenerator for Fixed {
        async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
            assert!(instruction.contains("[Round 1] Scientist: evidence"));
            Ok(self.0.to_string())
        }
    }

    fn debated_state() -> DebateState {
        let mut state = DebateState::new("t");
        state.round = 1;
        state.push_argument(ArgumentRecord::new(1, ParticipantRole::Scientist, "evidence"));
        state
    }

    #[tokio::test]
    async fn declared_winner_is_recorded() {
        let judge = Judge::new(Arc::new(Fixed("Close debate.\nwinner: SCIENTIST\nBecause data.")));
        let mut state = debated_state();

        let verdict = judge.adjudicate(&mut state).await.unwrap();
        assert_eq!(verdict.winner, Winner::Scientist);
        assert_eq!(state.winner, Some(Winner::Scientist));
        assert_eq!(
            state.judge_summary.as_deref(),
            Some("Close debate.\nwinner: SCIENTIST\nBecause data.")
        );
    }

    #[tokio::test]
    async fn missing_winner_is_undecided_not_error() {
        let judge = Judge::new(Arc::new(Fixed("Both made good points.")));
        let mut state = debated_state();

        let verdict = judge.adjudicate(&mut state).await.unwrap();
        assert_eq!(verdict.winner, Winner::Undecided);
        assert_eq!(state.winner, Some(Winner::Undecided));
        assert_eq!(state.judge_summary.as_deref(), Some("Both made good points."));
    }

    #[tokio::test]
    async fn second_adjudication_is_rejected() {
        let judge = Judge::new(Arc::new(Fixed("Winner: Philosopher")));
        let mut state = debated_state();
        judge.adjudicate(&mut state).await.unwrap();

        let err = judge.adjudicate(&mut state).await.unwrap_err();
        assert_eq!(err.kind(), "state");
        assert_eq!(state.winner, Some(Winner::Philosopher));
    }
}
