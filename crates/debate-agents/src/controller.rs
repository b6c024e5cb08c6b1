//! Debate controller: drives the workflow state machine from `Start` to `Done`.
//!
//! Strictly sequential: each node runs to completion before the next one is
//! chosen, and any error aborts the whole run. A run cannot be resumed; every
//! call to `run` starts from a fresh `DebateState`.

use coordination::debate::{
    validate_turn, ArgumentRecord, DebateNode, DebateState, ParticipantRole, StateMachine,
    TurnPolicy, Verdict,
};
use tracing::{error, info, info_span, Instrument};

use crate::agents::AgentSet;
use crate::errors::DebateError;
use crate::sink::DebateSink;

pub struct DebateController {
    policy: TurnPolicy,
    agents: AgentSet,
    sink: Box<dyn DebateSink>,
}

impl DebateController {
    pub fn new(policy: TurnPolicy, agents: AgentSet, sink: Box<dyn DebateSink>) -> Self {
        Self {
            policy,
            agents,
            sink,
        }
    }

    pub fn policy(&self) -> &TurnPolicy {
        &self.policy
    }

    /// Run a complete debate on `topic` and return the concluded state.
    pub async fn run(&self, topic: &str) -> Result<DebateState, DebateError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DebateError::EmptyTopic);
        }
        self.policy.validate().map_err(DebateError::Configuration)?;

        let mut state = DebateState::new(topic);
        let span = info_span!("debate", run_id = %state.id);

        async {
            info!(topic = %state.topic, round_limit = self.policy.round_limit, "Debate Topic");
            self.sink.debate_started(&state.topic);

            let mut machine = StateMachine::new(self.policy);
            if let Err(e) = self.drive(&mut machine, &mut state).await {
                error!(kind = e.kind(), node = %machine.current(), "Debate aborted: {e}");
                return Err(e);
            }

            info!(path = %machine.summary(), "Debate finished");
            Ok(state)
        }
        .instrument(span)
        .await
    }

    async fn drive(
        &self,
        machine: &mut StateMachine,
        state: &mut DebateState,
    ) -> Result<(), DebateError> {
        while !machine.is_terminal() {
            match machine.step(state.round)? {
                DebateNode::Speaker(role) => {
                    self.speak(state, role).await?;
                }
                DebateNode::Memory => {
                    self.remember(state).await?;
                }
                DebateNode::Judge => {
                    self.adjudicate(state).await?;
                }
                DebateNode::Start | DebateNode::Done => {}
            }
        }
        Ok(())
    }

    /// Validate the turn for `role`, then let that debater speak.
    ///
    /// On a guardrail violation nothing in `state` changes.
    pub async fn speak(
        &self,
        state: &mut DebateState,
        role: ParticipantRole,
    ) -> Result<ArgumentRecord, DebateError> {
        validate_turn(&state.history, role)?;
        info!(role = %role, round = state.round + 1, "--- {role} speaking ---");

        let record = self.agents.debater(role).speak(state).await?;
        self.sink.argument(&record);
        Ok(record)
    }

    /// Refresh the running summary.
    pub async fn remember(&self, state: &mut DebateState) -> Result<String, DebateError> {
        let summary = self.agents.memory.summarize(state).await?;
        self.sink.memory_updated(&summary);
        Ok(summary)
    }

    /// Hand the transcript to the judge and record the verdict.
    pub async fn adjudicate(&self, state: &mut DebateState) -> Result<Verdict, DebateError> {
        self.sink.judging();
        let verdict = self.agents.judge.adjudicate(state).await?;
        self.sink.verdict(&verdict);
        Ok(verdict)
    }
}
