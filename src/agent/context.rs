//! Per-run state handed to step strategies.

use std::sync::Arc;

use super::config::AgentConfig;
use super::state::{AgentMetrics, AgentState, ExecutionState};
use crate::types::Message;

/// Message history, step counter and state handle of the current run.
///
/// History is append-only while a run is in progress; it is cleared only
/// when the next run starts. [`state`](Self::state) is this run's own view:
/// once the run has ended it stays terminal even if the agent is reset and
/// started again.
#[derive(Debug)]
pub struct AgentContext {
    config: Arc<AgentConfig>,
    shared: Arc<ExecutionState>,
    generation: u64,
    state: AgentState,
    messages: Vec<Message>,
    current_step: usize,
    metrics: AgentMetrics,
}

impl AgentContext {
    /// A detached context with its own idle state, for driving strategies
    /// outside an [`Agent`](super::Agent).
    pub fn new(config: AgentConfig) -> Self {
        Self::attached(Arc::new(config), Arc::new(ExecutionState::default()))
    }

    pub(crate) fn attached(config: Arc<AgentConfig>, shared: Arc<ExecutionState>) -> Self {
        Self {
            config,
            shared,
            generation: 0,
            state: AgentState::Idle,
            messages: Vec::new(),
            current_step: 0,
            metrics: AgentMetrics::default(),
        }
    }

    /// Reset for the run `generation`, seeded with the user prompt
    pub(crate) fn begin(&mut self, generation: u64, prompt: &str) {
        self.generation = generation;
        self.state = AgentState::Running;
        self.messages.clear();
        self.messages.push(Message::user(prompt));
        self.current_step = 0;
        self.metrics = AgentMetrics::default();
    }

    pub(crate) fn advance(&mut self) -> usize {
        self.current_step += 1;
        self.metrics.record_step();
        self.current_step
    }

    pub(crate) fn fail(&mut self) -> bool {
        if self.state != AgentState::Running {
            return false;
        }
        self.state = AgentState::Error;
        self.shared.fail(self.generation);
        true
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut AgentMetrics {
        &mut self.metrics
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn max_steps(&self) -> usize {
        self.config.max_steps
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn metrics(&self) -> &AgentMetrics {
        &self.metrics
    }

    pub fn record_tool_calls(&mut self, count: usize) {
        self.metrics.record_tool_calls(count);
    }

    /// End the run after the current step. No effect unless running.
    pub fn finish(&mut self) -> bool {
        if self.state != AgentState::Running {
            return false;
        }
        self.state = AgentState::Finished;
        self.shared.finish(self.generation);
        true
    }
}
