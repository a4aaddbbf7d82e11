//! Step strategies: the unit of work the loop drives once per iteration.

use async_trait::async_trait;
use thiserror::Error;

use super::context::AgentContext;

/// Step result when reasoning decided no action is needed.
pub const THINKING_COMPLETE: &str = "Thinking complete - no action needed";

/// A failure of one phase of a step.
///
/// The loop contains reasoning failures and keeps going; action failures
/// end the run in the `Error` state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("{message}")]
    Reasoning { message: String },

    #[error("{message}")]
    Action { message: String },
}

impl StepError {
    pub fn reasoning(message: impl Into<String>) -> Self {
        Self::Reasoning {
            message: message.into(),
        }
    }

    pub fn action(message: impl Into<String>) -> Self {
        Self::Action {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Reasoning { message } | Self::Action { message } => message,
        }
    }

    pub fn is_contained(&self) -> bool {
        matches!(self, Self::Reasoning { .. })
    }

    /// Step line recorded for a contained failure
    pub fn contained_result(&self) -> String {
        format!("Step execution failed: {}", self.message())
    }
}

impl From<crate::Error> for StepError {
    fn from(err: crate::Error) -> Self {
        Self::action(err.to_string())
    }
}

/// One iteration of an agent run.
#[async_trait]
pub trait Step: Send {
    async fn step(&mut self, ctx: &mut AgentContext) -> Result<String, StepError>;

    /// Called exactly once when a run ends, however it ends.
    fn cleanup(&mut self, _ctx: &mut AgentContext) {}
}

/// A step split into a reasoning phase and an optional acting phase.
#[async_trait]
pub trait ReAct: Send {
    /// Decide whether an action is needed. May append to history.
    async fn think(&mut self, ctx: &mut AgentContext) -> Result<bool, StepError>;

    /// Only called after `think` returned `true`.
    async fn act(&mut self, ctx: &mut AgentContext) -> Result<String, StepError>;

    fn cleanup(&mut self, _ctx: &mut AgentContext) {}
}

/// Adapts a [`ReAct`] strategy into a [`Step`].
///
/// Any `think` failure is reported as a reasoning failure and any `act`
/// failure as an action failure, whatever the strategy tagged it with.
#[derive(Debug, Clone, Default)]
pub struct ReActStep<R> {
    inner: R,
}

impl<R: ReAct> ReActStep<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[async_trait]
impl<R: ReAct> Step for ReActStep<R> {
    async fn step(&mut self, ctx: &mut AgentContext) -> Result<String, StepError> {
        let should_act = self
            .inner
            .think(ctx)
            .await
            .map_err(|e| StepError::reasoning(e.message()))?;

        if !should_act {
            return Ok(THINKING_COMPLETE.to_string());
        }

        self.inner
            .act(ctx)
            .await
            .map_err(|e| StepError::action(e.message()))
    }

    fn cleanup(&mut self, ctx: &mut AgentContext) {
        self.inner.cleanup(ctx);
    }
}
