//! Agent core structure and construction.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::config::AgentConfig;
use super::context::AgentContext;
use super::state::{AgentMetrics, AgentState, ExecutionState};
use super::step::Step;
use crate::memory::ChatMemory;
use crate::types::Message;

/// The strategy and the context it operates on, guarded together so only
/// the active run touches either.
pub(crate) struct AgentCore<S> {
    pub(crate) strategy: S,
    pub(crate) ctx: AgentContext,
}

pub(crate) struct AgentInner<S> {
    pub(crate) config: Arc<AgentConfig>,
    pub(crate) state: Arc<ExecutionState>,
    pub(crate) core: Mutex<AgentCore<S>>,
}

/// A bounded-step agent driving a [`Step`] strategy.
///
/// Cloning is cheap and yields a handle to the same agent: one conversation,
/// one state, one run at a time.
pub struct Agent<S> {
    pub(crate) inner: Arc<AgentInner<S>>,
}

impl<S> Clone for Agent<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Step + 'static> Agent<S> {
    pub fn new(config: AgentConfig, strategy: S) -> Self {
        let config = Arc::new(config);
        let state = Arc::new(ExecutionState::default());
        let ctx = AgentContext::attached(Arc::clone(&config), Arc::clone(&state));

        Self {
            inner: Arc::new(AgentInner {
                config,
                state,
                core: Mutex::new(AgentCore { strategy, ctx }),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn state(&self) -> AgentState {
        self.inner.state.get()
    }

    /// Return a finished or failed agent to `Idle` so it can run again.
    pub fn reset(&self) -> crate::Result<()> {
        self.inner.state.reset().map_err(|state| {
            crate::Error::InvalidState(format!("cannot reset agent while {}", state))
        })
    }

    /// History of the most recent run. Waits for a run in progress.
    pub async fn history(&self) -> Vec<Message> {
        self.inner.core.lock().await.ctx.messages().to_vec()
    }

    /// Metrics of the most recent run. Waits for a run in progress.
    pub async fn last_metrics(&self) -> AgentMetrics {
        self.inner.core.lock().await.ctx.metrics().clone()
    }

    /// Inspect the strategy between runs.
    pub async fn with_strategy<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.core.lock().await.strategy)
    }

    /// Append the most recent run's history to a memory store.
    ///
    /// Returns the number of messages written.
    pub async fn save_history(
        &self,
        memory: &dyn ChatMemory,
        conversation_id: &str,
    ) -> crate::Result<usize> {
        let history = self.history().await;
        let count = history.len();
        memory.append(conversation_id, history).await?;
        Ok(count)
    }
}

impl<S> fmt::Debug for Agent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.inner.config.name)
            .field("state", &self.inner.state.get())
            .field("max_steps", &self.inner.config.max_steps)
            .finish()
    }
}
