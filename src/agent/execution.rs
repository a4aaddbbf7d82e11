//! The step loop and blocking execution.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::MutexGuard;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::events::{RunEvent, Termination};
use super::executor::{Agent, AgentCore};
use super::state::{AgentState, ExecutionState};
use super::step::Step;

/// Receives run events as the loop produces them.
#[async_trait]
pub(crate) trait EventSink: Send {
    /// Returns `false` once nobody is listening.
    async fn emit(&mut self, event: RunEvent) -> bool;
}

#[async_trait]
impl EventSink for Vec<String> {
    async fn emit(&mut self, event: RunEvent) -> bool {
        self.push(event.to_string());
        true
    }
}

/// Holds the agent in `Running` for one run generation until dropped.
///
/// Dropping it moves the agent to `Finished` only if that same run is still
/// running, so an abandoned run never leaves the agent stuck and an ended run
/// never touches a later one.
pub(crate) struct RunningGuard {
    state: Arc<ExecutionState>,
    generation: u64,
}

impl RunningGuard {
    pub(crate) fn acquire(state: &Arc<ExecutionState>) -> crate::Result<Self> {
        let generation = state
            .try_begin()
            .map_err(|state| crate::Error::AgentBusy { state })?;
        Ok(Self {
            state: Arc::clone(state),
            generation,
        })
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        if self.state.finish(self.generation) {
            debug!(generation = self.generation, "Run abandoned while running");
        }
    }
}

/// Exclusive access to the agent for the duration of one run.
///
/// Dropping it runs the strategy's cleanup, so cleanup happens exactly once
/// on every exit path.
pub(crate) struct ActiveRun<'a, S: Step> {
    core: MutexGuard<'a, AgentCore<S>>,
    started: Instant,
    _running: RunningGuard,
}

impl<S: Step> Drop for ActiveRun<'_, S> {
    fn drop(&mut self) {
        let AgentCore { strategy, ctx } = &mut *self.core;
        if ctx.finish() {
            debug!(step = ctx.current_step(), "Run dropped mid-step");
        }
        ctx.metrics_mut().execution_time_ms = self.started.elapsed().as_millis() as u64;
        strategy.cleanup(ctx);

        let metrics = ctx.metrics();
        info!(
            steps = metrics.steps,
            tool_calls = metrics.tool_calls,
            contained_failures = metrics.contained_failures,
            duration_ms = metrics.execution_time_ms,
            state = %ctx.state(),
            "Run ended"
        );
    }
}

fn check_prompt(prompt: &str) -> crate::Result<()> {
    if prompt.trim().is_empty() {
        return Err(crate::Error::EmptyPrompt);
    }
    Ok(())
}

/// Seed the context for a claimed run and arm its cleanup.
fn activate<'a, S: Step>(
    mut core: MutexGuard<'a, AgentCore<S>>,
    running: RunningGuard,
    prompt: &str,
) -> ActiveRun<'a, S> {
    core.ctx.begin(running.generation, prompt);
    ActiveRun {
        core,
        started: Instant::now(),
        _running: running,
    }
}

impl<S: Step + 'static> Agent<S> {
    /// Check preconditions and claim the agent. Nothing changes on failure.
    pub(crate) fn claim(&self, prompt: &str) -> crate::Result<RunningGuard> {
        check_prompt(prompt)?;
        RunningGuard::acquire(&self.inner.state)
    }

    pub(crate) async fn enter(&self, running: RunningGuard, prompt: &str) -> ActiveRun<'_, S> {
        let core = self.inner.core.lock().await;
        activate(core, running, prompt)
    }

    /// Take the run lock first and claim second, so a caller that gives up
    /// while waiting for the lock has claimed nothing.
    async fn start(&self, prompt: &str) -> crate::Result<ActiveRun<'_, S>> {
        check_prompt(prompt)?;
        let observed = self.state();
        if !observed.can_start() {
            return Err(crate::Error::AgentBusy { state: observed });
        }

        let core = self.inner.core.lock().await;
        let running = RunningGuard::acquire(&self.inner.state)?;
        Ok(activate(core, running, prompt))
    }

    /// Run to completion and return the newline-joined transcript.
    ///
    /// Fails without touching the agent if it is not idle or the prompt is
    /// blank. Step failures are reported in the transcript, not as `Err`.
    #[instrument(skip(self, prompt), fields(agent = %self.name(), run_id = %uuid::Uuid::new_v4()))]
    pub async fn run(&self, prompt: &str) -> crate::Result<String> {
        let mut run = self.start(prompt).await.inspect_err(|e| {
            warn!(error = %e, "Run rejected");
        })?;

        let mut lines = Vec::new();
        drive(&mut run, &CancellationToken::new(), &mut lines).await;
        drop(run);

        Ok(lines.join("\n"))
    }
}

/// The step loop shared by blocking and streaming execution.
pub(crate) async fn drive<S: Step, K: EventSink>(
    run: &mut ActiveRun<'_, S>,
    cancel: &CancellationToken,
    sink: &mut K,
) {
    let AgentCore { strategy, ctx } = &mut *run.core;
    let max_steps = ctx.max_steps();

    loop {
        if cancel.is_cancelled() {
            cancel_run(ctx.finish(), ctx.current_step(), sink).await;
            return;
        }

        if ctx.current_step() >= max_steps {
            ctx.finish();
            info!(max_steps, "Step budget exhausted");
            sink.emit(RunEvent::Terminated(Termination::MaxSteps(max_steps)))
                .await;
            return;
        }

        let step = ctx.advance();
        debug!(step, max_steps, "Executing step");

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            outcome = strategy.step(ctx) => Some(outcome),
        };
        let Some(outcome) = outcome else {
            cancel_run(ctx.finish(), step, sink).await;
            return;
        };

        let event = match outcome {
            Ok(result) => RunEvent::Step { step, result },
            Err(e) if e.is_contained() => {
                warn!(step, error = %e, "Reasoning failed, continuing");
                ctx.metrics_mut().record_contained_failure();
                RunEvent::Step {
                    step,
                    result: e.contained_result(),
                }
            }
            Err(e) => {
                ctx.fail();
                warn!(step, error = %e, "Step failed");
                sink.emit(RunEvent::Failed {
                    step,
                    message: e.message().to_string(),
                })
                .await;
                return;
            }
        };

        debug!(%event, "Step completed");
        if !sink.emit(event).await {
            cancel_run(ctx.finish(), step, sink).await;
            return;
        }

        if ctx.state() == AgentState::Finished {
            info!(step, "Run finished early");
            sink.emit(RunEvent::Terminated(Termination::Finished { step }))
                .await;
            return;
        }
    }
}

async fn cancel_run<K: EventSink>(finished: bool, step: usize, sink: &mut K) {
    if finished {
        info!(step, "Run cancelled");
    }
    sink.emit(RunEvent::Terminated(Termination::Cancelled { step }))
        .await;
}
