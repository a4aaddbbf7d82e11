//! Streaming execution over the same step loop.

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span, warn};

use super::events::RunEvent;
use super::execution::{EventSink, drive};
use super::executor::Agent;
use super::step::Step;

struct ChannelSink {
    tx: mpsc::Sender<RunEvent>,
    cancel: CancellationToken,
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn emit(&mut self, event: RunEvent) -> bool {
        tokio::select! {
            biased;
            sent = self.tx.send(event) => sent.is_ok(),
            _ = self.cancel.cancelled() => false,
        }
    }
}

impl<S: Step + 'static> Agent<S> {
    /// Run on a background task, yielding each line as it is produced.
    ///
    /// If the agent is not idle or the prompt is blank the stream yields a
    /// single [`RunEvent::Rejected`] and ends; the agent is left untouched.
    /// Dropping the stream cancels the run. Must be called within a tokio
    /// runtime.
    pub fn run_stream(&self, prompt: &str) -> RunStream {
        let running = match self.claim(prompt) {
            Ok(running) => running,
            Err(e) => {
                warn!(agent = %self.name(), error = %e, "Stream rejected");
                return RunStream::rejected(e);
            }
        };

        let (tx, rx) = mpsc::channel(self.config().stream_buffer.max(1));
        let cancel = CancellationToken::new();
        let mut sink = ChannelSink {
            tx,
            cancel: cancel.clone(),
        };

        let agent = self.clone();
        let prompt = prompt.to_string();
        let token = cancel.clone();
        let span = info_span!(
            "run_stream",
            agent = %self.name(),
            run_id = %uuid::Uuid::new_v4()
        );

        let task = tokio::spawn(
            async move {
                let mut run = agent.enter(running, &prompt).await;
                drive(&mut run, &token, &mut sink).await;
                // cleanup before the channel closes
                drop(run);
                drop(sink);
            }
            .instrument(span),
        );

        RunStream {
            rx,
            cancel,
            task: Some(task),
        }
    }
}

/// Ordered stream of [`RunEvent`]s from [`Agent::run_stream`].
///
/// Single-subscriber. The stream ends after the terminal event, once the
/// run's cleanup has completed.
pub struct RunStream {
    rx: mpsc::Receiver<RunEvent>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RunStream {
    fn rejected(err: crate::Error) -> Self {
        // a fresh channel always has room for one item
        let (tx, rx) = mpsc::channel(1);
        if let Err(e) = tx.try_send(RunEvent::Rejected(err.to_string())) {
            warn!(error = %e, "Rejection could not be queued");
        }
        Self {
            rx,
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    /// Ask the producer to stop. The in-flight step is abandoned and the
    /// stream ends with a cancellation line if there is room for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether a background run was started, as opposed to a rejection
    pub fn was_started(&self) -> bool {
        self.task.is_some()
    }

    /// Drain every remaining event and wait for the producer to exit.
    pub async fn collect_events(mut self) -> Vec<RunEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.rx.recv().await {
            events.push(event);
        }
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "Run task did not complete");
        }
        events
    }
}

impl Stream for RunStream {
    type Item = RunEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<RunEvent>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl Drop for RunStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for RunStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunStream")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("has_task", &self.task.is_some())
            .finish()
    }
}
