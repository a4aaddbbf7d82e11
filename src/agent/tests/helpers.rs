//! Test helper types for agent tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use crate::agent::{AgentContext, AgentState, ReAct, Step, StepError};
use crate::client::{ChatClient, ChatRequest, ChatResponse};
use crate::tools::ToolExecutor;
use crate::types::{ToolCall, ToolDefinition, ToolResponse};

/// What a [`CountingStep`] does at a given step number.
#[derive(Clone)]
pub enum StepPlan {
    FailAction(String),
    FailReasoning(String),
    Finish(String),
    /// Signal `entered`, then wait for a permit on `gate`
    Gate,
}

#[derive(Clone)]
pub struct CountingStep {
    pub plans: HashMap<usize, StepPlan>,
    pub steps: Arc<AtomicUsize>,
    pub cleanups: Arc<AtomicUsize>,
    pub gate: Arc<Semaphore>,
    pub entered: Arc<Notify>,
}

impl CountingStep {
    pub fn new() -> Self {
        Self {
            plans: HashMap::new(),
            steps: Arc::new(AtomicUsize::new(0)),
            cleanups: Arc::new(AtomicUsize::new(0)),
            gate: Arc::new(Semaphore::new(0)),
            entered: Arc::new(Notify::new()),
        }
    }

    pub fn at(mut self, step: usize, plan: StepPlan) -> Self {
        self.plans.insert(step, plan);
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.load(Ordering::SeqCst)
    }

    pub fn cleanup_count(&self) -> usize {
        self.cleanups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Step for CountingStep {
    async fn step(&mut self, ctx: &mut AgentContext) -> Result<String, StepError> {
        let n = self.steps.fetch_add(1, Ordering::SeqCst) + 1;
        match self.plans.get(&n).cloned() {
            None => Ok(format!("ok {}", n)),
            Some(StepPlan::FailAction(message)) => Err(StepError::action(message)),
            Some(StepPlan::FailReasoning(message)) => Err(StepError::reasoning(message)),
            Some(StepPlan::Finish(text)) => {
                ctx.finish();
                Ok(text)
            }
            Some(StepPlan::Gate) => {
                self.entered.notify_one();
                let permit = self
                    .gate
                    .acquire()
                    .await
                    .map_err(|e| StepError::action(e.to_string()))?;
                permit.forget();
                Ok(format!("released {}", n))
            }
        }
    }

    fn cleanup(&mut self, _ctx: &mut AgentContext) {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scripted reason/act strategy that records what the loop saw.
#[derive(Default)]
pub struct ScriptedReAct {
    pub thinks: VecDeque<Result<bool, StepError>>,
    pub acts: VecDeque<Result<String, StepError>>,
    pub act_calls: usize,
    pub observed_states: Vec<AgentState>,
}

#[async_trait]
impl ReAct for ScriptedReAct {
    async fn think(&mut self, ctx: &mut AgentContext) -> Result<bool, StepError> {
        self.observed_states.push(ctx.state());
        self.thinks.pop_front().unwrap_or(Ok(false))
    }

    async fn act(&mut self, _ctx: &mut AgentContext) -> Result<String, StepError> {
        self.act_calls += 1;
        self.acts.pop_front().unwrap_or_else(|| Ok("acted".into()))
    }
}

/// Chat client replaying canned responses and recording requests.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<crate::Result<ChatResponse>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<crate::Result<ChatResponse>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ChatRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ChatRequest) -> crate::Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ChatResponse::text("nothing left to say")))
    }
}

/// Tool executor returning fixed results per tool name.
#[derive(Default)]
pub struct RecordingExecutor {
    results: HashMap<String, String>,
    failure: Option<String>,
    pub executed: Mutex<Vec<ToolCall>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(mut self, tool: &str, result: &str) -> Self {
        self.results.insert(tool.to_string(), result.to_string());
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn executed_names(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }
}

#[async_trait]
impl ToolExecutor for RecordingExecutor {
    fn definitions(&self) -> Vec<ToolDefinition> {
        let mut names: Vec<&String> = self.results.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| {
                ToolDefinition::new(
                    name.clone(),
                    format!("{} tool", name),
                    serde_json::json!({"type": "object", "properties": {}}),
                )
            })
            .collect()
    }

    async fn execute_tool_calls(&self, response: &ChatResponse) -> crate::Result<Vec<ToolResponse>> {
        if let Some(message) = &self.failure {
            return Err(crate::Error::Tool(crate::types::ToolError::execution_failed(
                message.clone(),
            )));
        }
        let calls = response.tool_calls();
        self.executed.lock().unwrap().extend(calls.iter().cloned());
        Ok(calls
            .iter()
            .map(|call| {
                let result = self.results.get(&call.name).cloned().unwrap_or_default();
                ToolResponse::new(&call.id, &call.name, result)
            })
            .collect())
    }
}

pub fn tool_calls(names: &[&str]) -> ChatResponse {
    let calls = names
        .iter()
        .enumerate()
        .map(|(i, name)| ToolCall::new(format!("call-{}", i + 1), *name, serde_json::json!({})))
        .collect();
    ChatResponse::with_tool_calls("", calls)
}
