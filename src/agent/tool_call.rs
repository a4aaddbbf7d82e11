//! Tool-calling strategy: the model decides, the tool executor acts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::config::AgentConfig;
use super::context::AgentContext;
use super::executor::Agent;
use super::step::{ReAct, ReActStep, StepError};
use crate::client::{ChatClient, ChatRequest, ChatResponse};
use crate::tools::ToolExecutor;
use crate::types::Message;

/// Step result when there is no pending tool call to execute.
pub const NO_TOOLS_TO_CALL: &str = "No tools to call";

/// An agent driven by [`ToolCallStrategy`].
pub type ToolCallAgent = Agent<ReActStep<ToolCallStrategy>>;

/// Reason/act strategy over a chat client and a tool executor.
///
/// `think` asks the client for the next move and keeps any tool-call
/// response pending; `act` executes the pending calls.
pub struct ToolCallStrategy {
    client: Arc<dyn ChatClient>,
    tools: Arc<dyn ToolExecutor>,
    pending: Option<ChatResponse>,
}

impl ToolCallStrategy {
    pub fn new(client: Arc<dyn ChatClient>, tools: Arc<dyn ToolExecutor>) -> Self {
        Self {
            client,
            tools,
            pending: None,
        }
    }

    /// The tool-call response awaiting execution, if any
    pub fn pending(&self) -> Option<&ChatResponse> {
        self.pending.as_ref()
    }

    fn build_request(&self, ctx: &AgentContext) -> ChatRequest {
        let request = ChatRequest::new(ctx.messages().to_vec()).with_tools(self.tools.definitions());
        match &ctx.config().system_prompt {
            Some(system) => request.with_system(system.clone()),
            None => request,
        }
    }
}

#[async_trait]
impl ReAct for ToolCallStrategy {
    async fn think(&mut self, ctx: &mut AgentContext) -> Result<bool, StepError> {
        if let Some(prompt) = ctx.config().next_step_prompt.clone() {
            ctx.push(Message::user(prompt));
        }

        let request = self.build_request(ctx);
        let response = match self.client.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(client = self.client.name(), error = %e, "Chat completion failed");
                ctx.push(Message::assistant(format!(
                    "Error encountered while processing: {}",
                    e
                )));
                return Ok(false);
            }
        };

        debug!(
            step = ctx.current_step(),
            tool_calls = response.tool_calls().len(),
            text = %response.message.text(),
            "Model responded"
        );

        if !response.has_tool_calls() {
            ctx.push(response.message);
            return Ok(false);
        }

        // withheld from history until the calls run
        self.pending = Some(response);
        Ok(true)
    }

    async fn act(&mut self, ctx: &mut AgentContext) -> Result<String, StepError> {
        let Some(response) = self.pending.take().filter(ChatResponse::has_tool_calls) else {
            return Ok(NO_TOOLS_TO_CALL.to_string());
        };

        let responses = self.tools.execute_tool_calls(&response).await?;

        ctx.push(response.message);
        ctx.push(Message::tool_responses(responses.clone()));
        ctx.record_tool_calls(responses.len());

        let terminate_tool = &ctx.config().terminate_tool;
        if responses.iter().any(|r| &r.name == terminate_tool) {
            debug!(tool = %terminate_tool, "Termination tool executed");
            ctx.finish();
        }

        Ok(responses
            .iter()
            .map(|r| format!("Tool {} returned: {}", r.name, r.result))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn cleanup(&mut self, _ctx: &mut AgentContext) {
        self.pending = None;
    }
}

impl ToolCallAgent {
    pub fn tool_calling(
        config: AgentConfig,
        client: Arc<dyn ChatClient>,
        tools: Arc<dyn ToolExecutor>,
    ) -> Self {
        Agent::new(config, ReActStep::new(ToolCallStrategy::new(client, tools)))
    }
}
