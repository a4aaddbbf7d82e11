//! Chat-completion client seam.
//!
//! The agent never talks to a model provider directly. It builds a
//! [`ChatRequest`] from its history and hands it to an injected
//! [`ChatClient`], which returns a single assistant message that may carry
//! tool calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{Message, Role, ToolCall, ToolDefinition};

/// One chat-completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Set the system prompt. Blank prompts are dropped.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        let system = system.into();
        self.system = (!system.trim().is_empty()).then_some(system);
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }
}

/// The assistant message produced for a [`ChatRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: Message,
}

impl ChatResponse {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    /// Plain text reply with no tool calls.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Message::assistant(text))
    }

    pub fn with_tool_calls(text: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::new(Message::assistant_with_tool_calls(text, tool_calls))
    }

    pub fn has_tool_calls(&self) -> bool {
        self.message.role == Role::Assistant && self.message.has_tool_calls()
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        &self.message.tool_calls
    }
}

/// A chat-completion backend.
///
/// Implementations own their own timeouts and retries; the agent loop calls
/// `complete` once per reasoning phase and treats any `Err` as a reasoning
/// failure.
#[async_trait]
pub trait ChatClient: Send + Sync {
    fn name(&self) -> &str {
        "chat-client"
    }

    async fn complete(&self, request: ChatRequest) -> crate::Result<ChatResponse>;
}
