//! # mqmanus
//!
//! A bounded-step reason/act agent engine. An [`Agent`] drives a
//! [`Step`] strategy through repeated "think, optionally act" cycles until
//! the strategy finishes the run, a step fails, or the step budget runs out.
//!
//! The same loop backs a blocking call ([`Agent::run`]) and a streaming call
//! ([`Agent::run_stream`]) that pushes each step line as soon as it exists.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use futures::StreamExt;
//! use mqmanus::{ChatClient, ToolRegistry, manus_agent};
//!
//! # async fn example(client: Arc<dyn ChatClient>) -> mqmanus::Result<()> {
//! let agent = manus_agent(client, ToolRegistry::with_terminate());
//!
//! let mut stream = agent.run_stream("Plan a three-day beginner workout");
//! while let Some(event) = stream.next().await {
//!     println!("{}", event);
//! }
//!
//! agent.reset()?;
//! let transcript = agent.run("Summarise my week of training").await?;
//! println!("{}", transcript);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod agent;
pub mod client;
pub mod config;
pub mod memory;
pub mod prelude;
pub mod prompts;
pub mod tools;
pub mod types;

pub use agent::{
    Agent, AgentConfig, AgentContext, AgentMetrics, AgentState, ReAct, ReActStep, RunEvent,
    RunStream, Step, StepError, Termination, ToolCallAgent, ToolCallStrategy, manus_agent,
};
pub use client::{ChatClient, ChatRequest, ChatResponse};
pub use config::{ConfigBuilder, ConfigError, ConfigProvider, ConfigProviderExt};
pub use memory::{ChatMemory, InMemoryChatMemory};
pub use tools::{
    SchemaTool, TERMINATE_TOOL_NAME, TerminateTool, Tool, ToolExecutor, ToolRegistry, ToolResult,
};
pub use types::{Message, Role, ToolCall, ToolDefinition, ToolError, ToolResponse};

/// Error type for mqmanus operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A run was requested while the agent was not idle.
    #[error("Cannot run agent from state: {state}")]
    AgentBusy { state: AgentState },

    /// A run was requested with a blank prompt.
    #[error("Cannot run agent with empty user prompt")]
    EmptyPrompt,

    /// A state transition was requested that the current state forbids.
    #[error("Invalid state transition: {0}")]
    InvalidState(String),

    /// The chat-completion client failed.
    #[error("Chat client error: {0}")]
    Client(String),

    /// Tool execution failed.
    #[error("Tool execution failed: {0}")]
    Tool(#[from] types::ToolError),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Conversational memory store failed.
    #[error("Memory error: {0}")]
    Memory(String),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller broke a precondition (busy agent, blank prompt)
    Precondition,
    /// Configuration errors
    Configuration,
    /// Failures of injected collaborators (client, tools, memory)
    External,
    /// Internal errors (JSON, unexpected states)
    Internal,
}

impl Error {
    pub fn client(message: impl Into<String>) -> Self {
        Error::Client(message.into())
    }

    pub fn memory(message: impl Into<String>) -> Self {
        Error::Memory(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::AgentBusy { .. } | Error::EmptyPrompt | Error::InvalidState(_) => {
                ErrorCategory::Precondition
            }
            Error::Config(_) => ErrorCategory::Configuration,
            Error::Client(_) | Error::Tool(_) | Error::Memory(_) => ErrorCategory::External,
            Error::Json(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_precondition(&self) -> bool {
        self.category() == ErrorCategory::Precondition
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type alias for mqmanus operations.
pub type Result<T> = std::result::Result<T, Error>;
