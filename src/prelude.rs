//! Prelude module for convenient imports.

pub use crate::agent::{
    Agent, AgentConfig, AgentContext, AgentMetrics, AgentState, ReAct, ReActStep, RunEvent,
    RunStream, Step, StepError, Termination, ToolCallAgent, ToolCallStrategy, manus_agent,
};
pub use crate::client::{ChatClient, ChatRequest, ChatResponse};
pub use crate::memory::{ChatMemory, InMemoryChatMemory};
pub use crate::tools::{SchemaTool, Tool, ToolExecutor, ToolRegistry, ToolResult};
pub use crate::types::{Message, Role, ToolCall, ToolDefinition, ToolResponse};
pub use crate::{Error, Result};
