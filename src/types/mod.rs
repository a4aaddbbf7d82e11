//! Core message and tool types shared by the agent loop and its collaborators.

mod message;
mod tool;

pub use message::{Message, Role};
pub use tool::{ToolCall, ToolDefinition, ToolError, ToolResponse, ToolResult};
