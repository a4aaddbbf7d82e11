//! Tool error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("invalid input for {tool}: {message}")]
    InvalidInput { tool: String, message: String },

    #[error("execution failed: {message}")]
    ExecutionFailed { message: String },

    #[error("unknown tool: {name}")]
    UnknownTool { name: String },
}

impl ToolError {
    pub fn invalid_input(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
        }
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }
}
