//! Tool call requests and their correlated responses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A request from the chat-completion client to invoke a named tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Create a call with a freshly generated id.
    pub fn named(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), name, arguments)
    }
}

impl fmt::Display for ToolCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) [{}]", self.name, self.arguments, self.id)
    }
}

/// Result of one executed [`ToolCall`], correlated by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub id: String,
    pub name: String,
    pub result: String,
}

impl ToolResponse {
    pub fn new(id: impl Into<String>, name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            result: result.into(),
        }
    }
}
