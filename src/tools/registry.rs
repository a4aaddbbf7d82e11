//! Tool registry: the default tool-execution manager.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use super::{TerminateTool, Tool, ToolExecutor};
use crate::client::ChatResponse;
use crate::types::{ToolDefinition, ToolError, ToolResponse, ToolResult};

/// Registry of available tools
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding only the built-in terminate tool
    pub fn with_terminate() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TerminateTool));
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    /// Builder-style variant of [`register`](Self::register)
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: serde_json::Value) -> crate::Result<ToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::unknown_tool(name))?;
        Ok(tool.execute(input).await)
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.order)
            .finish()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    async fn execute_tool_calls(&self, response: &ChatResponse) -> crate::Result<Vec<ToolResponse>> {
        let calls = response.tool_calls();
        let mut responses = Vec::with_capacity(calls.len());

        for call in calls {
            let start = Instant::now();
            let result = self.execute(&call.name, call.arguments.clone()).await?;
            debug!(
                tool = %call.name,
                id = %call.id,
                is_error = result.is_error(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Tool execution completed"
            );
            responses.push(ToolResponse::new(&call.id, &call.name, result.text()));
        }

        Ok(responses)
    }
}
