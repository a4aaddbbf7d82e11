//! Built-in tool the model calls to end a run.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use super::SchemaTool;
use crate::types::ToolResult;

pub const TERMINATE_TOOL_NAME: &str = "doTerminate";

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TerminateInput {
    /// Optional closing summary for the user
    #[serde(default)]
    pub summary: Option<String>,
}

/// Signals that the task is complete.
///
/// The tool itself only acknowledges; ending the run is done by the agent
/// when it sees a result from the configured termination tool name.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminateTool;

#[async_trait]
impl SchemaTool for TerminateTool {
    type Input = TerminateInput;
    const NAME: &'static str = TERMINATE_TOOL_NAME;
    const DESCRIPTION: &'static str = "Terminate the interaction when the request is met, or when \
        the assistant cannot proceed further. Call this once all work is done.";

    async fn handle(&self, input: TerminateInput) -> ToolResult {
        match input.summary {
            Some(summary) if !summary.trim().is_empty() => {
                ToolResult::success(format!("Task terminated: {}", summary.trim()))
            }
            _ => ToolResult::success("Task terminated"),
        }
    }
}
