//! The tool-execution manager seam consumed by the acting phase.

use async_trait::async_trait;

use crate::client::ChatResponse;
use crate::types::{ToolDefinition, ToolResponse};

/// Executes the tool calls carried by an assistant response.
///
/// Implementations return exactly one [`ToolResponse`] per requested call, in
/// request order. An `Err` is an action failure and ends the run in the error
/// state.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Tool set advertised to the chat-completion client.
    fn definitions(&self) -> Vec<ToolDefinition>;

    async fn execute_tool_calls(&self, response: &ChatResponse) -> crate::Result<Vec<ToolResponse>>;
}
