//! The general-purpose assistant preset.

use std::sync::Arc;

use super::config::AgentConfig;
use super::tool_call::ToolCallAgent;
use crate::client::ChatClient;
use crate::prompts::{MANUS_NEXT_STEP_PROMPT, MANUS_SYSTEM_PROMPT};
use crate::tools::{TERMINATE_TOOL_NAME, TerminateTool, ToolRegistry};

pub const MANUS_NAME: &str = "mqmanus";
pub const MANUS_MAX_STEPS: usize = 20;

pub fn manus_config() -> AgentConfig {
    AgentConfig::new(MANUS_NAME)
        .with_system_prompt(MANUS_SYSTEM_PROMPT)
        .with_next_step_prompt(MANUS_NEXT_STEP_PROMPT)
        .with_max_steps(MANUS_MAX_STEPS)
        .with_terminate_tool(TERMINATE_TOOL_NAME)
}

/// Build the shipped assistant over `tools`, adding the terminate tool if
/// the registry lacks it.
pub fn manus_agent(client: Arc<dyn ChatClient>, mut tools: ToolRegistry) -> ToolCallAgent {
    if !tools.contains(TERMINATE_TOOL_NAME) {
        tools.register(Arc::new(TerminateTool));
    }
    ToolCallAgent::tool_calling(manus_config(), client, Arc::new(tools))
}
