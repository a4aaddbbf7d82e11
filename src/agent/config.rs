//! Agent configuration.

use crate::config::{ConfigError, ConfigProvider, ConfigProviderExt};
use crate::tools::TERMINATE_TOOL_NAME;

pub const DEFAULT_MAX_STEPS: usize = 10;
pub const DEFAULT_STREAM_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub name: String,
    /// Sent as the system prompt of every chat request
    pub system_prompt: Option<String>,
    /// Appended as a user message before each reasoning phase
    pub next_step_prompt: Option<String>,
    pub max_steps: usize,
    /// Executing a tool with this name finishes the run
    pub terminate_tool: String,
    /// Capacity of the streaming channel
    pub stream_buffer: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "agent".to_string(),
            system_prompt: None,
            next_step_prompt: None,
            max_steps: DEFAULT_MAX_STEPS,
            terminate_tool: TERMINATE_TOOL_NAME.to_string(),
            stream_buffer: DEFAULT_STREAM_BUFFER,
        }
    }
}

fn non_blank(text: String) -> Option<String> {
    (!text.trim().is_empty()).then_some(text)
}

impl AgentConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = non_blank(prompt.into());
        self
    }

    pub fn with_next_step_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.next_step_prompt = non_blank(prompt.into());
        self
    }

    /// Zero is raised to one. Values read by
    /// [`from_provider`](Self::from_provider) are rejected instead, since
    /// they come from outside the program.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn with_terminate_tool(mut self, name: impl Into<String>) -> Self {
        self.terminate_tool = name.into();
        self
    }

    /// Zero is raised to one, as for [`with_max_steps`](Self::with_max_steps)
    pub fn with_stream_buffer(mut self, capacity: usize) -> Self {
        self.stream_buffer = capacity.max(1);
        self
    }

    /// Load settings from a provider, keeping defaults for absent keys.
    ///
    /// Reads `agent.name`, `agent.system_prompt`, `agent.next_step_prompt`,
    /// `agent.max_steps`, `agent.terminate_tool` and `agent.stream_buffer`.
    pub async fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(name) = provider.get_string("agent.name").await? {
            config.name = name;
        }
        config.system_prompt = provider.get_string("agent.system_prompt").await?;
        config.next_step_prompt = provider.get_string("agent.next_step_prompt").await?;

        if let Some(max_steps) = provider.get_parsed::<usize>("agent.max_steps").await? {
            if max_steps == 0 {
                return Err(ConfigError::invalid("agent.max_steps", "must be at least 1").into());
            }
            config.max_steps = max_steps;
        }
        if let Some(tool) = provider.get_string("agent.terminate_tool").await? {
            config.terminate_tool = tool;
        }
        if let Some(buffer) = provider.get_parsed::<usize>("agent.stream_buffer").await? {
            if buffer == 0 {
                return Err(
                    ConfigError::invalid("agent.stream_buffer", "must be at least 1").into(),
                );
            }
            config.stream_buffer = buffer;
        }

        Ok(config)
    }
}
