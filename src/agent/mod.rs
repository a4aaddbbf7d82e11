//! Agent execution engine.

mod config;
mod context;
mod events;
mod execution;
mod executor;
mod manus;
mod state;
mod step;
mod streaming;
mod tool_call;


pub use config::{AgentConfig, DEFAULT_MAX_STEPS, DEFAULT_STREAM_BUFFER};
pub use context::AgentContext;
pub use events::{RunEvent, Termination};
pub use executor::Agent;
pub use manus::{MANUS_MAX_STEPS, MANUS_NAME, manus_agent, manus_config};
pub use state::{AgentMetrics, AgentState};
pub use step::{ReAct, ReActStep, Step, StepError, THINKING_COMPLETE};
pub use streaming::RunStream;
pub use tool_call::{NO_TOOLS_TO_CALL, ToolCallAgent, ToolCallStrategy};
