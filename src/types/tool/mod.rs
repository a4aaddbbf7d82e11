//! Tool-related types.

mod call;
mod definition;
mod error;
mod output;

pub use call::{ToolCall, ToolResponse};
pub use definition::ToolDefinition;
pub use error::ToolError;
pub use output::ToolResult;
