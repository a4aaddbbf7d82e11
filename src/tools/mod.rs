//! Tool abstractions and the built-in tool-execution manager.

mod executor;
mod registry;
mod terminate;
mod traits;

pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
pub use terminate::{TERMINATE_TOOL_NAME, TerminateInput, TerminateTool};
pub use traits::{SchemaTool, Tool};

pub use crate::types::ToolResult;
