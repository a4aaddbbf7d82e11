//! Outcome of a single tool invocation.

/// Result reported by a [`Tool`](crate::tools::Tool) implementation.
///
/// An `Error` here is a failure the tool chose to report back to the model as
/// text. Failures that should abort the run surface as
/// [`ToolError`](super::ToolError) from the executor instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
    Success(String),
    Error(String),
    Empty,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self::Success(content.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Text handed back to the model for this result.
    pub fn text(&self) -> String {
        match self {
            Self::Success(content) => content.clone(),
            Self::Error(message) => format!("Error: {}", message),
            Self::Empty => String::new(),
        }
    }
}

impl From<String> for ToolResult {
    fn from(s: String) -> Self {
        Self::Success(s)
    }
}

impl From<&str> for ToolResult {
    fn from(s: &str) -> Self {
        Self::Success(s.to_string())
    }
}
