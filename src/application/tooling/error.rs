use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool '{0}' is already registered")]
    DuplicateToolName(String),
    #[error("unknown tool requested: {0}")]
    NotFound(String),
    #[error("tool '{tool}' received invalid arguments: {reason}")]
    InvalidArguments { tool: String, reason: String },
    #[error("tool '{tool}' failed: {reason}")]
    Invocation { tool: String, reason: String },
}

impl ToolError {
    pub fn invocation(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invocation {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Text handed back to the model as a tool-result message. Tool failures
    /// are context for the next round, never a session failure.
    pub fn user_message(&self) -> String {
        match self {
            ToolError::DuplicateToolName(name) => {
                format!("Tool \"{name}\" is registered more than once.")
            }
            ToolError::NotFound(name) => {
                format!("Tool \"{name}\" is not available in this session.")
            }
            ToolError::InvalidArguments { tool, reason } => {
                format!("Tool \"{tool}\" rejected the provided arguments: {reason}")
            }
            ToolError::Invocation { tool, reason } => {
                format!("Tool \"{tool}\" failed to execute: {reason}")
            }
        }
    }
}
