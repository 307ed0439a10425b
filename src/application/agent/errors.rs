use crate::application::tooling::ToolError;
use crate::infrastructure::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid agent configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Construction-time registration failures only; tool failures during a
    /// chat call are absorbed into the conversation instead.
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("tool loop exceeded {limit} rounds without a final answer")]
    IterationLimitExceeded { limit: usize },
    #[error("chat was cancelled before completion")]
    Cancelled,
}

impl AgentError {
    pub fn user_message(&self) -> String {
        match self {
            AgentError::InvalidConfiguration(reason) => {
                format!("The agent is misconfigured: {reason}")
            }
            AgentError::Model(err) => err.user_message(),
            AgentError::Tool(err) => err.user_message(),
            AgentError::IterationLimitExceeded { limit } => format!(
                "The agent could not finish within {limit} rounds. Try a simpler request."
            ),
            AgentError::Cancelled => "The request was cancelled.".to_string(),
        }
    }
}
