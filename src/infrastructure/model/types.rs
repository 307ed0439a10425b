//! Model types - request, result, and error types

use crate::domain::types::{ChatMessage, ToolCallRequest, ToolDescriptor};
use thiserror::Error;

/// One inference round: the conversation so far plus the tool catalogue.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDescriptor>,
}

/// Exactly one of: a user-facing answer that terminates the loop, or one or
/// more tool invocations to dispatch in wire order.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResult {
    FinalAnswer(String),
    ToolCalls(Vec<ToolCallRequest>),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot reach backend '{provider}': {source}")]
    Unreachable {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend '{provider}' returned status {status}: {message}")]
    Backend {
        provider: String,
        status: u16,
        message: String,
    },
    #[error("backend '{provider}' returned a malformed response: {reason}")]
    MalformedResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn unreachable(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Unreachable {
            provider: provider.into(),
            source,
        }
    }

    pub fn backend(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn malformed(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ModelError::Unreachable { provider, source } => {
                if source.is_timeout() {
                    format!("Request to '{provider}' timed out.")
                } else {
                    format!("Could not connect to the model backend '{provider}'.")
                }
            }
            ModelError::Backend {
                provider, status, ..
            } => {
                format!("The model backend '{provider}' rejected the request ({status}).")
            }
            ModelError::MalformedResponse { provider, .. } => {
                format!("The model backend '{provider}' sent a response that could not be read.")
            }
        }
    }
}
