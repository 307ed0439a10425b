//! astrolabe - an embeddable tool-calling agent.
//!
//! Wraps a conversational model served by a local Ollama backend with a
//! registry of invocable tools. One `chat` call runs the full tool-calling
//! loop: the conversation is sent to the backend, requested tools are
//! dispatched in order, their results are fed back, and the loop repeats
//! until the backend produces a final answer or a limit is hit.
//!
//! The crate builds both as a Rust library and as a `cdylib` exposing the
//! C ABI declared in `include/astrolabe.h`.

pub mod application;
pub mod config;
pub mod domain;
pub mod ffi;
pub mod infrastructure;

pub use application::agent::{Agent, AgentBuilder, AgentError, CancelHandle};
pub use application::tooling::{Tool, ToolError, ToolRegistry};
pub use config::{AgentConfig, ConfigError};
pub use domain::types::{
    ChatMessage, Conversation, MessageRole, ToolCallRequest, ToolDescriptor,
};
pub use infrastructure::model::{InferenceResult, ModelError, ModelProvider, OllamaClient};
