//! Inference backend adapters.

pub mod clients;
mod traits;
mod types;

pub use clients::OllamaClient;
pub use traits::ModelProvider;
pub use types::{InferenceResult, ModelError, ModelRequest};
