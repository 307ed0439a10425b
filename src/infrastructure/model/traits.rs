//! Model traits

use super::types::{InferenceResult, ModelError, ModelRequest};
use async_trait::async_trait;

/// Trait for inference backend implementations.
///
/// One call is one round: the full conversation snapshot and the available
/// tool descriptors go in, and either a final answer or a batch of tool
/// calls comes out. No retry happens at this level; the agent loop owns
/// that policy.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn complete(&self, request: ModelRequest) -> Result<InferenceResult, ModelError>;
}
