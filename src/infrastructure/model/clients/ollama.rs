//! Ollama client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use super::base::HttpClientBase;
use crate::domain::types::{ChatMessage, ToolCallRequest, ToolDescriptor};
use crate::infrastructure::model::traits::ModelProvider;
use crate::infrastructure::model::types::{InferenceResult, ModelError, ModelRequest};

const PROVIDER_ID: &str = "ollama";

/// Client for a local Ollama backend with native tool-call support.
#[derive(Clone)]
pub struct OllamaClient {
    base: HttpClientBase,
}

impl OllamaClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            base: HttpClientBase::new(PROVIDER_ID.to_string(), endpoint.into()),
        }
    }
}

#[async_trait]
impl ModelProvider for OllamaClient {
    async fn complete(&self, request: ModelRequest) -> Result<InferenceResult, ModelError> {
        let url = self.base.build_url("/api/chat");

        let payload = OllamaRequest {
            model: request.model.clone(),
            messages: request.messages.iter().map(WireMessage::from).collect(),
            tools: request.tools.iter().map(WireTool::from).collect(),
            stream: false,
        };

        info!(
            provider = PROVIDER_ID,
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending chat request to Ollama"
        );

        let response: OllamaResponse = self.base.post_json(&url, &payload).await?;

        let message = response
            .message
            .ok_or_else(|| ModelError::malformed(PROVIDER_ID, "missing message field"))?;

        if message.tool_calls.is_empty() {
            debug!("Ollama returned a final answer");
            return Ok(InferenceResult::FinalAnswer(message.content));
        }

        debug!(
            calls = message.tool_calls.len(),
            "Ollama requested tool calls"
        );
        let calls = message
            .tool_calls
            .into_iter()
            .map(|call| ToolCallRequest {
                // Ollama does not assign call ids; mint one so the
                // tool-result message can be correlated later.
                id: Uuid::new_v4().to_string(),
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();
        Ok(InferenceResult::ToolCalls(calls))
    }
}

// Wire types for the /api/chat endpoint.

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
    stream: bool,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        let tool_calls = if message.tool_calls.is_empty() {
            None
        } else {
            Some(
                message
                    .tool_calls
                    .iter()
                    .map(|call| WireToolCall {
                        function: WireToolCallFunction {
                            name: call.name.clone(),
                            arguments: call.arguments.clone(),
                        },
                    })
                    .collect(),
            )
        };
        Self {
            role: message.role.as_str(),
            content: message.content.clone(),
            tool_calls,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireToolCall {
    function: WireToolCallFunction,
}

#[derive(Serialize, Deserialize)]
struct WireToolCallFunction {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: WireToolFunction,
}

#[derive(Serialize)]
struct WireToolFunction {
    name: String,
    description: String,
    parameters: Value,
}

impl From<&ToolDescriptor> for WireTool {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            tool_type: "function",
            function: WireToolFunction {
                name: descriptor.name.clone(),
                description: descriptor.description.clone(),
                parameters: descriptor.parameters.clone(),
            },
        }
    }
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}
