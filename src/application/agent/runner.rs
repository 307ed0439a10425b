use super::errors::AgentError;
use crate::application::tooling::ToolRegistry;
use crate::domain::types::{ChatMessage, Conversation};
use crate::infrastructure::model::{InferenceResult, ModelProvider, ModelRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Requests cancellation of the chat call currently running on the agent
/// this handle was taken from. The flag is observed between rounds and
/// between individual tool dispatches; it is cleared once observed so the
/// next chat call starts clean.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// One conversation session with a tool-calling model.
///
/// `chat` takes `&mut self`: an agent serves exactly one chat call at a
/// time, and concurrent sessions require separate instances. Tool results
/// are appended in the order the backend requested the calls, so the prompt
/// history resent next round is deterministic.
pub struct Agent {
    provider: Arc<dyn ModelProvider>,
    registry: ToolRegistry,
    conversation: Conversation,
    model: String,
    max_rounds: usize,
    cancel: Arc<AtomicBool>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("model", &self.model)
            .field("max_rounds", &self.max_rounds)
            .finish_non_exhaustive()
    }
}

impl Agent {
    pub(super) fn from_parts(
        provider: Arc<dyn ModelProvider>,
        registry: ToolRegistry,
        conversation: Conversation,
        model: String,
        max_rounds: usize,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            provider,
            registry,
            conversation,
            model,
            max_rounds,
            cancel,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: self.cancel.clone(),
        }
    }

    /// Clears the transcript (keeping any system prompt) between chat calls.
    pub fn reset(&mut self) {
        self.conversation.reset();
    }

    /// Runs one user message through the tool-calling loop until the backend
    /// produces a final answer, a backend failure occurs, the round limit is
    /// exhausted, or cancellation is observed.
    ///
    /// Tool-level failures never surface here: they are converted into
    /// tool-result messages so the model can react on the next round. On
    /// error the conversation keeps every message appended so far.
    pub async fn chat(&mut self, message: &str) -> Result<String, AgentError> {
        info!(model = %self.model, tools = self.registry.len(), "Chat call started");
        self.conversation.append(ChatMessage::user(message));

        let descriptors = self.registry.descriptors();

        for round in 1..=self.max_rounds {
            if self.take_cancelled() {
                warn!(round, "Chat cancelled before completion round");
                return Err(AgentError::Cancelled);
            }

            debug!(round, max_rounds = self.max_rounds, "Requesting completion");
            let request = ModelRequest {
                model: self.model.clone(),
                messages: self.conversation.snapshot().to_vec(),
                tools: descriptors.clone(),
            };

            match self.provider.complete(request).await? {
                InferenceResult::FinalAnswer(text) => {
                    info!(round, "Backend returned final answer");
                    self.conversation.append(ChatMessage::assistant(text.clone()));
                    return Ok(text);
                }
                InferenceResult::ToolCalls(calls) => {
                    info!(round, calls = calls.len(), "Backend requested tool calls");
                    self.conversation
                        .append(ChatMessage::assistant_tool_calls(calls.clone()));

                    for call in calls {
                        if self.take_cancelled() {
                            warn!(tool = %call.name, "Chat cancelled before tool dispatch");
                            return Err(AgentError::Cancelled);
                        }

                        let output = match self
                            .registry
                            .invoke(&call.name, call.arguments.clone())
                            .await
                        {
                            Ok(text) => text,
                            // Surfaced to the model, not to the caller.
                            Err(error) => {
                                warn!(tool = %call.name, %error, "Tool call failed");
                                error.user_message()
                            }
                        };
                        self.conversation
                            .append(ChatMessage::tool_result(call.id, output));
                    }
                }
            }
        }

        warn!(limit = self.max_rounds, "Tool loop exhausted its round limit");
        Err(AgentError::IterationLimitExceeded {
            limit: self.max_rounds,
        })
    }

    fn take_cancelled(&self) -> bool {
        self.cancel.swap(false, Ordering::SeqCst)
    }
}
