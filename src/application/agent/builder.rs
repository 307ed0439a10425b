use super::errors::AgentError;
use super::runner::Agent;
use crate::application::tooling::{Tool, ToolRegistry};
use crate::config::AgentConfig;
use crate::domain::types::{ChatMessage, Conversation};
use crate::infrastructure::model::{ModelProvider, OllamaClient};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Builder for [`Agent`] instances.
///
/// The tool set is fixed once `build` runs; there is no registration after
/// construction. Without an explicit provider the agent talks to a local
/// Ollama backend at the configured endpoint.
pub struct AgentBuilder {
    model: String,
    endpoint: String,
    system_prompt: Option<String>,
    max_rounds: usize,
    tools: Vec<Arc<dyn Tool>>,
    provider: Option<Arc<dyn ModelProvider>>,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        let defaults = AgentConfig::default();
        Self {
            model: defaults.model,
            endpoint: defaults.endpoint,
            system_prompt: None,
            max_rounds: defaults.max_rounds,
            tools: Vec::new(),
            provider: None,
        }
    }

    /// Seeds the builder from a loaded configuration.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            system_prompt: config.system_prompt.clone(),
            max_rounds: config.max_rounds,
            tools: Vec::new(),
            provider: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Replaces the default Ollama client with a custom backend.
    pub fn with_provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<Agent, AgentError> {
        if self.model.trim().is_empty() {
            return Err(AgentError::InvalidConfiguration(
                "model identifier must not be empty".into(),
            ));
        }
        if self.max_rounds == 0 {
            return Err(AgentError::InvalidConfiguration(
                "max_rounds must be at least 1".into(),
            ));
        }

        let mut registry = ToolRegistry::new();
        for tool in self.tools {
            registry.register(tool)?;
        }

        let provider = self
            .provider
            .unwrap_or_else(|| Arc::new(OllamaClient::new(self.endpoint)));

        let mut conversation = Conversation::new();
        if let Some(prompt) = self.system_prompt {
            conversation.append(ChatMessage::system(prompt));
        }

        Ok(Agent::from_parts(
            provider,
            registry,
            conversation,
            self.model,
            self.max_rounds,
            Arc::new(AtomicBool::new(false)),
        ))
    }
}
