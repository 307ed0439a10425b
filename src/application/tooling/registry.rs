use super::error::ToolError;
use crate::domain::types::ToolDescriptor;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An invocable capability the model may request.
///
/// `invoke` is a function of its arguments: it must not depend on which
/// round of the loop it runs in. Failures are reported through `ToolError`
/// and end up in the conversation, not in the caller's lap.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// JSON Schema describing the expected arguments object.
    fn parameters(&self) -> Value;
    async fn invoke(&self, arguments: Value) -> Result<String, ToolError>;
}

/// Name-keyed set of tools, fixed for the lifetime of an agent session.
///
/// Insertion order is preserved so the descriptor list presented to the
/// backend is identical on every round of a session.
#[derive(Default)]
pub struct ToolRegistry {
    order: Vec<String>,
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateToolName(name));
        }
        debug!(tool = %name, "Registered tool");
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Descriptors in registration order, resent to the backend each round.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters(),
            })
            .collect()
    }

    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let Some(tool) = self.tools.get(name) else {
            warn!(requested_tool = %name, "Unknown tool requested");
            return Err(ToolError::NotFound(name.to_string()));
        };

        debug!(tool = %name, "Dispatching tool");
        let result = tool.invoke(arguments).await;
        info!(tool = %name, success = result.is_ok(), "Tool executed");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Echoes its arguments back"
        }

        fn parameters(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }

        async fn invoke(&self, arguments: Value) -> Result<String, ToolError> {
            Ok(arguments.to_string())
        }
    }

    #[test]
    fn register_rejects_duplicate_names() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" })).unwrap();

        let error = registry
            .register(Arc::new(EchoTool { name: "echo" }))
            .unwrap_err();
        assert!(matches!(error, ToolError::DuplicateToolName(name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn descriptors_keep_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zebra", "apple", "mango"] {
            registry.register(Arc::new(EchoTool { name })).unwrap();
        }

        let first: Vec<String> = registry.descriptors().iter().map(|d| d.name.clone()).collect();
        assert_eq!(first, ["zebra", "apple", "mango"]);

        // Stable across repeated listings within the session.
        let second: Vec<String> = registry.descriptors().iter().map(|d| d.name.clone()).collect();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn invoke_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" })).unwrap();

        let output = registry.invoke("echo", json!({"n": 1})).await.unwrap();
        assert_eq!(output, r#"{"n":1}"#);

        assert!(registry.lookup("echo").is_some());
        assert!(registry.lookup("missing").is_none());
    }

    #[tokio::test]
    async fn invoke_reports_unknown_tool() {
        let registry = ToolRegistry::new();
        let error = registry.invoke("missing", Value::Null).await.unwrap_err();
        assert!(matches!(error, ToolError::NotFound(name) if name == "missing"));
    }
}
