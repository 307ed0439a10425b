use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "system" => Some(MessageRole::System),
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            "tool" => Some(MessageRole::Tool),
            _ => None,
        }
    }
}

/// A single tool invocation requested by the model.
///
/// The backend does not assign call identifiers, so the inference client
/// mints one per call; the id later links the tool-result message back to
/// the assistant message that requested it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    /// Requested invocations; non-empty only on assistant messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    /// Correlates a tool-result message with the assistant call that
    /// requested it; set only when `role == Tool`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Assistant message recording the calls the model requested this round.
    pub fn assistant_tool_calls(calls: Vec<ToolCallRequest>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: String::new(),
            tool_calls: calls,
            tool_call_id: None,
        }
    }

    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }
}

/// Descriptor presented to the inference backend for one invocable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON Schema for the expected arguments object.
    pub parameters: Value,
}

/// Ordered transcript of one agent session.
///
/// Append-only: insertion order is chronological order is the exact prompt
/// history resent to the backend every round. Messages are never reordered
/// or pruned during a chat call.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Read-only view of the full transcript, in order.
    pub fn snapshot(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_role(&self) -> Option<MessageRole> {
        self.messages.last().map(|m| m.role)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drops everything except a leading system message, if present.
    /// Only meaningful between chat calls; never invoked by the loop itself.
    pub fn reset(&mut self) {
        let keep_system = self
            .messages
            .first()
            .is_some_and(|m| m.role == MessageRole::System);
        if keep_system {
            self.messages.truncate(1);
        } else {
            self.messages.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conversation_preserves_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.append(ChatMessage::user("first"));
        conversation.append(ChatMessage::assistant("second"));

        let snapshot = conversation.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].content, "first");
        assert_eq!(snapshot[1].content, "second");
        assert_eq!(conversation.last_role(), Some(MessageRole::Assistant));
    }

    #[test]
    fn reset_keeps_leading_system_message() {
        let mut conversation = Conversation::new();
        conversation.append(ChatMessage::system("You are helpful."));
        conversation.append(ChatMessage::user("hello"));
        conversation.append(ChatMessage::assistant("hi"));

        conversation.reset();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.last_role(), Some(MessageRole::System));

        let mut bare = Conversation::new();
        bare.append(ChatMessage::user("hello"));
        bare.reset();
        assert!(bare.is_empty());
    }

    #[test]
    fn tool_result_carries_correlation_id() {
        let call = ToolCallRequest {
            id: "call-1".into(),
            name: "cpu_usage".into(),
            arguments: json!({}),
        };
        let assistant = ChatMessage::assistant_tool_calls(vec![call.clone()]);
        let result = ChatMessage::tool_result(call.id.clone(), "12% used");

        assert_eq!(assistant.role, MessageRole::Assistant);
        assert!(assistant.content.is_empty());
        assert_eq!(result.tool_call_id.as_deref(), Some("call-1"));
    }

    #[test]
    fn message_roles_round_trip_through_serde() {
        let message = ChatMessage::tool_result("id-9", "ok");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "id-9");
        assert!(value.get("tool_calls").is_none());

        let parsed: ChatMessage = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, message);

        assert_eq!(MessageRole::from_str("tool"), Some(MessageRole::Tool));
        assert_eq!(MessageRole::from_str("narrator"), None);
    }
}
