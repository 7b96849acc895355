use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a conversational message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Parses a raw JSON message list.
///
/// Returns `None` when `raw` is not an array. Entries that are not message objects
/// are skipped.
pub fn parse_messages(raw: &Value) -> Option<Vec<ChatMessage>> {
    let entries = raw.as_array()?;
    Some(
        entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect(),
    )
}

/// Content of the first `user` message, trimmed. `None` if absent or blank.
pub fn extract_user_input(messages: &[ChatMessage]) -> Option<String> {
    messages
        .iter()
        .find(|m| m.role == "user")
        .map(|m| m.content.trim().to_string())
        .filter(|content| !content.is_empty())
}
