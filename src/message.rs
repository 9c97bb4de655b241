// src/message.rs
use serde::{Deserialize, Serialize};

/// Name given to sessions created without an explicit one.
pub const DEFAULT_SESSION_NAME: &str = "New Chat";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub session_name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub session_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Result of one send-message call: the persisted user message and the reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, r#""assistant""#);
        let role: MessageRole = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(role, MessageRole::User);
    }

    #[test]
    fn send_request_serializes_missing_session_as_null() {
        let req = SendMessageRequest {
            content: "Hello".into(),
            session_id: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["session_id"], serde_json::Value::Null);
        assert_eq!(value["content"], "Hello");
    }

    #[test]
    fn history_tolerates_naive_timestamps() {
        let body = r#"{
            "session": {"id": "s1", "session_name": "New Chat",
                        "created_at": "2025-01-02T10:00:00.123456",
                        "updated_at": "2025-01-02T10:05:00.123456"},
            "messages": [{"id": "m1", "session_id": "s1", "role": "user",
                          "content": "hi", "created_at": "2025-01-02T10:05:00"}]
        }"#;
        let history: ChatHistoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(history.messages.len(), 1);
        assert_eq!(history.messages[0].role, MessageRole::User);
    }
}
