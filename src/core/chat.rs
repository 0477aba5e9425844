//! Chat turns exchanged about a document.

use serde::{Deserialize, Serialize};

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person asking questions.
    User,
    /// The language model.
    Model,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Author of the message.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
}

impl ChatTurn {
    /// Creates a user turn.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// Creates a model turn.
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Conversation key: one history per session and document URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatKey {
    /// Session identifier.
    pub session_id: String,
    /// Document URL.
    pub url: String,
}

impl ChatKey {
    /// Creates a key.
    #[must_use]
    pub fn new(session_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        assert_eq!(ChatTurn::user("hi").role, ChatRole::User);
        assert_eq!(ChatTurn::model("hello").role, ChatRole::Model);
    }

    #[test]
    fn test_turn_serializes_like_the_chat_api() {
        let json = serde_json::to_value(ChatTurn::model("answer")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "model", "text": "answer"}));
    }

    #[test]
    fn test_keys_differ_by_session() {
        let a = ChatKey::new("s1", "https://a");
        let b = ChatKey::new("s2", "https://a");
        assert_ne!(a, b);
    }
}
