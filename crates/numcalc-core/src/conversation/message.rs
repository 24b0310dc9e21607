use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Author of one conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Label used in prompts and exported transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Student",
            Role::Model => "Tutor",
        }
    }
}

/// One turn in a chapter conversation. Immutable once created; transcripts
/// keep insertion order and are never re-sorted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// User turn stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, Utc::now().timestamp_millis())
    }

    /// Model turn stamped with the current time.
    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content, Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = Message::new(Role::Model, "hi", 42);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"model\""));
        assert!(json.contains("\"timestamp\":42"));

        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn constructors_stamp_time() {
        let msg = Message::user("What is truncation error?");
        assert_eq!(msg.role, Role::User);
        assert!(msg.timestamp > 0);
    }
}
