//! Message types for chat prompts
//!
//! Messages are the unit of exchange with chat models: a role (system, human,
//! AI) paired with content. Prompt templates in this crate produce `Vec<Message>`;
//! a chat model client consumes it.
//!
//! # Example
//!
//! ```rust
//! use promptkit::messages::Message;
//!
//! let msg = Message::human("What is 2+2?");
//! assert!(msg.is_human());
//! assert_eq!(msg.as_text(), "What is 2+2?");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Fields shared by every message variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseMessageFields {
    /// Optional human-readable name for the message author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional unique identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Provider-specific extra fields
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional_kwargs: HashMap<String, serde_json::Value>,
}

/// A single content block within a multi-part message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text block
    Text {
        /// The text content
        text: String,
    },
}

/// Message content: plain text or an ordered list of content blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Multi-part content
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    /// Flatten content to plain text. Blocks are joined with newlines.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .map(|ContentBlock::Text { text }| text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Check whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(text) => text.is_empty(),
            MessageContent::Blocks(blocks) => blocks.is_empty(),
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

/// A chat message: role tag plus content.
///
/// Produced by prompt templates and consumed by chat model clients. The serde
/// representation tags each message with its role, so message lists survive a
/// JSON round trip (used by [`MessagesPlaceholder`](crate::prompts::MessagesPlaceholder)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// Instructions for the model
    System {
        /// Message content
        content: MessageContent,
        /// Shared message fields
        #[serde(flatten)]
        fields: BaseMessageFields,
    },
    /// Input from the user
    Human {
        /// Message content
        content: MessageContent,
        /// Shared message fields
        #[serde(flatten)]
        fields: BaseMessageFields,
    },
    /// Output from the model
    AI {
        /// Message content
        content: MessageContent,
        /// Shared message fields
        #[serde(flatten)]
        fields: BaseMessageFields,
    },
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<MessageContent>) -> Self {
        Message::System {
            content: content.into(),
            fields: BaseMessageFields::default(),
        }
    }

    /// Create a human message
    pub fn human(content: impl Into<MessageContent>) -> Self {
        Message::Human {
            content: content.into(),
            fields: BaseMessageFields::default(),
        }
    }

    /// Create an AI message
    pub fn ai(content: impl Into<MessageContent>) -> Self {
        Message::AI {
            content: content.into(),
            fields: BaseMessageFields::default(),
        }
    }

    /// Check if this is a system message
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Message::System { .. })
    }

    /// Check if this is a human message
    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self, Message::Human { .. })
    }

    /// Check if this is an AI message
    #[must_use]
    pub fn is_ai(&self) -> bool {
        matches!(self, Message::AI { .. })
    }

    /// Get the message content
    #[must_use]
    pub fn content(&self) -> &MessageContent {
        match self {
            Message::System { content, .. }
            | Message::Human { content, .. }
            | Message::AI { content, .. } => content,
        }
    }

    /// Get the message content as plain text
    #[must_use]
    pub fn as_text(&self) -> String {
        self.content().as_text()
    }

    /// Get the canonical role string for this message
    #[must_use]
    pub fn role(&self) -> &'static str {
        match self {
            Message::System { .. } => "system",
            Message::Human { .. } => "human",
            Message::AI { .. } => "ai",
        }
    }

    /// Build a message from a role string.
    ///
    /// Accepts the canonical roles plus the common aliases `"user"` (human)
    /// and `"assistant"` (ai).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for unknown roles.
    pub fn from_role(role: &str, content: impl Into<MessageContent>) -> Result<Self> {
        match role {
            "system" => Ok(Message::system(content)),
            "human" | "user" => Ok(Message::human(content)),
            "ai" | "assistant" => Ok(Message::ai(content)),
            other => Err(Error::invalid_input(format!(
                "Unknown message role: '{other}' (expected system, human/user, or ai/assistant)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    use super::{BaseMessageFields, ContentBlock};

    #[test]
    fn test_message_constructors() {
        let human = Message::human("Hello");
        assert!(human.is_human());
        assert_eq!(human.as_text(), "Hello");

        let ai = Message::ai("Hi there");
        assert!(ai.is_ai());
        assert_eq!(ai.as_text(), "Hi there");

        let system = Message::system("You are helpful");
        assert!(system.is_system());
        assert_eq!(system.as_text(), "You are helpful");
    }

    #[test]
    fn test_message_content() {
        let content = MessageContent::Text("test".to_string());
        assert_eq!(content.as_text(), "test");
        assert!(!content.is_empty());

        let blocks = MessageContent::Blocks(vec![
            ContentBlock::Text {
                text: "Hello".to_string(),
            },
            ContentBlock::Text {
                text: "World".to_string(),
            },
        ]);
        assert_eq!(blocks.as_text(), "Hello\nWorld");
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::human("test message");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();

        assert_eq!(msg, deserialized);
        assert_eq!(deserialized.as_text(), "test message");
    }

    #[test]
    fn test_message_serialization_role_tag() {
        let msg = Message::ai("answer");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "ai");
        assert_eq!(value["content"], "answer");
    }

    #[test]
    fn test_message_list_roundtrip() {
        let messages = vec![
            Message::system("be brief"),
            Message::human("hi"),
            Message::ai("hello"),
        ];
        let json = serde_json::to_string(&messages).unwrap();
        let deserialized: Vec<Message> = serde_json::from_str(&json).unwrap();
        assert_eq!(messages, deserialized);
    }

    #[test]
    fn test_from_role() {
        assert!(Message::from_role("system", "x").unwrap().is_system());
        assert!(Message::from_role("human", "x").unwrap().is_human());
        assert!(Message::from_role("user", "x").unwrap().is_human());
        assert!(Message::from_role("ai", "x").unwrap().is_ai());
        assert!(Message::from_role("assistant", "x").unwrap().is_ai());
    }

    #[test]
    fn test_from_role_unknown() {
        let err = Message::from_role("robot", "x").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("robot"));
    }

    #[test]
    fn test_message_fields_default() {
        let fields = BaseMessageFields::default();
        assert!(fields.name.is_none());
        assert!(fields.id.is_none());
        assert!(fields.additional_kwargs.is_empty());
    }

    #[test]
    fn test_message_role_strings() {
        assert_eq!(Message::system("x").role(), "system");
        assert_eq!(Message::human("x").role(), "human");
        assert_eq!(Message::ai("x").role(), "ai");
    }
}
