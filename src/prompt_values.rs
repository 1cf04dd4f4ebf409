//! Prompt values for language model prompts
//!
//! Prompt values are used to represent different pieces of prompts.
//! They can be used to represent text or chat message pieces.

use serde::{Deserialize, Serialize};

use crate::messages::Message;

/// Base trait for inputs to any language model
///
/// `PromptValue` can be converted to both LLM (pure text-generation) inputs
/// and chat model inputs.
pub trait PromptValue: Send + Sync {
    /// Return prompt value as string
    fn to_string(&self) -> String;

    /// Return prompt as a list of messages
    fn to_messages(&self) -> Vec<Message>;
}

/// String prompt value
///
/// Represents a simple text prompt that can be used with LLMs or
/// converted to a `HumanMessage` for chat models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StringPromptValue {
    /// Prompt text
    pub text: String,
}

impl StringPromptValue {
    /// Create a new string prompt value
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl PromptValue for StringPromptValue {
    fn to_string(&self) -> String {
        self.text.clone()
    }

    fn to_messages(&self) -> Vec<Message> {
        vec![Message::human(self.text.clone())]
    }
}

/// Chat prompt value
///
/// A type of prompt value that is built from messages.
/// This is used when you want to pass a sequence of messages
/// to a chat model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatPromptValue {
    /// List of messages
    pub messages: Vec<Message>,
}

impl ChatPromptValue {
    /// Create a new chat prompt value from messages
    #[must_use]
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl PromptValue for ChatPromptValue {
    fn to_string(&self) -> String {
        // Buffer string representation: "System: ...\nHuman: ...\nAI: ..."
        self.messages
            .iter()
            .map(|msg| match msg {
                Message::System { content, .. } => format!("System: {}", content.as_text()),
                Message::Human { content, .. } => format!("Human: {}", content.as_text()),
                Message::AI { content, .. } => format!("AI: {}", content.as_text()),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_messages(&self) -> Vec<Message> {
        self.messages.clone()
    }
}
