//! Prompt templates for language models
//!
//! This module provides composable prompt templates for building structured
//! prompts for LLMs and chat models. Templates support `{variable}`
//! substitution and concatenate with `+`.
//!
//! # Overview
//!
//! - [`PromptTemplate`] - Simple string templates with variable substitution
//! - [`ChatPromptTemplate`] - Chat templates with multiple message roles
//! - [`MessagesPlaceholder`] - Placeholder for dynamic message lists
//! - [`FewShotChatMessagePromptTemplate`] - Example-driven message runs
//!
//! # Examples
//!
//! ## Simple String Template
//!
//! ```rust
//! use promptkit::prompts::PromptTemplate;
//! use std::collections::HashMap;
//!
//! let template = PromptTemplate::from_template("Tell me a joke about {topic}");
//!
//! let mut values = HashMap::new();
//! values.insert("topic".to_string(), "rust".to_string());
//!
//! let result = template.format(&values).unwrap();
//! assert!(result.contains("rust"));
//! ```
//!
//! ## Few-Shot Chat Template
//!
//! ```rust
//! use promptkit::prompts::{ChatPromptTemplate, FewShotChatMessagePromptTemplate};
//! use std::collections::HashMap;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let example_prompt = ChatPromptTemplate::from_messages(vec![
//!     ("human", "{input}"),
//!     ("ai", "{output}"),
//! ]).unwrap();
//!
//! let examples = vec![HashMap::from([
//!     ("input".to_string(), "2+2".to_string()),
//!     ("output".to_string(), "4".to_string()),
//! ])];
//!
//! let few_shot = FewShotChatMessagePromptTemplate::from_examples(example_prompt, examples);
//!
//! let final_prompt = ChatPromptTemplate::from_messages(vec![
//!     ("system", "You are a wondrous wizard of math."),
//! ]).unwrap()
//!     + few_shot
//!     + ChatPromptTemplate::from_messages(vec![("human", "{input}")]).unwrap();
//!
//! let mut values = HashMap::new();
//! values.insert("input".to_string(), "What is 3+3?".to_string());
//!
//! let messages = final_prompt.format_messages(&values).await.unwrap();
//! assert_eq!(messages.len(), 4);
//! # });
//! ```

pub mod base;
pub mod chat;
pub mod few_shot;
pub mod string;

pub use base::BasePromptTemplate;
pub use chat::{ChatPromptTemplate, MessageTemplate, MessagesPlaceholder};
pub use few_shot::{ExampleSource, FewShotChatMessagePromptTemplate};
pub use string::PromptTemplate;
