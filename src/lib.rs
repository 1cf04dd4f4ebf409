//! Few-shot chat prompt templates with pluggable example selection
//!
//! promptkit builds ordered message sequences for chat models: a system
//! message, a run of formatted input/output examples, and the trailing user
//! message. Examples come from a fixed list or from an example selector that
//! picks the most relevant records for the current input via vector
//! similarity search.
//!
//! # Core Concepts
//!
//! ## Messages
//!
//! The [`messages::Message`] enum is the role-tagged unit of exchange with a
//! chat model. Templates produce `Vec<Message>`.
//!
//! ## Prompt Templates
//!
//! [`prompts::PromptTemplate`] substitutes variables in a single text;
//! [`prompts::ChatPromptTemplate`] composes message-producing segments and
//! concatenates with `+`; [`prompts::FewShotChatMessagePromptTemplate`]
//! expands example records into message runs.
//!
//! ## Example Selection
//!
//! The [`example_selectors::ExampleSelector`] trait decides which examples a
//! few-shot template includes.
//! [`example_selectors::SemanticSimilarityExampleSelector`] picks the top-k
//! most similar examples through a [`vector_stores::VectorStore`].
//!
//! # Example
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
//! let examples = vec![
//!     HashMap::from([
//!         ("input".to_string(), "2+2".to_string()),
//!         ("output".to_string(), "4".to_string()),
//!     ]),
//!     HashMap::from([
//!         ("input".to_string(), "2+3".to_string()),
//!         ("output".to_string(), "5".to_string()),
//!     ]),
//! ];
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
//! values.insert("input".to_string(), "What is 4+4?".to_string());
//!
//! let messages = final_prompt.format_messages(&values).await.unwrap();
//! assert_eq!(messages.len(), 6);
//! # });
//! ```

pub mod documents;
pub mod embeddings;
pub mod error;
pub mod example_selectors;
pub mod messages;
pub mod prompt_values;
pub mod prompts;
pub mod testing;
pub mod vector_stores;

pub use error::{Error, Result};
