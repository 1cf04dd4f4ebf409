//! Few-shot chat prompt templates
//!
//! A few-shot template turns example records into a run of chat messages:
//! each example is formatted through an example prompt (typically one human
//! and one AI message) and the results are concatenated in example order.
//! Examples come from exactly one of two sources: a fixed list, or an
//! [`ExampleSelector`] that picks the most relevant records for the current
//! input at format time.
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
//! let examples = vec![HashMap::from([
//!     ("input".to_string(), "2+2".to_string()),
//!     ("output".to_string(), "4".to_string()),
//! ])];
//!
//! let few_shot = FewShotChatMessagePromptTemplate::from_examples(example_prompt, examples);
//! let messages = few_shot.format_messages(&HashMap::new()).await.unwrap();
//! assert_eq!(messages.len(), 2);
//! # });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::example_selectors::{Example, ExampleSelector};
use crate::messages::Message;
use crate::prompt_values::{ChatPromptValue, PromptValue};
use crate::prompts::base::BasePromptTemplate;
use crate::prompts::chat::ChatPromptTemplate;

/// Where a few-shot template gets its examples.
///
/// Exactly one source is active: either a fixed list, or a selector queried
/// with the formatting inputs.
#[derive(Clone)]
pub enum ExampleSource {
    /// Fixed example list, used in order
    Static(Vec<Example>),
    /// Selector queried at format time
    Selector(Arc<dyn ExampleSelector>),
}

impl fmt::Debug for ExampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExampleSource::Static(examples) => f
                .debug_tuple("Static")
                .field(&examples.len())
                .finish(),
            ExampleSource::Selector(_) => f.write_str("Selector(..)"),
        }
    }
}

/// Chat prompt template that prepends formatted examples.
///
/// Formatting N examples through an example prompt producing M messages each
/// yields exactly N*M messages, in example order. Formatting failures (an
/// example record missing a field the example prompt references) propagate to
/// the caller; malformed examples are never silently skipped.
#[derive(Debug, Clone)]
pub struct FewShotChatMessagePromptTemplate {
    example_prompt: ChatPromptTemplate,
    source: ExampleSource,
    input_variables: Vec<String>,
    partial_variables: HashMap<String, String>,
}

impl FewShotChatMessagePromptTemplate {
    /// Create a few-shot template over a fixed example list.
    #[must_use]
    pub fn from_examples(example_prompt: ChatPromptTemplate, examples: Vec<Example>) -> Self {
        Self {
            example_prompt,
            source: ExampleSource::Static(examples),
            input_variables: Vec::new(),
            partial_variables: HashMap::new(),
        }
    }

    /// Create a few-shot template backed by an example selector.
    ///
    /// The selector is queried with the formatting inputs each time the
    /// template is formatted; selected examples are formatted in the order
    /// the selector returned them.
    #[must_use]
    pub fn with_selector(
        example_prompt: ChatPromptTemplate,
        selector: Arc<dyn ExampleSelector>,
    ) -> Self {
        Self {
            example_prompt,
            source: ExampleSource::Selector(selector),
            input_variables: Vec::new(),
            partial_variables: HashMap::new(),
        }
    }

    /// The example source backing this template.
    #[must_use]
    pub fn source(&self) -> &ExampleSource {
        &self.source
    }

    /// Resolve the examples to format for the given inputs.
    async fn resolve_examples(&self, inputs: &HashMap<String, String>) -> Result<Vec<Example>> {
        match &self.source {
            ExampleSource::Static(examples) => Ok(examples.clone()),
            ExampleSource::Selector(selector) => {
                let selected = selector.select_examples(inputs).await?;
                debug!(count = selected.len(), "selected examples for few-shot prompt");
                Ok(selected)
            }
        }
    }

    /// Format every example through the example prompt, in order.
    ///
    /// Returns a boxed future because example prompts are chat templates,
    /// which may themselves nest few-shot blocks.
    pub fn format_messages<'a>(
        &'a self,
        inputs: &'a HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Message>>> + Send + 'a>> {
        Box::pin(async move {
            let examples = self.resolve_examples(inputs).await?;
            let mut messages = Vec::new();
            for example in &examples {
                messages.extend(self.example_prompt.format_messages(example).await?);
            }
            Ok(messages)
        })
    }
}

#[async_trait]
impl BasePromptTemplate for FewShotChatMessagePromptTemplate {
    fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    fn partial_variables(&self) -> &HashMap<String, String> {
        &self.partial_variables
    }

    async fn format_prompt(
        &self,
        inputs: &HashMap<String, String>,
    ) -> Result<Box<dyn PromptValue>> {
        let messages = self.format_messages(inputs).await?;
        Ok(Box::new(ChatPromptValue::new(messages)))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    fn example(pairs: &[(&str, &str)]) -> Example {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn arithmetic_prompt() -> ChatPromptTemplate {
        ChatPromptTemplate::from_messages(vec![("human", "{input}"), ("ai", "{output}")])
            .expect("static roles")
    }

    #[tokio::test]
    async fn test_single_example() {
        let few_shot = FewShotChatMessagePromptTemplate::from_examples(
            arithmetic_prompt(),
            vec![example(&[("input", "2+2"), ("output", "4")])],
        );

        let messages = few_shot.format_messages(&HashMap::new()).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].is_human());
        assert_eq!(messages[0].as_text(), "2+2");
        assert!(messages[1].is_ai());
        assert_eq!(messages[1].as_text(), "4");
    }

    #[tokio::test]
    async fn test_n_examples_yield_2n_messages_in_order() {
        let examples = vec![
            example(&[("input", "2+2"), ("output", "4")]),
            example(&[("input", "2+3"), ("output", "5")]),
            example(&[("input", "10-7"), ("output", "3")]),
        ];
        let few_shot =
            FewShotChatMessagePromptTemplate::from_examples(arithmetic_prompt(), examples);

        let messages = few_shot.format_messages(&HashMap::new()).await.unwrap();
        assert_eq!(messages.len(), 6);

        let texts: Vec<String> = messages.iter().map(Message::as_text).collect();
        assert_eq!(texts, vec!["2+2", "4", "2+3", "5", "10-7", "3"]);
    }

    #[tokio::test]
    async fn test_no_examples() {
        let few_shot =
            FewShotChatMessagePromptTemplate::from_examples(arithmetic_prompt(), vec![]);
        let messages = few_shot.format_messages(&HashMap::new()).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_missing_example_field_fails() {
        let few_shot = FewShotChatMessagePromptTemplate::from_examples(
            arithmetic_prompt(),
            vec![example(&[("input", "2+2")])], // no "output"
        );

        let err = few_shot.format_messages(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("output"));
    }

    #[tokio::test]
    async fn test_nested_in_chat_template() {
        let few_shot = FewShotChatMessagePromptTemplate::from_examples(
            arithmetic_prompt(),
            vec![example(&[("input", "2+2"), ("output", "4")])],
        );

        let final_prompt = ChatPromptTemplate::from_messages(vec![(
            "system",
            "You are a wondrous wizard of math.",
        )])
        .unwrap()
            + few_shot
            + ChatPromptTemplate::from_messages(vec![("human", "{input}")]).unwrap();

        let mut values = HashMap::new();
        values.insert("input".to_string(), "What is 3+3?".to_string());

        let messages = final_prompt.format_messages(&values).await.unwrap();
        assert_eq!(messages.len(), 4);
        assert!(messages[0].is_system());
        assert_eq!(messages[1].as_text(), "2+2");
        assert_eq!(messages[2].as_text(), "4");
        assert_eq!(messages[3].as_text(), "What is 3+3?");
    }

    #[tokio::test]
    async fn test_format_prompt_value() {
        let few_shot = FewShotChatMessagePromptTemplate::from_examples(
            arithmetic_prompt(),
            vec![example(&[("input", "2+2"), ("output", "4")])],
        );
        let value = few_shot.format_prompt(&HashMap::new()).await.unwrap();
        assert_eq!(value.to_string(), "Human: 2+2\nAI: 4");
    }
}
