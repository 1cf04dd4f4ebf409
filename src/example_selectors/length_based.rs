//! Length-based example selection
//!
//! Packs examples in insertion order while a word-count budget allows.
//! Useful when the model context is tight and examples vary in size.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::example_selectors::{map_to_text, Example, ExampleSelector};
use crate::prompts::PromptTemplate;

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Example selector that fits as many examples as a length budget allows.
///
/// Each example is rendered through `example_prompt` to measure its length in
/// words. Selection walks the examples in insertion order, subtracting each
/// rendered length from the remaining budget, and stops at the first example
/// that does not fit.
pub struct LengthBasedExampleSelector {
    examples: RwLock<Vec<Example>>,
    example_prompt: PromptTemplate,
    max_length: usize,
}

impl LengthBasedExampleSelector {
    /// Create a selector with a word budget.
    #[must_use]
    pub fn new(examples: Vec<Example>, example_prompt: PromptTemplate, max_length: usize) -> Self {
        Self {
            examples: RwLock::new(examples),
            example_prompt,
            max_length,
        }
    }

    /// The word budget shared by the input and the selected examples.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[async_trait]
impl ExampleSelector for LengthBasedExampleSelector {
    async fn add_example(&self, example: Example) -> Result<()> {
        self.examples.write().await.push(example);
        Ok(())
    }

    async fn select_examples(&self, input: &HashMap<String, String>) -> Result<Vec<Example>> {
        let input_text = map_to_text(input, None);
        let mut remaining = self
            .max_length
            .saturating_sub(word_count(&input_text));

        let examples = self.examples.read().await;
        let mut selected = Vec::new();
        for example in examples.iter() {
            let rendered = self.example_prompt.format(example)?;
            let length = word_count(&rendered);
            if length > remaining {
                break;
            }
            remaining -= length;
            selected.push(example.clone());
        }

        Ok(selected)
    }
}
