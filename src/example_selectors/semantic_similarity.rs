//! Semantic-similarity example selection
//!
//! Stores example records in a vector store (the example text is embedded,
//! the full record rides along as document metadata) and selects the k most
//! similar records for a given input. Result order is whatever the store
//! returns; ties are not re-ranked here.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::example_selectors::{map_to_text, Example, ExampleSelector};
use crate::vector_stores::VectorStore;

/// Example selector backed by vector similarity search.
///
/// # Example
///
/// ```rust,ignore
/// use promptkit::example_selectors::SemanticSimilarityExampleSelector;
/// use promptkit::vector_stores::InMemoryVectorStore;
///
/// let store = InMemoryVectorStore::new(embeddings);
/// let selector = SemanticSimilarityExampleSelector::from_examples(examples, store, 2).await?;
/// let chosen = selector.select_examples(&input).await?;
/// ```
pub struct SemanticSimilarityExampleSelector<S: VectorStore> {
    store: RwLock<S>,
    k: usize,
    input_keys: Option<Vec<String>>,
    example_keys: Option<Vec<String>>,
}

impl<S: VectorStore> SemanticSimilarityExampleSelector<S> {
    /// Create a selector over an existing (possibly pre-populated) store.
    #[must_use]
    pub fn new(store: S, k: usize) -> Self {
        Self {
            store: RwLock::new(store),
            k,
            input_keys: None,
            example_keys: None,
        }
    }

    /// Restrict which input fields form the similarity query (builder pattern).
    #[must_use]
    pub fn with_input_keys(mut self, keys: Vec<String>) -> Self {
        self.input_keys = Some(keys);
        self
    }

    /// Restrict which fields of a stored example are returned (builder pattern).
    #[must_use]
    pub fn with_example_keys(mut self, keys: Vec<String>) -> Self {
        self.example_keys = Some(keys);
        self
    }

    /// Number of examples returned per selection.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Create a selector and seed the store with the given examples.
    pub async fn from_examples(examples: Vec<Example>, store: S, k: usize) -> Result<Self> {
        let selector = Self::new(store, k);
        for example in examples {
            selector.add_example(example).await?;
        }
        Ok(selector)
    }

    fn example_from_metadata(&self, metadata: &HashMap<String, serde_json::Value>) -> Example {
        metadata
            .iter()
            .filter(|(key, _)| {
                self.example_keys
                    .as_ref()
                    .map_or(true, |keys| keys.contains(*key))
            })
            .map(|(key, value)| {
                let text = value
                    .as_str()
                    .map_or_else(|| value.to_string(), ToString::to_string);
                (key.clone(), text)
            })
            .collect()
    }
}

#[async_trait]
impl<S: VectorStore> ExampleSelector for SemanticSimilarityExampleSelector<S> {
    async fn add_example(&self, example: Example) -> Result<()> {
        let text = map_to_text(&example, self.input_keys.as_deref());
        let metadata: HashMap<String, serde_json::Value> = example
            .into_iter()
            .map(|(key, value)| (key, serde_json::Value::String(value)))
            .collect();

        let mut store = self.store.write().await;
        store.add_texts(&[text], Some(&[metadata]), None).await?;
        Ok(())
    }

    async fn select_examples(&self, input: &HashMap<String, String>) -> Result<Vec<Example>> {
        let query = map_to_text(input, self.input_keys.as_deref());
        let store = self.store.read().await;
        let documents = store.similarity_search(&query, self.k, None).await?;
        debug!(k = self.k, returned = documents.len(), "semantic similarity selection");

        Ok(documents
            .iter()
            .map(|doc| self.example_from_metadata(&doc.metadata))
            .collect())
    }
}
