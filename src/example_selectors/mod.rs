//! Example selection for few-shot prompting
//!
//! An example selector chooses which example records a few-shot template
//! should include for a given input. The selector decides both membership and
//! order; the template formats whatever comes back, unmodified.
//!
//! - [`SemanticSimilarityExampleSelector`] - top-k most similar examples via
//!   a vector store
//! - [`LengthBasedExampleSelector`] - as many examples as fit a length budget

pub mod length_based;
pub mod semantic_similarity;

pub use length_based::LengthBasedExampleSelector;
pub use semantic_similarity::SemanticSimilarityExampleSelector;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

/// One input/output example record: field name to text.
///
/// Immutable once stored; the fields must match what the example prompt
/// references.
pub type Example = HashMap<String, String>;

/// Interface for selecting which examples to include in a prompt.
#[async_trait]
pub trait ExampleSelector: Send + Sync {
    /// Add an example to the selector's store.
    async fn add_example(&self, example: Example) -> Result<()>;

    /// Select examples for the given input, in the order they should appear.
    ///
    /// The ordering of ties is implementation-defined and passed through
    /// as-is by few-shot templates.
    async fn select_examples(&self, input: &HashMap<String, String>) -> Result<Vec<Example>>;
}

/// Build the text form of an example or input map: values joined with a
/// space, in sorted key order, optionally restricted to `keys`.
pub(crate) fn map_to_text(map: &HashMap<String, String>, keys: Option<&[String]>) -> String {
    let mut selected: Vec<(&String, &String)> = match keys {
        Some(keys) => map
            .iter()
            .filter(|(k, _)| keys.contains(*k))
            .collect(),
        None => map.iter().collect(),
    };
    selected.sort_by(|a, b| a.0.cmp(b.0));
    selected
        .into_iter()
        .map(|(_, v)| v.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::map_to_text;
    use crate::test_prelude::*;

    #[test]
    fn test_map_to_text_sorted_by_key() {
        let map = HashMap::from([
            ("b".to_string(), "second".to_string()),
            ("a".to_string(), "first".to_string()),
        ]);
        assert_eq!(map_to_text(&map, None), "first second");
    }

    #[test]
    fn test_map_to_text_restricted_keys() {
        let map = HashMap::from([
            ("input".to_string(), "question".to_string()),
            ("output".to_string(), "answer".to_string()),
        ]);
        let keys = vec!["input".to_string()];
        assert_eq!(map_to_text(&map, Some(&keys)), "question");
    }

    #[test]
    fn test_map_to_text_empty() {
        assert_eq!(map_to_text(&HashMap::new(), None), "");
    }
}
