//! Document types
//!
//! A [`Document`] pairs text content with JSON metadata. Vector stores index
//! documents; the semantic-similarity example selector stores each example
//! record in a document's metadata and reconstructs it from search results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text content with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The text content of the document
    pub page_content: String,

    /// Metadata associated with the document
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// Optional unique identifier for the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Document {
    /// Create a new document with the given text content.
    ///
    /// # Example
    ///
    /// ```
    /// use promptkit::documents::Document;
    ///
    /// let doc = Document::new("Hello, world!");
    /// assert_eq!(doc.page_content, "Hello, world!");
    /// ```
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: HashMap::new(),
            id: None,
        }
    }

    /// Add metadata to the document (builder pattern).
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the document ID (builder pattern).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
