//! Vector stores for storing and searching embedded data.
//!
//! Vector stores store embedded data (vectors) and perform vector search to
//! find the most similar vectors to a query. In this crate they back the
//! [`SemanticSimilarityExampleSelector`](crate::example_selectors::SemanticSimilarityExampleSelector):
//! example records are stored as document metadata and the selector retrieves
//! the k most similar records for a given input.
//!
//! The [`VectorStore`] trait is the consumed contract; implementations
//! typically integrate with specialized vector databases. [`InMemoryVectorStore`]
//! is a brute-force reference implementation for tests and small example sets.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::documents::Document;
use crate::embeddings::Embeddings;
use crate::error::{Error, Result};

/// Distance metric used for vector similarity calculation.
///
/// Different metrics are appropriate for different embedding models:
/// - **Cosine**: Best for normalized embeddings
/// - **Euclidean**: Good for unnormalized embeddings
/// - **`DotProduct`**: Fast, works well with normalized embeddings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceMetric {
    /// Cosine distance: measures angle between vectors (0 = identical, 2 = opposite)
    #[default]
    Cosine,

    /// Euclidean distance: L2 norm (0 = identical)
    Euclidean,

    /// Dot product: inner product of vectors, higher is more similar
    DotProduct,
}

impl DistanceMetric {
    /// Calculate distance between two vectors.
    ///
    /// Returns the raw distance value (interpretation depends on metric).
    pub fn calculate(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(Error::config(format!(
                "Vector dimension mismatch: {} vs {}",
                a.len(),
                b.len()
            )));
        }

        match self {
            DistanceMetric::Cosine => Self::cosine_distance(a, b),
            DistanceMetric::Euclidean => Self::euclidean_distance(a, b),
            DistanceMetric::DotProduct => Ok(Self::dot_product(a, b)),
        }
    }

    /// Convert raw distance to normalized relevance score in [0, 1].
    ///
    /// 0 = dissimilar, 1 = most similar
    #[must_use]
    pub fn distance_to_relevance(&self, distance: f32) -> f32 {
        match self {
            DistanceMetric::Cosine => {
                // Cosine distance is [0, 2], convert to similarity [0, 1]
                1.0 - (distance / 2.0)
            }
            DistanceMetric::Euclidean => {
                // Euclidean distance for normalized embeddings is [0, sqrt(2)]
                1.0 - (distance / 2.0_f32.sqrt())
            }
            DistanceMetric::DotProduct => {
                // For normalized vectors the range is [-1, 1], convert to [0, 1]
                (distance + 1.0) / 2.0
            }
        }
    }

    /// Calculate cosine distance (1 - `cosine_similarity`)
    fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f32> {
        let dot = Self::dot_product(a, b);
        let norm_a = Self::magnitude(a);
        let norm_b = Self::magnitude(b);

        if norm_a == 0.0 || norm_b == 0.0 {
            return Ok(1.0); // Maximum distance for zero vectors
        }

        let similarity = dot / (norm_a * norm_b);
        // Clamp to [-1, 1] to handle floating point errors
        let similarity = similarity.clamp(-1.0, 1.0);
        Ok(1.0 - similarity)
    }

    /// Calculate Euclidean distance (L2 norm)
    fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32> {
        let sum: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
        Ok(sum.sqrt())
    }

    /// Calculate dot product
    fn dot_product(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    /// Calculate vector magnitude (L2 norm)
    fn magnitude(v: &[f32]) -> f32 {
        v.iter().map(|x| x.powi(2)).sum::<f32>().sqrt()
    }
}

/// Core vector store trait for storing and searching embeddings.
///
/// # Required Methods
///
/// Implementations must provide:
/// - `add_texts`: Add texts to the store
/// - `similarity_search`: Find k most similar documents
///
/// # Optional Methods
///
/// Default implementations are provided for `add_documents` (delegates to
/// `add_texts`), score and by-vector variants, `delete` and `get_by_ids`;
/// backends that do not support an operation return [`Error::NotImplemented`].
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Get the embeddings instance used by this vector store.
    ///
    /// Returns None if the vector store doesn't expose its embeddings.
    fn embeddings(&self) -> Option<Arc<dyn Embeddings>> {
        None
    }

    /// Get the distance metric used by this vector store.
    fn distance_metric(&self) -> DistanceMetric {
        DistanceMetric::Cosine
    }

    /// Add texts to the vector store.
    ///
    /// # Arguments
    ///
    /// * `texts` - Texts to embed and add to the store
    /// * `metadatas` - Optional metadata for each text (must match length of texts)
    /// * `ids` - Optional IDs for each text (if None, UUIDs will be generated)
    ///
    /// # Returns
    ///
    /// List of IDs for the added texts
    ///
    /// # Errors
    ///
    /// Returns error if metadata or ID lengths don't match the texts, if
    /// embedding fails, or if the storage operation fails.
    async fn add_texts(
        &mut self,
        texts: &[impl AsRef<str> + Send + Sync],
        metadatas: Option<&[HashMap<String, serde_json::Value>]>,
        ids: Option<&[String]>,
    ) -> Result<Vec<String>>;

    /// Add documents to the vector store.
    ///
    /// `page_content` is embedded; document metadata and ids are preserved
    /// unless `ids` overrides them.
    async fn add_documents(
        &mut self,
        documents: &[Document],
        ids: Option<&[String]>,
    ) -> Result<Vec<String>> {
        let texts: Vec<&str> = documents
            .iter()
            .map(|doc| doc.page_content.as_str())
            .collect();

        let metadatas: Vec<HashMap<String, serde_json::Value>> =
            documents.iter().map(|doc| doc.metadata.clone()).collect();

        let generated_ids: Vec<String>;
        let ids_ref = if let Some(ids) = ids {
            ids
        } else {
            // Use document IDs if available, otherwise generate UUIDs
            generated_ids = documents
                .iter()
                .map(|doc| {
                    doc.id
                        .clone()
                        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
                })
                .collect();
            &generated_ids
        };

        self.add_texts(&texts, Some(&metadatas), Some(ids_ref))
            .await
    }

    /// Find the k documents most similar to the query text.
    ///
    /// # Arguments
    ///
    /// * `query` - Query text to search for
    /// * `k` - Number of results to return
    /// * `filter` - Optional metadata filter (field -> value, exact match)
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<Document>>;

    /// Perform similarity search with relevance scores.
    ///
    /// Returns (document, score) tuples where score is in [0, 1]
    /// (0 = dissimilar, 1 = most similar).
    async fn similarity_search_with_score(
        &self,
        _query: &str,
        _k: usize,
        _filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<(Document, f32)>> {
        Err(Error::not_implemented(
            "similarity_search_with_score not implemented for this vector store",
        ))
    }

    /// Perform similarity search by embedding vector.
    async fn similarity_search_by_vector(
        &self,
        _embedding: &[f32],
        _k: usize,
        _filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<Document>> {
        Err(Error::not_implemented(
            "similarity_search_by_vector not implemented for this vector store",
        ))
    }

    /// Perform similarity search by embedding vector with scores.
    async fn similarity_search_by_vector_with_score(
        &self,
        _embedding: &[f32],
        _k: usize,
        _filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<(Document, f32)>> {
        Err(Error::not_implemented(
            "similarity_search_by_vector_with_score not implemented for this vector store",
        ))
    }

    /// Delete documents by ID.
    ///
    /// If `ids` is None, delete all documents. Returns true on success.
    async fn delete(&mut self, _ids: Option<&[String]>) -> Result<bool> {
        Err(Error::not_implemented(
            "delete not implemented for this vector store",
        ))
    }

    /// Get documents by their IDs.
    ///
    /// Missing IDs are skipped, not errors. Order of returned documents may
    /// not match the input order.
    async fn get_by_ids(&self, _ids: &[String]) -> Result<Vec<Document>> {
        Err(Error::not_implemented(
            "get_by_ids not implemented for this vector store",
        ))
    }
}

/// One stored vector with its source document.
#[derive(Debug, Clone)]
struct StoredEntry {
    id: String,
    vector: Vec<f32>,
    document: Document,
}

/// Brute-force in-memory vector store.
///
/// Embeds texts with the provided [`Embeddings`] and scores every stored
/// vector on each search. Intended for tests and small example sets; use a
/// real vector database backend for anything large.
///
/// # Example
///
/// ```rust,ignore
/// use promptkit::vector_stores::{InMemoryVectorStore, VectorStore};
///
/// let mut store = InMemoryVectorStore::new(embeddings);
/// store.add_texts(&["happy", "sad"], None, None).await?;
/// let results = store.similarity_search("joyful", 1, None).await?;
/// ```
pub struct InMemoryVectorStore {
    embeddings: Arc<dyn Embeddings>,
    metric: DistanceMetric,
    entries: Vec<StoredEntry>,
}

impl InMemoryVectorStore {
    /// Create an empty store using cosine distance.
    #[must_use]
    pub fn new(embeddings: Arc<dyn Embeddings>) -> Self {
        Self {
            embeddings,
            metric: DistanceMetric::Cosine,
            entries: Vec::new(),
        }
    }

    /// Set the distance metric (builder pattern).
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn matches_filter(
        document: &Document,
        filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> bool {
        filter.map_or(true, |filter| {
            filter
                .iter()
                .all(|(key, value)| document.metadata.get(key) == Some(value))
        })
    }

    fn scored_entries(
        &self,
        embedding: &[f32],
        k: usize,
        filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<(Document, f32)>> {
        let mut scored = Vec::new();
        for entry in &self.entries {
            if !Self::matches_filter(&entry.document, filter) {
                continue;
            }
            let distance = self.metric.calculate(embedding, &entry.vector)?;
            let score = self.metric.distance_to_relevance(distance);
            scored.push((entry.document.clone(), score));
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn embeddings(&self) -> Option<Arc<dyn Embeddings>> {
        Some(Arc::clone(&self.embeddings))
    }

    fn distance_metric(&self) -> DistanceMetric {
        self.metric
    }

    async fn add_texts(
        &mut self,
        texts: &[impl AsRef<str> + Send + Sync],
        metadatas: Option<&[HashMap<String, serde_json::Value>]>,
        ids: Option<&[String]>,
    ) -> Result<Vec<String>> {
        if let Some(metadatas) = metadatas {
            if metadatas.len() != texts.len() {
                return Err(Error::invalid_input(format!(
                    "Got {} metadatas for {} texts",
                    metadatas.len(),
                    texts.len()
                )));
            }
        }
        if let Some(ids) = ids {
            if ids.len() != texts.len() {
                return Err(Error::invalid_input(format!(
                    "Got {} ids for {} texts",
                    ids.len(),
                    texts.len()
                )));
            }
        }

        let owned: Vec<String> = texts.iter().map(|t| t.as_ref().to_string()).collect();
        let vectors = self.embeddings.embed_documents(&owned).await?;

        let mut assigned_ids = Vec::with_capacity(owned.len());
        for (i, (text, vector)) in owned.into_iter().zip(vectors).enumerate() {
            let id = ids
                .map(|ids| ids[i].clone())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            let mut document = Document::new(text).with_id(id.clone());
            if let Some(metadatas) = metadatas {
                document.metadata = metadatas[i].clone();
            }

            self.entries.push(StoredEntry {
                id: id.clone(),
                vector,
                document,
            });
            assigned_ids.push(id);
        }

        debug!(count = assigned_ids.len(), total = self.entries.len(), "added texts to in-memory store");
        Ok(assigned_ids)
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<Document>> {
        let results = self.similarity_search_with_score(query, k, filter).await?;
        Ok(results.into_iter().map(|(doc, _)| doc).collect())
    }

    async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
        filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<(Document, f32)>> {
        let embedding = self.embeddings.embed_query(query).await?;
        debug!(k, candidates = self.entries.len(), "similarity search");
        self.scored_entries(&embedding, k, filter)
    }

    async fn similarity_search_by_vector(
        &self,
        embedding: &[f32],
        k: usize,
        filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<Document>> {
        let results = self.scored_entries(embedding, k, filter)?;
        Ok(results.into_iter().map(|(doc, _)| doc).collect())
    }

    async fn similarity_search_by_vector_with_score(
        &self,
        embedding: &[f32],
        k: usize,
        filter: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<(Document, f32)>> {
        self.scored_entries(embedding, k, filter)
    }

    async fn delete(&mut self, ids: Option<&[String]>) -> Result<bool> {
        match ids {
            Some(ids) => self.entries.retain(|entry| !ids.contains(&entry.id)),
            None => self.entries.clear(),
        }
        Ok(true)
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Document>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| ids.contains(&entry.id))
            .map(|entry| entry.document.clone())
            .collect())
    }
}
