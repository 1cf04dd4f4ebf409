//! Text embedding interface
//!
//! Embedding computation is an external capability: implementations wrap a
//! model provider and turn text into vectors. This crate only consumes the
//! trait, through [`VectorStore`](crate::vector_stores::VectorStore) backends.
//!
//! A deterministic test implementation lives in [`crate::testing::FakeEmbeddings`].

use async_trait::async_trait;

use crate::error::Result;

/// Interface for embedding models.
#[async_trait]
pub trait Embeddings: Send + Sync {
    /// Embed a batch of document texts.
    ///
    /// Returns one vector per input text, in input order. All vectors from a
    /// single implementation must have the same dimension.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query text.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;
}
