//! Testing utilities
//!
//! Deterministic stand-ins for external capabilities, so selector and vector
//! store behavior can be tested without a model provider.

use async_trait::async_trait;

use crate::embeddings::Embeddings;
use crate::error::Result;

const FAKE_DIMENSION: usize = 32;

/// Deterministic embeddings for tests.
///
/// Embeds text as a normalized byte histogram: identical texts map to
/// identical vectors, and texts sharing characters score as more similar
/// under cosine distance. No semantic meaning, but stable and dependency-free.
#[derive(Debug, Clone, Default)]
pub struct FakeEmbeddings;

impl FakeEmbeddings {
    /// Create a new fake embedder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn embed(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; FAKE_DIMENSION];
        for byte in text.to_lowercase().bytes() {
            vector[usize::from(byte) % FAKE_DIMENSION] += 1.0;
        }

        let magnitude = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }
        vector
    }
}

#[async_trait]
impl Embeddings for FakeEmbeddings {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| Self::embed(text)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::embed(text))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[tokio::test]
    async fn test_deterministic() {
        let embedder = FakeEmbeddings::new();
        let a = embedder.embed_query("hello world").await.unwrap();
        let b = embedder.embed_query("hello world").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_fixed_dimension() {
        let embedder = FakeEmbeddings::new();
        let texts = vec!["short".to_string(), "a much longer text".to_string()];
        let vectors = embedder.embed_documents(&texts).await.unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].len(), vectors[1].len());
    }

    #[tokio::test]
    async fn test_normalized() {
        let embedder = FakeEmbeddings::new();
        let vector = embedder.embed_query("some text").await.unwrap();
        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 1e-5);
    }
}
