//! Embedding seam — pluggable, trait-based embedder carried in `AppState`
//! as `Arc<dyn Embedder>`.
//!
//! Default: `LlmEmbedder` (hosted embeddings API). Fallback:
//! `HashEmbedder`, a deterministic local embedder for offline development,
//! selected via `USE_HASH_EMBEDDER`. Both produce `EMBEDDING_DIM` vectors.

use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, EMBEDDING_DIM};

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError>;
}

/// Hosted embeddings via the LLM client.
pub struct LlmEmbedder(pub LlmClient);

#[async_trait]
impl Embedder for LlmEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        self.0
            .embed(text)
            .await
            .map_err(|e| AppError::Llm(format!("Embedding generation failed: {e}")))
    }
}

/// Deterministic local embedder: expands a text hash into a fixed-length
/// vector of values in [-1, 1]. Not semantically meaningful — useful only
/// when the hosted API is unavailable.
pub struct HashEmbedder;

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        Ok(hash_embedding(text, EMBEDDING_DIM))
    }
}

fn hash_embedding(text: &str, dim: usize) -> Vec<f32> {
    let mut embedding = Vec::with_capacity(dim);
    let mut block: u64 = 0;
    while embedding.len() < dim {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        block.hash(&mut hasher);
        let digest = hasher.finish();
        for byte in digest.to_le_bytes() {
            // Map each byte to a float in [-1, 1].
            embedding.push((byte as f32 / 127.5) - 1.0);
            if embedding.len() >= dim {
                break;
            }
        }
        block += 1;
    }
    embedding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_embedding_has_requested_dimension() {
        assert_eq!(hash_embedding("resume text", EMBEDDING_DIM).len(), EMBEDDING_DIM);
    }

    #[test]
    fn test_hash_embedding_is_deterministic() {
        assert_eq!(hash_embedding("abc", 32), hash_embedding("abc", 32));
    }

    #[test]
    fn test_hash_embedding_differs_per_text() {
        assert_ne!(hash_embedding("abc", 32), hash_embedding("abd", 32));
    }

    #[test]
    fn test_hash_embedding_values_bounded() {
        for v in hash_embedding("bounded", 64) {
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
