//! Query embedding with a zero-vector fallback.
//!
//! Retrieval must never fail because the embedding service is down or
//! unconfigured. [`QueryEmbedder`] always returns a vector of the configured
//! dimensionality and records where it came from.

use serde::Serialize;
use tracing::{debug, warn};

use super::provider::EmbeddingProvider;
use super::types::EmbeddingPurpose;

/// Where an [`Embedding`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingSource {
    Provider,
    ZeroFallback,
}

/// A fixed-length query vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub source: EmbeddingSource,
}

impl Embedding {
    /// The all-zeros vector of length `dimensions`.
    #[must_use]
    pub fn zeros(dimensions: usize) -> Self {
        Self {
            vector: vec![0.0; dimensions],
            source: EmbeddingSource::ZeroFallback,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == EmbeddingSource::ZeroFallback
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vector.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }
}

/// Embeds queries with the search-query purpose.
pub struct QueryEmbedder<E> {
    provider: Option<E>,
    dimensions: usize,
}

impl<E: EmbeddingProvider> QueryEmbedder<E> {
    /// Create an embedder. `provider` is `None` when nothing is configured.
    pub fn new(provider: Option<E>, dimensions: usize) -> Self {
        Self {
            provider,
            dimensions,
        }
    }

    /// Whether a provider is configured.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Configured output dimensionality.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Underlying provider, if configured.
    pub fn provider(&self) -> Option<&E> {
        self.provider.as_ref()
    }

    /// Embed a query. Never fails.
    ///
    /// Absence, transport errors and vectors of the wrong length all yield
    /// the zero vector.
    pub async fn embed(&self, query: &str) -> Embedding {
        let Some(provider) = &self.provider else {
            warn!("Embedding provider not configured, using zero vector");
            return Embedding::zeros(self.dimensions);
        };

        match provider.embed(query, EmbeddingPurpose::SearchQuery).await {
            Ok(vector) if vector.len() == self.dimensions => {
                debug!(dimensions = vector.len(), "Query embedded");
                Embedding {
                    vector,
                    source: EmbeddingSource::Provider,
                }
            }
            Ok(vector) => {
                warn!(
                    expected = self.dimensions,
                    got = vector.len(),
                    "Embedding has wrong dimensionality, using zero vector"
                );
                Embedding::zeros(self.dimensions)
            }
            Err(e) => {
                warn!("Error generating embedding: {e}");
                Embedding::zeros(self.dimensions)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::types::ProviderInfo;
    use crate::error::{Error, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Vector(Vec<f32>),
        Fail,
    }

    struct Scripted {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl EmbeddingProvider for Scripted {
        fn info(&self) -> ProviderInfo {
            ProviderInfo {
                name: "scripted".into(),
                model: "test".into(),
                dimensions: 4,
            }
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn embed(&self, _text: &str, purpose: EmbeddingPurpose) -> Result<Vec<f32>> {
            assert_eq!(purpose, EmbeddingPurpose::SearchQuery);
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Vector(v) => Ok(v.clone()),
                Behavior::Fail => Err(Error::Embedding("service down".into())),
            }
        }
    }

    #[tokio::test]
    async fn test_provider_vector_passes_through() {
        let embedder = QueryEmbedder::new(
            Some(Scripted::new(Behavior::Vector(vec![0.1, 0.2, 0.3, 0.4]))),
            4,
        );
        let embedding = embedder.embed("What is ROS 2?").await;
        assert_eq!(embedding.source, EmbeddingSource::Provider);
        assert_eq!(embedding.vector, vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[tokio::test]
    async fn test_absent_provider_yields_zero_vector() {
        let embedder: QueryEmbedder<Scripted> = QueryEmbedder::new(None, 1024);
        for query in ["", "anything", "روبوٹ"] {
            let embedding = embedder.embed(query).await;
            assert!(embedding.is_fallback());
            assert_eq!(embedding.len(), 1024);
            assert!(embedding.vector.iter().all(|x| *x == 0.0));
        }
    }

    #[tokio::test]
    async fn test_provider_error_yields_zero_vector() {
        let embedder = QueryEmbedder::new(Some(Scripted::new(Behavior::Fail)), 1024);
        let embedding = embedder.embed("anything").await;
        assert!(embedding.is_fallback());
        assert_eq!(embedding.len(), 1024);
        assert_eq!(embedder.provider().unwrap().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_wrong_length_yields_zero_vector() {
        let embedder = QueryEmbedder::new(Some(Scripted::new(Behavior::Vector(vec![1.0; 3]))), 4);
        let embedding = embedder.embed("q").await;
        assert!(embedding.is_fallback());
        assert_eq!(embedding.vector, vec![0.0; 4]);
    }
}
