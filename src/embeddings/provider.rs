//! Embedding provider trait.
//!
//! Defines the interface that all embedding providers must implement.
//! Uses async methods for HTTP-based providers.

use super::types::{EmbeddingPurpose, ProviderInfo};
use crate::error::Result;
use std::future::Future;
use std::pin::Pin;

/// Trait for embedding providers.
///
/// Implemented by the Cohere and Ollama providers, and by test doubles.
pub trait EmbeddingProvider: Send + Sync {
    /// Get provider metadata.
    fn info(&self) -> ProviderInfo;

    /// Check if the provider is reachable.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Generate an embedding for a single text.
    fn embed(&self, text: &str, purpose: EmbeddingPurpose) -> impl Future<Output = Result<Vec<f32>>> + Send;

    /// Generate embeddings for multiple texts (batch).
    ///
    /// Default implementation calls `embed` for each text.
    fn embed_batch(
        &self,
        texts: &[&str],
        purpose: EmbeddingPurpose,
    ) -> impl Future<Output = Result<Vec<Vec<f32>>>> + Send {
        async move {
            let mut results = Vec::with_capacity(texts.len());
            for text in texts {
                results.push(self.embed(text, purpose).await?);
            }
            Ok(results)
        }
    }
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Boxed provider for dynamic dispatch.
///
/// Since the trait has async methods with `impl Future`, we need this wrapper
/// for runtime provider selection.
pub struct BoxedProvider {
    inner: Box<dyn EmbeddingProviderBoxed>,
}

/// Object-safe version of `EmbeddingProvider` for boxing.
trait EmbeddingProviderBoxed: Send + Sync {
    fn info(&self) -> ProviderInfo;
    fn is_available_boxed(&self) -> BoxFuture<'_, bool>;
    fn embed_boxed(&self, text: String, purpose: EmbeddingPurpose) -> BoxFuture<'_, Result<Vec<f32>>>;
    fn embed_batch_boxed(
        &self,
        texts: Vec<String>,
        purpose: EmbeddingPurpose,
    ) -> BoxFuture<'_, Result<Vec<Vec<f32>>>>;
}

impl BoxedProvider {
    /// Create a new boxed provider.
    pub fn new<P: EmbeddingProvider + 'static>(provider: P) -> Self {
        Self {
            inner: Box::new(BoxedProviderWrapper(provider)),
        }
    }
}

impl EmbeddingProvider for BoxedProvider {
    fn info(&self) -> ProviderInfo {
        self.inner.info()
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available_boxed().await
    }

    async fn embed(&self, text: &str, purpose: EmbeddingPurpose) -> Result<Vec<f32>> {
        self.inner.embed_boxed(text.to_string(), purpose).await
    }

    async fn embed_batch(&self, texts: &[&str], purpose: EmbeddingPurpose) -> Result<Vec<Vec<f32>>> {
        let owned = texts.iter().map(|s| (*s).to_string()).collect();
        self.inner.embed_batch_boxed(owned, purpose).await
    }
}

/// Wrapper to implement `EmbeddingProviderBoxed` for any `EmbeddingProvider`.
struct BoxedProviderWrapper<P: EmbeddingProvider + 'static>(P);

impl<P: EmbeddingProvider + 'static> EmbeddingProviderBoxed for BoxedProviderWrapper<P> {
    fn info(&self) -> ProviderInfo {
        self.0.info()
    }

    fn is_available_boxed(&self) -> BoxFuture<'_, bool> {
        Box::pin(self.0.is_available())
    }

    fn embed_boxed(&self, text: String, purpose: EmbeddingPurpose) -> BoxFuture<'_, Result<Vec<f32>>> {
        // Own the text so the future does not borrow from the caller.
        Box::pin(async move { self.0.embed(&text, purpose).await })
    }

    fn embed_batch_boxed(
        &self,
        texts: Vec<String>,
        purpose: EmbeddingPurpose,
    ) -> BoxFuture<'_, Result<Vec<Vec<f32>>>> {
        Box::pin(async move {
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            self.0.embed_batch(&refs, purpose).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl EmbeddingProvider for Fixed {
        fn info(&self) -> ProviderInfo {
            ProviderInfo {
                name: "fixed".into(),
                model: "fixed-1".into(),
                dimensions: 2,
            }
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn embed(&self, text: &str, _purpose: EmbeddingPurpose) -> Result<Vec<f32>> {
            #[allow(clippy::cast_precision_loss)]
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    #[tokio::test]
    async fn test_boxed_provider_delegates() {
        let boxed = BoxedProvider::new(Fixed);
        assert_eq!(boxed.info().name, "fixed");
        assert!(boxed.is_available().await);
        assert_eq!(
            boxed.embed("abc", EmbeddingPurpose::SearchQuery).await.unwrap(),
            vec![3.0, 1.0]
        );
    }

    #[tokio::test]
    async fn test_default_batch_embeds_each_text() {
        let boxed = BoxedProvider::new(Fixed);
        let out = boxed
            .embed_batch(&["a", "bb"], EmbeddingPurpose::SearchDocument)
            .await
            .unwrap();
        assert_eq!(out, vec![vec![1.0, 1.0], vec![2.0, 1.0]]);
    }
}
