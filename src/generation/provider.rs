//! Generation provider trait.
//!
//! A generation provider takes a fully rendered prompt and returns the
//! model's text. Prompt construction lives in [`super::prompt`].

use crate::error::Result;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

/// Generation provider metadata.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratorInfo {
    /// Machine name, e.g. `cohere`.
    pub name: String,
    /// Display label used in failure messages, e.g. `Cohere`.
    pub label: String,
    pub model: Option<String>,
}

/// Trait for text generation providers.
pub trait GenerationProvider: Send + Sync {
    /// Get provider metadata.
    fn info(&self) -> GeneratorInfo;

    /// Check if the provider is reachable.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Send `prompt` and return the response text.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Boxed generator for runtime provider selection.
pub struct BoxedGenerator {
    inner: Box<dyn GenerationProviderBoxed>,
}

trait GenerationProviderBoxed: Send + Sync {
    fn info(&self) -> GeneratorInfo;
    fn is_available_boxed(&self) -> BoxFuture<'_, bool>;
    fn generate_boxed(&self, prompt: String) -> BoxFuture<'_, Result<String>>;
}

impl BoxedGenerator {
    /// Create a new boxed generator.
    pub fn new<G: GenerationProvider + 'static>(provider: G) -> Self {
        Self {
            inner: Box::new(BoxedGeneratorWrapper(provider)),
        }
    }
}

impl GenerationProvider for BoxedGenerator {
    fn info(&self) -> GeneratorInfo {
        self.inner.info()
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available_boxed().await
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.inner.generate_boxed(prompt.to_string()).await
    }
}

struct BoxedGeneratorWrapper<G: GenerationProvider + 'static>(G);

impl<G: GenerationProvider + 'static> GenerationProviderBoxed for BoxedGeneratorWrapper<G> {
    fn info(&self) -> GeneratorInfo {
        self.0.info()
    }

    fn is_available_boxed(&self) -> BoxFuture<'_, bool> {
        Box::pin(self.0.is_available())
    }

    fn generate_boxed(&self, prompt: String) -> BoxFuture<'_, Result<String>> {
        Box::pin(async move { self.0.generate(&prompt).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl GenerationProvider for Echo {
        fn info(&self) -> GeneratorInfo {
            GeneratorInfo {
                name: "echo".into(),
                label: "Echo".into(),
                model: None,
            }
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(prompt.to_uppercase())
        }
    }

    #[tokio::test]
    async fn test_boxed_generator_delegates() {
        let boxed = BoxedGenerator::new(Echo);
        assert_eq!(boxed.info().label, "Echo");
        assert!(boxed.is_available().await);
        assert_eq!(boxed.generate("hi").await.unwrap(), "HI");
    }
}
