//! Embedding provider factory.
//!
//! Handles provider detection and creation.

use crate::config::{ProviderKind, ResolvedConfig};

use super::cohere::CohereEmbedder;
use super::ollama::OllamaProvider;
use super::provider::{BoxedProvider, EmbeddingProvider};

/// Available provider detection result.
#[derive(Debug, Clone)]
pub struct ProviderDetection {
    /// List of available provider names.
    pub available: Vec<String>,
    /// Recommended provider (first available).
    pub recommended: Option<String>,
}

/// Detect which embedding providers are usable right now.
///
/// Cohere counts as available when a key is configured; Ollama is pinged.
pub async fn detect_available_providers(config: &ResolvedConfig) -> ProviderDetection {
    let mut available = Vec::new();

    if config.has_cohere_key() {
        available.push("cohere".to_string());
    }

    let ollama = OllamaProvider::new(&config.ollama_endpoint, &config.ollama_embed_model);
    if ollama.is_available().await {
        available.push("ollama".to_string());
    }

    let recommended = available.first().cloned();

    ProviderDetection {
        available,
        recommended,
    }
}

/// Create an embedding provider based on configuration.
///
/// Priority:
/// 1. Explicit provider in config (`ASKBOOK_EMBED_PROVIDER`)
/// 2. Cohere, when an API key is present
///
/// Returns `None` when nothing is configured. No network call is made; an
/// unreachable provider surfaces later as a zero-vector fallback.
#[must_use]
pub fn create_embedding_provider(config: &ResolvedConfig) -> Option<BoxedProvider> {
    match config.embed_provider {
        Some(kind) => create_provider_by_type(kind, config),
        None => create_cohere(config),
    }
}

/// Create a specific provider by type.
fn create_provider_by_type(kind: ProviderKind, config: &ResolvedConfig) -> Option<BoxedProvider> {
    match kind {
        ProviderKind::Cohere => create_cohere(config),
        ProviderKind::Ollama => Some(BoxedProvider::new(OllamaProvider::new(
            &config.ollama_endpoint,
            &config.ollama_embed_model,
        ))),
    }
}

fn create_cohere(config: &ResolvedConfig) -> Option<BoxedProvider> {
    let key = config.cohere_api_key.as_deref()?;
    CohereEmbedder::new(key, &config.cohere_base_url, &config.cohere_embed_model)
        .map(BoxedProvider::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn config(pairs: &[(&str, &str)]) -> ResolvedConfig {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ResolvedConfig::resolve(&Settings::default(), None, move |key| {
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn test_nothing_configured_yields_none() {
        assert!(create_embedding_provider(&config(&[])).is_none());
    }

    #[test]
    fn test_cohere_key_selects_cohere() {
        let provider = create_embedding_provider(&config(&[("COHERE_API_KEY", "k")])).unwrap();
        assert_eq!(provider.info().name, "cohere");
        assert_eq!(provider.info().dimensions, 1024);
    }

    #[test]
    fn test_explicit_cohere_without_key_is_none() {
        let cfg = config(&[("ASKBOOK_EMBED_PROVIDER", "cohere")]);
        assert!(create_embedding_provider(&cfg).is_none());
    }

    #[test]
    fn test_explicit_ollama_is_built_without_probe() {
        let cfg = config(&[
            ("ASKBOOK_EMBED_PROVIDER", "ollama"),
            ("COHERE_API_KEY", "k"),
        ]);
        let provider = create_embedding_provider(&cfg).unwrap();
        assert_eq!(provider.info().name, "ollama");
        assert_eq!(provider.info().model, "mxbai-embed-large");
    }
}
