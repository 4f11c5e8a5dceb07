//! Generation provider factory.

use crate::config::{ProviderKind, ResolvedConfig};

use super::cohere::CohereChat;
use super::ollama::OllamaGenerator;
use super::provider::BoxedGenerator;

/// Create the configured generation provider.
///
/// Priority:
/// 1. Explicit provider in config (`ASKBOOK_GENERATION_PROVIDER`)
/// 2. Cohere, when an API key is present
///
/// Returns `None` when nothing is configured.
#[must_use]
pub fn create_generation_provider(config: &ResolvedConfig) -> Option<BoxedGenerator> {
    match config.generation_provider {
        Some(ProviderKind::Ollama) => Some(BoxedGenerator::new(OllamaGenerator::new(
            &config.ollama_endpoint,
            &config.ollama_model,
        ))),
        Some(ProviderKind::Cohere) | None => {
            let key = config.cohere_api_key.as_deref()?;
            CohereChat::new(key, &config.cohere_base_url).map(BoxedGenerator::new)
        }
    }
}
