//! Embedding types and model metadata.

use serde::Serialize;

/// What an embedding will be used for.
///
/// Providers with asymmetric models (Cohere v3) embed queries and stored
/// passages differently; symmetric providers ignore this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingPurpose {
    /// A user query about to be searched.
    SearchQuery,
    /// A passage being written into an index.
    SearchDocument,
}

impl EmbeddingPurpose {
    /// Cohere `input_type` value.
    #[must_use]
    pub const fn as_cohere_input_type(&self) -> &'static str {
        match self {
            Self::SearchQuery => "search_query",
            Self::SearchDocument => "search_document",
        }
    }
}

/// Provider metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
    pub dimensions: usize,
}

/// Model configuration with output dimensions.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub name: String,
    pub dimensions: usize,
}

/// Cohere embedding model configurations.
pub mod cohere_models {
    use super::ModelConfig;

    pub fn get_config(model: &str) -> ModelConfig {
        let dimensions = match model {
            "embed-english-light-v3.0" | "embed-multilingual-light-v3.0" => 384,
            "embed-english-v2.0" => 4096,
            "embed-multilingual-v2.0" => 768,
            "embed-v4.0" => 1536,
            // embed-english-v3.0, embed-multilingual-v3.0
            _ => 1024,
        };
        ModelConfig {
            name: model.to_string(),
            dimensions,
        }
    }
}

/// Ollama embedding model configurations.
pub mod ollama_models {
    use super::ModelConfig;

    pub fn get_config(model: &str) -> ModelConfig {
        let base = model.split(':').next().unwrap_or(model);
        let dimensions = match base {
            "nomic-embed-text" => 768,
            "all-minilm" => 384,
            // mxbai-embed-large, bge-m3, snowflake-arctic-embed
            _ => 1024,
        };
        ModelConfig {
            name: model.to_string(),
            dimensions,
        }
    }
}
