//! Configuration management.
//!
//! Settings come from three layers, highest priority first:
//! 1. Environment variables (`COHERE_API_KEY`, `QDRANT_URL`, `ASKBOOK_*`, ...)
//! 2. `~/.askbook/config.json` (see [`settings`])
//! 3. Built-in defaults
//!
//! Missing credentials are a valid state. The provider factories turn them
//! into "not configured" and the pipeline falls back instead of failing.

mod settings;

pub use settings::{
    config_path, load_settings, load_settings_from, reset_settings, save_settings,
    save_settings_to, Settings, SETTING_KEYS,
};

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default Cohere API base URL.
pub const DEFAULT_COHERE_BASE_URL: &str = "https://api.cohere.com";
/// Default Cohere embedding model (1024 dimensions).
pub const DEFAULT_COHERE_EMBED_MODEL: &str = "embed-english-v3.0";
/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
/// Default Ollama embedding model (1024 dimensions).
pub const DEFAULT_OLLAMA_EMBED_MODEL: &str = "mxbai-embed-large";
/// Default Ollama generation model.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
/// Default collection name.
pub const DEFAULT_COLLECTION: &str = "book_content";
/// Default number of documents retrieved per query.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 5;
/// Embedding dimensionality used when neither the setting nor the model
/// table gives one.
pub const DEFAULT_EMBEDDING_DIM: usize = 1024;
/// Default translation target.
pub const DEFAULT_TARGET_LANGUAGE: &str = "urdu";

/// Hosted model providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Cohere,
    Ollama,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cohere => write!(f, "cohere"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cohere" => Ok(Self::Cohere),
            "ollama" => Ok(Self::Ollama),
            _ => Err(format!("Unknown provider: {s}")),
        }
    }
}

/// Retrieval index backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Qdrant,
    Local,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Qdrant => write!(f, "qdrant"),
            Self::Local => write!(f, "local"),
        }
    }
}

impl std::str::FromStr for IndexKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "qdrant" => Ok(Self::Qdrant),
            "local" | "sqlite" => Ok(Self::Local),
            _ => Err(format!("Unknown index backend: {s}")),
        }
    }
}

/// Fully resolved configuration consumed by the provider factories.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    #[serde(skip)]
    pub cohere_api_key: Option<String>,
    pub cohere_base_url: String,
    pub embed_provider: Option<ProviderKind>,
    pub cohere_embed_model: String,
    pub ollama_endpoint: String,
    pub ollama_embed_model: String,
    pub ollama_model: String,
    pub generation_provider: Option<ProviderKind>,
    pub qdrant_url: Option<String>,
    #[serde(skip)]
    pub qdrant_api_key: Option<String>,
    pub index_backend: Option<IndexKind>,
    pub db_path: Option<PathBuf>,
    pub collection: String,
    pub retrieval_limit: usize,
    /// Explicit dimensionality. `None` means "whatever the model produces".
    pub embedding_dim: Option<usize>,
    pub target_language: String,
}

impl ResolvedConfig {
    /// Resolve from the process environment and the settings file.
    ///
    /// An unreadable settings file is logged and treated as empty so that a
    /// broken config never blocks the fallback paths.
    #[must_use]
    pub fn load(explicit_db: Option<&Path>) -> Self {
        let settings = load_settings().unwrap_or_else(|e| {
            tracing::warn!("Ignoring config file: {e}");
            Settings::default()
        });
        Self::resolve(&settings, explicit_db, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    ///
    /// Priority per setting: env var > settings file > default.
    /// Empty environment values are ignored.
    pub fn resolve<F>(settings: &Settings, explicit_db: Option<&Path>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let text = |key: &str, file: &Option<String>| lookup(key).or_else(|| file.clone());
        let number = |key: &str, file: Option<usize>| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .or(file.filter(|n| *n > 0))
        };

        let embed_provider = text("ASKBOOK_EMBED_PROVIDER", &settings.embed_provider)
            .and_then(|p| parse_or_warn(&p));
        let generation_provider =
            text("ASKBOOK_GENERATION_PROVIDER", &settings.generation_provider)
                .and_then(|p| parse_or_warn(&p));
        let index_backend =
            text("ASKBOOK_INDEX", &settings.index_backend).and_then(|p| parse_or_warn(&p));

        let db_path = explicit_db
            .map(Path::to_path_buf)
            .or_else(|| text("ASKBOOK_DB", &settings.db_path).map(PathBuf::from))
            .or_else(default_db_path);

        Self {
            cohere_api_key: text("COHERE_API_KEY", &settings.cohere_api_key),
            cohere_base_url: text("COHERE_BASE_URL", &settings.cohere_base_url)
                .unwrap_or_else(|| DEFAULT_COHERE_BASE_URL.to_string()),
            embed_provider,
            cohere_embed_model: text("COHERE_EMBED_MODEL", &settings.embed_model)
                .unwrap_or_else(|| DEFAULT_COHERE_EMBED_MODEL.to_string()),
            ollama_endpoint: text("OLLAMA_ENDPOINT", &settings.ollama_endpoint)
                .unwrap_or_else(|| DEFAULT_OLLAMA_ENDPOINT.to_string()),
            ollama_embed_model: text("OLLAMA_EMBED_MODEL", &settings.ollama_embed_model)
                .unwrap_or_else(|| DEFAULT_OLLAMA_EMBED_MODEL.to_string()),
            ollama_model: text("OLLAMA_MODEL", &settings.ollama_model)
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            generation_provider,
            qdrant_url: text("QDRANT_URL", &settings.qdrant_url),
            qdrant_api_key: text("QDRANT_API_KEY", &settings.qdrant_api_key),
            index_backend,
            db_path,
            collection: text("ASKBOOK_COLLECTION", &settings.collection)
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            retrieval_limit: number("ASKBOOK_RETRIEVAL_LIMIT", settings.retrieval_limit)
                .unwrap_or(DEFAULT_RETRIEVAL_LIMIT),
            embedding_dim: number("ASKBOOK_EMBEDDING_DIM", settings.embedding_dim),
            target_language: text("ASKBOOK_TARGET_LANGUAGE", &settings.target_language)
                .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string()),
        }
    }

    /// Dimensionality to enforce for a provider whose model produces
    /// `model_dimensions`. An explicit setting always wins.
    #[must_use]
    pub fn embedding_dim_for(&self, model_dimensions: Option<usize>) -> usize {
        self.embedding_dim
            .or(model_dimensions.filter(|n| *n > 0))
            .unwrap_or(DEFAULT_EMBEDDING_DIM)
    }

    /// Whether a Cohere API key is present.
    #[must_use]
    pub fn has_cohere_key(&self) -> bool {
        self.cohere_api_key.is_some()
    }
}

fn parse_or_warn<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| tracing::warn!("{e}; falling back to auto-detection"))
        .ok()
}

/// Get the global askbook directory (`~/.askbook/`).
#[must_use]
pub fn global_askbook_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".askbook"))
}

/// Default location of the local document index.
#[must_use]
pub fn default_db_path() -> Option<PathBuf> {
    global_askbook_dir().map(|dir| dir.join("data").join("index.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env_or_file() {
        let cfg = ResolvedConfig::resolve(&Settings::default(), None, env_from(&[]));
        assert!(cfg.cohere_api_key.is_none());
        assert!(cfg.qdrant_url.is_none());
        assert_eq!(cfg.collection, DEFAULT_COLLECTION);
        assert_eq!(cfg.retrieval_limit, DEFAULT_RETRIEVAL_LIMIT);
        assert_eq!(cfg.embedding_dim, None);
        assert_eq!(cfg.embedding_dim_for(None), DEFAULT_EMBEDDING_DIM);
        assert_eq!(cfg.cohere_embed_model, "embed-english-v3.0");
        assert_eq!(cfg.target_language, "urdu");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut settings = Settings::default();
        settings.set("collection", "from-file").unwrap();
        settings.set("retrieval-limit", "3").unwrap();

        let cfg = ResolvedConfig::resolve(
            &settings,
            None,
            env_from(&[("ASKBOOK_COLLECTION", "from-env")]),
        );
        assert_eq!(cfg.collection, "from-env");
        assert_eq!(cfg.retrieval_limit, 3);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let cfg = ResolvedConfig::resolve(
            &Settings::default(),
            None,
            env_from(&[("COHERE_API_KEY", ""), ("ASKBOOK_RETRIEVAL_LIMIT", "0")]),
        );
        assert!(!cfg.has_cohere_key());
        assert_eq!(cfg.retrieval_limit, DEFAULT_RETRIEVAL_LIMIT);
    }

    #[test]
    fn test_zero_numbers_in_file_fall_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"retrieval_limit":0,"embedding_dim":0}"#).unwrap();
        let cfg = ResolvedConfig::resolve(&settings, None, env_from(&[]));
        assert_eq!(cfg.retrieval_limit, DEFAULT_RETRIEVAL_LIMIT);
        assert_eq!(cfg.embedding_dim, None);
        assert_eq!(cfg.embedding_dim_for(Some(768)), 768);
    }

    #[test]
    fn test_embedding_dim_follows_model_unless_set() {
        let cfg = ResolvedConfig::resolve(
            &Settings::default(),
            None,
            env_from(&[("OLLAMA_EMBED_MODEL", "nomic-embed-text")]),
        );
        assert_eq!(cfg.embedding_dim_for(Some(768)), 768);

        let cfg = ResolvedConfig::resolve(
            &Settings::default(),
            None,
            env_from(&[("ASKBOOK_EMBEDDING_DIM", "512")]),
        );
        assert_eq!(cfg.embedding_dim, Some(512));
        assert_eq!(cfg.embedding_dim_for(Some(768)), 512);
    }

    #[test]
    fn test_explicit_db_wins() {
        let explicit = PathBuf::from("/tmp/custom.db");
        let cfg = ResolvedConfig::resolve(
            &Settings::default(),
            Some(&explicit),
            env_from(&[("ASKBOOK_DB", "/elsewhere.db")]),
        );
        assert_eq!(cfg.db_path, Some(explicit));
    }

    #[test]
    fn test_unknown_provider_falls_back_to_auto() {
        let cfg = ResolvedConfig::resolve(
            &Settings::default(),
            None,
            env_from(&[("ASKBOOK_EMBED_PROVIDER", "openai"), ("ASKBOOK_INDEX", "sqlite")]),
        );
        assert!(cfg.embed_provider.is_none());
        assert_eq!(cfg.index_backend, Some(IndexKind::Local));
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("Cohere".parse::<ProviderKind>(), Ok(ProviderKind::Cohere));
        assert_eq!("ollama".parse::<ProviderKind>(), Ok(ProviderKind::Ollama));
        assert!("hf".parse::<ProviderKind>().is_err());
    }
}
