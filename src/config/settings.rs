//! Persistent settings file.
//!
//! Loads and saves `~/.askbook/config.json`. Every field is optional; a
//! missing file is the same as an empty one. Environment variables still
//! take precedence at resolution time (see [`super::ResolvedConfig`]).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings stored in `~/.askbook/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cohere_api_key: Option<String>,
    pub cohere_base_url: Option<String>,
    pub embed_provider: Option<String>,
    pub embed_model: Option<String>,
    pub ollama_endpoint: Option<String>,
    pub ollama_embed_model: Option<String>,
    pub ollama_model: Option<String>,
    pub generation_provider: Option<String>,
    pub qdrant_url: Option<String>,
    pub qdrant_api_key: Option<String>,
    pub index_backend: Option<String>,
    pub db_path: Option<String>,
    pub collection: Option<String>,
    pub retrieval_limit: Option<usize>,
    pub embedding_dim: Option<usize>,
    pub target_language: Option<String>,
}

/// Keys accepted by `askbook config set` / `unset`.
pub const SETTING_KEYS: &[&str] = &[
    "cohere-api-key",
    "cohere-base-url",
    "embed-provider",
    "embed-model",
    "ollama-endpoint",
    "ollama-embed-model",
    "ollama-model",
    "generation-provider",
    "qdrant-url",
    "qdrant-api-key",
    "index-backend",
    "db-path",
    "collection",
    "retrieval-limit",
    "embedding-dim",
    "target-language",
];

impl Settings {
    /// Set a single key from its CLI spelling.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for unknown keys or unparsable numbers.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::InvalidArgument(format!("Empty value for '{key}'")));
        }
        let text = Some(value.to_string());

        match normalize_key(key).as_str() {
            "cohere-api-key" => self.cohere_api_key = text,
            "cohere-base-url" => self.cohere_base_url = text,
            "embed-provider" => self.embed_provider = text,
            "embed-model" => self.embed_model = text,
            "ollama-endpoint" => self.ollama_endpoint = text,
            "ollama-embed-model" => self.ollama_embed_model = text,
            "ollama-model" => self.ollama_model = text,
            "generation-provider" => self.generation_provider = text,
            "qdrant-url" => self.qdrant_url = text,
            "qdrant-api-key" => self.qdrant_api_key = text,
            "index-backend" => self.index_backend = text,
            "db-path" => self.db_path = text,
            "collection" => self.collection = text,
            "retrieval-limit" => self.retrieval_limit = Some(parse_positive(key, value)?),
            "embedding-dim" => self.embedding_dim = Some(parse_positive(key, value)?),
            "target-language" => self.target_language = text,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Clear a single key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for unknown keys.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match normalize_key(key).as_str() {
            "cohere-api-key" => self.cohere_api_key = None,
            "cohere-base-url" => self.cohere_base_url = None,
            "embed-provider" => self.embed_provider = None,
            "embed-model" => self.embed_model = None,
            "ollama-endpoint" => self.ollama_endpoint = None,
            "ollama-embed-model" => self.ollama_embed_model = None,
            "ollama-model" => self.ollama_model = None,
            "generation-provider" => self.generation_provider = None,
            "qdrant-url" => self.qdrant_url = None,
            "qdrant-api-key" => self.qdrant_api_key = None,
            "index-backend" => self.index_backend = None,
            "db-path" => self.db_path = None,
            "collection" => self.collection = None,
            "retrieval-limit" => self.retrieval_limit = None,
            "embedding-dim" => self.embedding_dim = None,
            "target-language" => self.target_language = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Copy with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mask = |s: &Option<String>| s.as_ref().map(|_| "********".to_string());
        Self {
            cohere_api_key: mask(&self.cohere_api_key),
            qdrant_api_key: mask(&self.qdrant_api_key),
            ..self.clone()
        }
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn unknown_key(key: &str) -> Error {
    Error::InvalidArgument(format!(
        "Unknown config key: {key}. Valid keys: {}",
        SETTING_KEYS.join(", ")
    ))
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidArgument(format!(
            "'{key}' must be a positive integer, got '{value}'"
        ))),
    }
}

/// Get the config file path.
///
/// # Errors
///
/// Returns `Config` if the home directory cannot be determined.
pub fn config_path() -> Result<PathBuf> {
    super::global_askbook_dir()
        .map(|dir| dir.join("config.json"))
        .ok_or(Error::Config("Could not determine home directory".into()))
}

/// Load settings from the default location.
///
/// # Errors
///
/// Returns `Config` if the file exists but cannot be read or parsed.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&config_path()?)
}

/// Load settings from an explicit path.
///
/// # Errors
///
/// Returns `Config` if the file exists but cannot be read or parsed.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {e}")))
}

/// Save settings to the default location.
///
/// # Errors
///
/// Returns `Config` if the directory or file cannot be written.
pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&config_path()?, settings)
}

/// Save settings to an explicit path.
///
/// # Errors
///
/// Returns `Config` if the directory or file cannot be written.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

    fs::write(path, content)
        .map_err(|e| Error::Config(format!("Failed to write config file: {e}")))?;

    Ok(())
}

/// Remove the settings file, if present.
///
/// # Errors
///
/// Returns `Config` if the file exists but cannot be removed.
pub fn reset_settings() -> Result<()> {
    let path = config_path()?;
    if path.exists() {
        fs::remove_file(&path)
            .map_err(|e| Error::Config(format!("Failed to remove config file: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_unset() {
        let mut settings = Settings::default();
        settings.set("collection", "robotics").unwrap();
        settings.set("retrieval_limit", "8").unwrap();
        assert_eq!(settings.collection.as_deref(), Some("robotics"));
        assert_eq!(settings.retrieval_limit, Some(8));

        settings.unset("collection").unwrap();
        assert!(settings.collection.is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut settings = Settings::default();
        assert!(settings.set("no-such-key", "x").is_err());
        assert!(settings.set("retrieval-limit", "0").is_err());
        assert!(settings.set("embedding-dim", "abc").is_err());
        assert!(settings.set("collection", "   ").is_err());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut settings = Settings::default();
        settings.set("qdrant-url", "http://localhost:6333").unwrap();
        save_settings_to(&path, &settings).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_hand_written_zero_values_load_but_do_not_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"retrieval_limit":0,"embedding_dim":0}"#).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.retrieval_limit, Some(0));

        let cfg = super::super::ResolvedConfig::resolve(&loaded, None, |_| None);
        assert_eq!(cfg.retrieval_limit, super::super::DEFAULT_RETRIEVAL_LIMIT);
        assert!(cfg.embedding_dim.is_none());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_settings_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let mut settings = Settings::default();
        settings.set("cohere-api-key", "secret").unwrap();
        settings.set("collection", "book").unwrap();
        let shown = settings.redacted();
        assert_eq!(shown.cohere_api_key.as_deref(), Some("********"));
        assert_eq!(shown.collection.as_deref(), Some("book"));
    }
}
