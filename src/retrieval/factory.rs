//! Retrieval index factory.

use tracing::debug;

use crate::config::{IndexKind, ResolvedConfig};

use super::index::{IndexBackend, RetrievalIndex};
use super::local::SqliteIndex;
use super::qdrant::QdrantIndex;

/// Create the configured retrieval index.
///
/// Priority:
/// 1. Explicit backend in config (`ASKBOOK_INDEX`)
/// 2. Qdrant, when `QDRANT_URL` is set
/// 3. The local index, when its database file exists
///
/// Returns `None` when nothing is usable.
#[must_use]
pub fn create_index(config: &ResolvedConfig) -> Option<IndexBackend> {
    let backend = match config.index_backend {
        Some(IndexKind::Qdrant) => create_qdrant(config),
        Some(IndexKind::Local) => create_local(config),
        None => create_qdrant(config).or_else(|| create_local(config)),
    };

    if let Some(index) = &backend {
        debug!(backend = index.name(), "Retrieval index selected");
    }
    backend
}

fn create_qdrant(config: &ResolvedConfig) -> Option<IndexBackend> {
    let url = config.qdrant_url.as_deref()?;
    Some(IndexBackend::Qdrant(QdrantIndex::new(
        url,
        config.qdrant_api_key.as_deref(),
    )))
}

fn create_local(config: &ResolvedConfig) -> Option<IndexBackend> {
    let path = config.db_path.as_ref().filter(|p| p.exists())?;
    Some(IndexBackend::Local(SqliteIndex::new(path.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::path::Path;

    fn config(db: Option<&Path>, pairs: &[(&str, &str)]) -> ResolvedConfig {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut cfg = ResolvedConfig::resolve(&Settings::default(), db, move |key| {
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        });
        if db.is_none() {
            cfg.db_path = None;
        }
        cfg
    }

    #[test]
    fn test_nothing_configured() {
        assert!(create_index(&config(None, &[])).is_none());
    }

    #[test]
    fn test_qdrant_url_selects_qdrant() {
        let index = create_index(&config(None, &[("QDRANT_URL", "http://localhost:6333")])).unwrap();
        assert_eq!(index.name(), "qdrant");
    }

    #[test]
    fn test_existing_db_selects_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.db");
        std::fs::write(&path, b"").unwrap();

        let index = create_index(&config(Some(&path), &[])).unwrap();
        assert_eq!(index.name(), "local");
    }

    #[test]
    fn test_missing_db_is_not_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let cfg = config(Some(&path), &[("ASKBOOK_INDEX", "local")]);
        assert!(create_index(&cfg).is_none());
    }

    #[test]
    fn test_explicit_qdrant_without_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.db");
        std::fs::write(&path, b"").unwrap();

        let cfg = config(Some(&path), &[("ASKBOOK_INDEX", "qdrant")]);
        assert!(create_index(&cfg).is_none());
    }
}
