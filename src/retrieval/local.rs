//! Local SQLite retrieval index.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::RetrievedDocument;
use crate::storage::DocumentStore;

use super::index::RetrievalIndex;

/// Retrieval over a [`DocumentStore`] file.
///
/// The connection is opened per search so the index handle stays `Sync`.
pub struct SqliteIndex {
    path: PathBuf,
}

impl SqliteIndex {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RetrievalIndex for SqliteIndex {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn is_available(&self) -> bool {
        self.path.exists()
    }

    async fn search(
        &self,
        embedding: &[f32],
        collection: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        if limit == 0 {
            return Err(Error::InvalidArgument("Retrieval limit must be greater than 0".into()));
        }

        let store = DocumentStore::open_existing(&self.path)?;
        let hits = store.search(embedding, collection, limit)?;

        Ok(hits
            .into_iter()
            .map(|hit| RetrievedDocument {
                id: Some(hit.id),
                score: Some(hit.score),
                text: hit.text,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.db");
        {
            let mut store = DocumentStore::open(&path).unwrap();
            store.add_document("book", "first", &[1.0, 0.0]).unwrap();
            store.add_document("book", "second", &[0.0, 1.0]).unwrap();
        }

        let index = SqliteIndex::new(&path);
        assert!(index.is_available().await);

        let docs = index.search(&[0.0, 1.0], "book", 5).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "second");
        assert!(docs[0].id.is_some());
    }

    #[tokio::test]
    async fn test_missing_file_is_index_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let index = SqliteIndex::new(dir.path().join("absent.db"));
        assert!(!index.is_available().await);

        let err = index.search(&[1.0], "book", 1).await.unwrap_err();
        assert!(matches!(err, Error::IndexNotFound { .. }));
    }

    #[tokio::test]
    async fn test_zero_limit_rejected() {
        let index = SqliteIndex::new("/nonexistent/index.db");
        let err = index.search(&[1.0], "book", 0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
