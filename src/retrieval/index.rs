//! Retrieval index trait and runtime backend selection.

use std::future::Future;

use crate::error::Result;
use crate::model::RetrievedDocument;

use super::local::SqliteIndex;
use super::qdrant::QdrantIndex;

/// A vector index that returns passages most-similar first.
pub trait RetrievalIndex: Send + Sync {
    /// Short backend name for logs and status output.
    fn name(&self) -> &'static str;

    /// Check if the index is reachable.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Search `collection` for the `limit` nearest passages.
    ///
    /// Implementations reject `limit == 0` with `InvalidArgument` before
    /// doing any I/O.
    fn search(
        &self,
        embedding: &[f32],
        collection: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RetrievedDocument>>> + Send;
}

/// The configured index, chosen at runtime.
pub enum IndexBackend {
    Qdrant(QdrantIndex),
    Local(SqliteIndex),
}

impl RetrievalIndex for IndexBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::Qdrant(index) => index.name(),
            Self::Local(index) => index.name(),
        }
    }

    async fn is_available(&self) -> bool {
        match self {
            Self::Qdrant(index) => index.is_available().await,
            Self::Local(index) => index.is_available().await,
        }
    }

    async fn search(
        &self,
        embedding: &[f32],
        collection: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        match self {
            Self::Qdrant(index) => index.search(embedding, collection, limit).await,
            Self::Local(index) => index.search(embedding, collection, limit).await,
        }
    }
}
