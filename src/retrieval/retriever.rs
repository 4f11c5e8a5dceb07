//! Content retrieval: embed the query, search the index, join the texts.

use tracing::{debug, warn};

use crate::embeddings::{EmbeddingProvider, QueryEmbedder};
use crate::model::RetrievedContext;

use super::index::RetrievalIndex;

/// Turns a query into a prompt-ready context.
///
/// Both collaborators are optional; when either is missing the retriever
/// reports [`RetrievedContext::Unavailable`] without calling the other.
pub struct ContentRetriever<E, I> {
    embedder: QueryEmbedder<E>,
    index: Option<I>,
}

impl<E: EmbeddingProvider, I: RetrievalIndex> ContentRetriever<E, I> {
    pub fn new(embedder: QueryEmbedder<E>, index: Option<I>) -> Self {
        Self { embedder, index }
    }

    /// Whether both an embedding provider and an index are configured.
    pub fn is_configured(&self) -> bool {
        self.embedder.is_configured() && self.index.is_some()
    }

    pub fn embedder(&self) -> &QueryEmbedder<E> {
        &self.embedder
    }

    pub fn index(&self) -> Option<&I> {
        self.index.as_ref()
    }

    /// Retrieve context for `query`. Never fails.
    ///
    /// Search errors are captured as [`RetrievedContext::Failed`]; the texts
    /// of a successful search are joined with a single space in rank order.
    pub async fn retrieve(&self, query: &str, collection: &str, limit: usize) -> RetrievedContext {
        let Some(index) = self.index.as_ref().filter(|_| self.embedder.is_configured()) else {
            warn!("Retrieval not configured, returning unavailable context");
            return RetrievedContext::Unavailable;
        };

        let embedding = self.embedder.embed(query).await;

        match index.search(&embedding.vector, collection, limit).await {
            Ok(documents) => {
                debug!(
                    hits = documents.len(),
                    index = index.name(),
                    fallback = embedding.is_fallback(),
                    "Retrieved documents"
                );
                RetrievedContext::from_documents(&documents)
            }
            Err(e) => {
                warn!("Error retrieving content: {e}");
                RetrievedContext::Failed(e.to_string())
            }
        }
    }
}
