//! Ingestion into the local document index.
//!
//! Text is chunked, each chunk is embedded with the document purpose, and
//! the results are written to a [`DocumentStore`]. Embedding failures are
//! errors here: a zero vector written to the index would match nothing and
//! never be replaced.

pub mod chunking;

use serde::Serialize;
use tracing::{debug, info};

use crate::embeddings::{EmbeddingProvider, EmbeddingPurpose};
use crate::error::{Error, Result};
use crate::storage::{AddOutcome, DocumentStore};

pub use chunking::{chunk_text, ChunkConfig, TextChunk};

/// Summary of one ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub collection: String,
    pub chunks: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub ids: Vec<String>,
}

/// Chunk, embed and store `text` in `collection`.
///
/// `dimensions`, when given, is the vector length every chunk must have.
///
/// # Errors
///
/// Returns `InvalidArgument` for empty text, `Embedding` when the provider
/// fails or returns a vector of the wrong length, and a database error if
/// the store rejects a write.
pub async fn ingest_text<E: EmbeddingProvider>(
    store: &mut DocumentStore,
    provider: &E,
    collection: &str,
    text: &str,
    config: &ChunkConfig,
    dimensions: Option<usize>,
) -> Result<IngestReport> {
    let chunks = chunk_text(text, config);
    if chunks.is_empty() {
        return Err(Error::InvalidArgument("Nothing to index: text is empty".into()));
    }

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    debug!(chunks = texts.len(), collection, "Embedding chunks");

    let vectors = provider
        .embed_batch(&texts, EmbeddingPurpose::SearchDocument)
        .await?;

    if vectors.len() != chunks.len() {
        return Err(Error::Embedding(format!(
            "Provider returned {} embeddings for {} chunks",
            vectors.len(),
            chunks.len()
        )));
    }

    let mut report = IngestReport {
        collection: collection.to_string(),
        chunks: chunks.len(),
        ..IngestReport::default()
    };

    for (chunk, vector) in chunks.iter().zip(&vectors) {
        if let Some(expected) = dimensions {
            if vector.len() != expected {
                return Err(Error::Embedding(format!(
                    "Chunk {} embedded to {} dimensions, expected {expected}",
                    chunk.index,
                    vector.len()
                )));
            }
        }

        match store.add_document(collection, &chunk.text, vector)? {
            AddOutcome::Inserted(id) => {
                report.inserted += 1;
                report.ids.push(id);
            }
            AddOutcome::Duplicate(id) => {
                report.duplicates += 1;
                report.ids.push(id);
            }
        }
    }

    info!(
        collection,
        inserted = report.inserted,
        duplicates = report.duplicates,
        "Ingestion complete"
    );

    Ok(report)
}
