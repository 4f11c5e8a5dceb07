//! Index command implementation.
//!
//! Manages the local SQLite index:
//! - `add` - embed and store one passage
//! - `import` - chunk, embed and store a text file
//! - `stats` - collections and counts
//! - `drop` - delete a collection

use crate::cli::IndexCommands;
use crate::config::ResolvedConfig;
use crate::embeddings::{create_embedding_provider, EmbeddingProvider};
use crate::error::{Error, Result};
use crate::ingest::{ingest_text, ChunkConfig, IngestReport};
use crate::storage::{CollectionStats, DocumentStore};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct StatsOutput<'a> {
    path: &'a Path,
    collections: Vec<CollectionStats>,
    total_documents: usize,
}

#[derive(Serialize)]
struct IngestOutput<'a> {
    path: &'a Path,
    provider: String,
    model: String,
    #[serde(flatten)]
    report: IngestReport,
}

#[derive(Serialize)]
struct DropOutput<'a> {
    collection: &'a str,
    removed: usize,
}

/// Execute index commands.
///
/// # Errors
///
/// Returns an error if the index path cannot be resolved, the embedding
/// provider is missing or fails, or the database rejects the operation.
pub fn execute(command: &IndexCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let config = ResolvedConfig::load(db_path.map(PathBuf::as_path));
    let path = config
        .db_path
        .clone()
        .ok_or_else(|| Error::Config("Could not determine local index path".into()))?;

    match command {
        IndexCommands::Add { text, collection } => {
            let collection = collection.as_deref().unwrap_or(&config.collection);
            ingest(&config, &path, collection, text, ChunkConfig::default(), json)
        }
        IndexCommands::Import {
            file,
            collection,
            max_chars,
            overlap,
        } => {
            if *max_chars == 0 || overlap >= max_chars {
                return Err(Error::InvalidArgument(
                    "--max-chars must be positive and greater than --overlap".into(),
                ));
            }
            let text = std::fs::read_to_string(file)?;
            let collection = collection.as_deref().unwrap_or(&config.collection);
            let chunking = ChunkConfig {
                max_chars: *max_chars,
                overlap: *overlap,
                min_chunk_size: (*max_chars / 20).max(1),
            };
            ingest(&config, &path, collection, &text, chunking, json)
        }
        IndexCommands::Stats => stats(&path, json),
        IndexCommands::Drop { collection } => drop_collection(&path, collection, json),
    }
}

fn ingest(
    config: &ResolvedConfig,
    path: &Path,
    collection: &str,
    text: &str,
    chunking: ChunkConfig,
    json: bool,
) -> Result<()> {
    let provider = create_embedding_provider(config).ok_or_else(|| Error::NotConfigured {
        what: "embedding provider".into(),
    })?;
    let info = provider.info();

    let mut store = DocumentStore::open(path)?;
    let rt = super::runtime()?;
    let report = rt.block_on(ingest_text(
        &mut store,
        &provider,
        collection,
        text,
        &chunking,
        Some(config.embedding_dim_for(Some(info.dimensions))),
    ))?;

    if json {
        let output = IngestOutput {
            path,
            provider: info.name,
            model: info.model,
            report,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "Indexed {} chunk(s) into '{}' ({} new, {} duplicate) using {} ({})",
            report.chunks, report.collection, report.inserted, report.duplicates, info.name, info.model
        );
    }

    Ok(())
}

fn stats(path: &Path, json: bool) -> Result<()> {
    let store = DocumentStore::open_existing(path)?;
    let collections = store.list_collections()?;
    let total_documents = collections.iter().map(|c| c.documents).sum();

    if json {
        let output = StatsOutput {
            path,
            collections,
            total_documents,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("Local index: {}", path.display());
    if collections.is_empty() {
        println!("No collections.");
        return Ok(());
    }
    for c in &collections {
        let dims = c
            .dimensions
            .map_or_else(|| "?".to_string(), |d| d.to_string());
        println!("  {:<24} {:>6} docs  {dims}-d", c.name, c.documents);
    }
    println!("Total: {total_documents} document(s)");

    Ok(())
}

fn drop_collection(path: &Path, collection: &str, json: bool) -> Result<()> {
    let mut store = DocumentStore::open_existing(path)?;
    let removed = store.delete_collection(collection)?;

    if json {
        println!("{}", serde_json::to_string(&DropOutput { collection, removed })?);
    } else {
        println!("Removed {removed} document(s) from '{collection}'");
    }
    Ok(())
}
