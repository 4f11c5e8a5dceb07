//! Status command implementation.
//!
//! Reports which embedding provider, retrieval index and generation
//! provider would serve a query, and whether each one answers.

use crate::config::ResolvedConfig;
use crate::embeddings::{create_embedding_provider, detect_available_providers, EmbeddingProvider};
use crate::error::Result;
use crate::generation::{create_generation_provider, GenerationProvider};
use crate::retrieval::{create_index, RetrievalIndex};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct StatusOutput {
    generation_key_configured: bool,
    embedding: Option<ComponentStatus>,
    available_embedding_providers: Vec<String>,
    index: Option<ComponentStatus>,
    generation: Option<ComponentStatus>,
    collection: String,
    retrieval_limit: usize,
    embedding_dim: usize,
}

#[derive(Serialize)]
struct ComponentStatus {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    reachable: bool,
}

/// Execute the status command.
///
/// # Errors
///
/// Returns an error if the runtime cannot start or JSON serialization fails.
pub fn execute(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let config = ResolvedConfig::load(db_path.map(PathBuf::as_path));
    let rt = super::runtime()?;
    let output = rt.block_on(collect(&config));

    if json {
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("{}", "askbook status".bold());
    println!();
    println!(
        "Generation key: {}",
        if output.generation_key_configured {
            "configured".green()
        } else {
            "not configured".yellow()
        }
    );
    print_component("Embedding", output.embedding.as_ref());
    print_component("Index", output.index.as_ref());
    print_component("Generation", output.generation.as_ref());
    println!();
    println!(
        "Collection: {}  limit: {}  dim: {}",
        output.collection, output.retrieval_limit, output.embedding_dim
    );

    if !output.available_embedding_providers.is_empty() {
        println!(
            "Available embedding providers: {}",
            output.available_embedding_providers.join(", ")
        );
    }

    if output.generation.is_none() {
        println!();
        println!("{}", "Answers will be mock responses.".dimmed());
        println!("{}", "  Set COHERE_API_KEY, or `askbook config set generation-provider ollama`".dimmed());
    }
    if output.embedding.is_none() || output.index.is_none() {
        println!("{}", "Chat queries will run without retrieved context.".dimmed());
    }

    Ok(())
}

async fn collect(config: &ResolvedConfig) -> StatusOutput {
    let mut model_dimensions = None;
    let embedding = match create_embedding_provider(config) {
        Some(provider) => {
            let info = provider.info();
            model_dimensions = Some(info.dimensions);
            Some(ComponentStatus {
                name: info.name,
                model: Some(info.model),
                reachable: provider.is_available().await,
            })
        }
        None => None,
    };

    let index = match create_index(config) {
        Some(index) => Some(ComponentStatus {
            name: index.name().to_string(),
            model: None,
            reachable: index.is_available().await,
        }),
        None => None,
    };

    let generation = match create_generation_provider(config) {
        Some(provider) => {
            let info = provider.info();
            Some(ComponentStatus {
                name: info.name,
                model: info.model,
                reachable: provider.is_available().await,
            })
        }
        None => None,
    };

    let detection = detect_available_providers(config).await;

    StatusOutput {
        generation_key_configured: config.has_cohere_key(),
        embedding,
        available_embedding_providers: detection.available,
        index,
        generation,
        collection: config.collection.clone(),
        retrieval_limit: config.retrieval_limit,
        embedding_dim: config.embedding_dim_for(model_dimensions),
    }
}

fn print_component(label: &str, status: Option<&ComponentStatus>) {
    match status {
        Some(s) => {
            let mark = if s.reachable { "✓".green() } else { "✗".red() };
            let model = s.model.as_deref().map(|m| format!(" ({m})")).unwrap_or_default();
            println!("{label:<11} {mark} {}{}", s.name, model.dimmed());
        }
        None => println!("{label:<11} {}", "not configured".yellow()),
    }
}
