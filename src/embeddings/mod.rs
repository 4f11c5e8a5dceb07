//! Embedding module.
//!
//! Provides embedding generation using HTTP-based providers:
//! - **Cohere** (hosted) - Requires `COHERE_API_KEY`
//! - **Ollama** (local) - Any embedding model served by Ollama
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │  QueryEmbedder   │     │  ingest          │
//! │ (zero fallback)  │     │ (errors surface) │
//! └────────┬─────────┘     └────────┬─────────┘
//!          └───────────┬────────────┘
//!                      ▼
//!             ┌─────────────────┐
//!             │    Factory      │  ← Picks provider from ResolvedConfig
//!             └────────┬────────┘
//!                 ┌────┴────┐
//!                 ▼         ▼
//!             ┌───────┐ ┌──────┐
//!             │Cohere │ │Ollama│
//!             └───────┘ └──────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use askbook::config::ResolvedConfig;
//! use askbook::embeddings::{create_embedding_provider, QueryEmbedder};
//!
//! let config = ResolvedConfig::load(None);
//! let provider = create_embedding_provider(&config);
//! let dims = config.embedding_dim_for(provider.as_ref().map(|p| p.info().dimensions));
//! let embedder = QueryEmbedder::new(provider, dims);
//!
//! let embedding = embedder.embed("What is inverse kinematics?").await;
//! println!("{} dims, fallback: {}", embedding.len(), embedding.is_fallback());
//! ```

pub mod cohere;
pub mod factory;
pub mod ollama;
pub mod provider;
pub mod query;
pub mod types;

pub use cohere::CohereEmbedder;
pub use factory::{create_embedding_provider, detect_available_providers, ProviderDetection};
pub use ollama::OllamaProvider;
pub use provider::{BoxedProvider, EmbeddingProvider};
pub use query::{Embedding, EmbeddingSource, QueryEmbedder};
pub use types::{EmbeddingPurpose, ProviderInfo};
