//! askbook - retrieval-augmented question answering over a book corpus.
//!
//! This crate provides the core functionality for the `askbook` CLI tool.
//!
//! # Architecture
//!
//! - [`agent`] - Entry point: mode validation, retrieval, generation
//! - [`embeddings`] - Embedding providers (Cohere, Ollama) and query embedding
//! - [`retrieval`] - Vector indexes (Qdrant, local SQLite) and the content retriever
//! - [`generation`] - Generation providers, prompts, script filtering
//! - [`storage`] - SQLite document store backing the local index
//! - [`ingest`] - Chunking and indexing of source text
//! - [`model`] - Data types (Mode, RetrievedContext, Answer)
//! - [`config`] - Configuration management
//! - [`cli`] - Command-line interface using clap
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod generation;
pub mod ingest;
pub mod model;
pub mod retrieval;
pub mod storage;

pub use agent::{Agent, ConfiguredAgent};
pub use error::{Error, Result};
pub use model::{Answer, Mode, RetrievedContext};
