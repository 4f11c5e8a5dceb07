//! SQLite storage layer for the local document index.
//!
//! This module provides the persistence layer using SQLite with:
//! - WAL mode for concurrent reads
//! - Content-hash de-duplication per collection
//! - Brute-force cosine search
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Document store implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::{
    content_hash, AddOutcome, CollectionStats, DocumentStore, ScoredDocument, StoredDocument,
};
