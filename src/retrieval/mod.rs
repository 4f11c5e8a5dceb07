//! Retrieval: vector indexes and the content retriever.
//!
//! - [`qdrant`] - Qdrant over REST
//! - [`local`] - the SQLite [`crate::storage::DocumentStore`]
//! - [`retriever`] - query to prompt context, with fallbacks

pub mod factory;
pub mod index;
pub mod local;
pub mod qdrant;
pub mod retriever;

pub use factory::create_index;
pub use index::{IndexBackend, RetrievalIndex};
pub use local::SqliteIndex;
pub use qdrant::QdrantIndex;
pub use retriever::ContentRetriever;
