//! Data models for askbook.
//!
//! Everything here is request-scoped: created, used and discarded within a
//! single `ask` call.
//! - [`Mode`] - chat / translate / explain
//! - [`RetrievedDocument`] and [`RetrievedContext`] - retrieval output
//! - [`Answer`] - tagged generation outcome

pub mod answer;
pub mod document;
pub mod mode;

pub use answer::{Answer, MOCK_RESPONSE};
pub use document::{RetrievedContext, RetrievedDocument, UNAVAILABLE_CONTEXT};
pub use mode::Mode;
