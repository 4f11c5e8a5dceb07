//! Retrieved documents and the context string built from them.

use serde::{Deserialize, Serialize};

/// Sentinel rendered when the embedding provider or index is not configured.
pub const UNAVAILABLE_CONTEXT: &str = "Unable to retrieve content: client not available.";

/// A single search hit from a retrieval index.
///
/// Produced per call in ranking order (most relevant first); never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Index-side identifier, when the backend exposes one.
    pub id: Option<String>,
    /// Similarity score reported by the index.
    pub score: Option<f32>,
    /// Payload text.
    pub text: String,
}

impl RetrievedDocument {
    /// Create a document carrying only its text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            score: None,
            text: text.into(),
        }
    }
}

/// Context handed to answer generation for `chat` queries.
///
/// Every variant renders to a plain string that is placed verbatim into the
/// prompt's context slot. The tag lets callers tell the cases apart without
/// inspecting message prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum RetrievedContext {
    /// Space-joined document texts in ranking order. Empty when nothing matched.
    Documents(String),
    /// Embedding provider or index not configured.
    Unavailable,
    /// Embedding/search failed; carries the error message.
    Failed(String),
}

impl RetrievedContext {
    /// Join document texts with a single space, preserving rank order.
    #[must_use]
    pub fn from_documents(documents: &[RetrievedDocument]) -> Self {
        let joined = documents
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self::Documents(joined)
    }

    /// The exact string placed into the prompt.
    #[must_use]
    pub fn as_prompt_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Self::Documents(text) => std::borrow::Cow::Borrowed(text),
            Self::Unavailable => std::borrow::Cow::Borrowed(UNAVAILABLE_CONTEXT),
            Self::Failed(message) => {
                std::borrow::Cow::Owned(format!("Error retrieving content: {message}"))
            }
        }
    }

    /// Whether retrieval produced document text (possibly empty).
    #[must_use]
    pub const fn is_documents(&self) -> bool {
        matches!(self, Self::Documents(_))
    }
}

impl std::fmt::Display for RetrievedContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_prompt_text())
    }
}
