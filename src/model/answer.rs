//! Final answers returned by the agent.

use serde::Serialize;

/// Text returned when no generation provider is configured.
pub const MOCK_RESPONSE: &str = "This is a mock response as the generation client is not available.";

/// Outcome of answer generation.
///
/// All variants render to a user-facing string via [`Answer::text`]; the tag
/// records whether that string came from the model, the mock fallback, or a
/// caught provider failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Model output (script-filtered in translate mode).
    Generated(String),
    /// Generation provider not configured.
    Mock(String),
    /// Provider call failed.
    Failed {
        /// Provider display label, e.g. "Cohere".
        provider: String,
        /// Mode-specific label, e.g. "translation".
        label: String,
        /// Underlying error message.
        message: String,
    },
}

impl Answer {
    /// The mock answer used when generation is unavailable.
    #[must_use]
    pub fn mock() -> Self {
        Self::Mock(MOCK_RESPONSE.to_string())
    }

    /// User-facing text.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Generated(text) | Self::Mock(text) => text.clone(),
            Self::Failed {
                provider,
                label,
                message,
            } => format!("Error with {provider} {label}: {message}"),
        }
    }

    /// Short status tag for structured output.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Generated(_) => "generated",
            Self::Mock(_) => "mock",
            Self::Failed { .. } => "failed",
        }
    }

    /// Whether the answer came from the model.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

impl Serialize for Answer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Answer", 2)?;
        state.serialize_field("status", self.status())?;
        state.serialize_field("answer", &self.text())?;
        state.end()
    }
}
