//! Query modes.
//!
//! A mode selects the prompt shape and post-processing used for a query.
//! The set is closed: anything other than `chat`, `translate` or `explain`
//! is rejected at the agent boundary with [`Error::InvalidMode`].

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// The behavior class requested for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Conversational answer grounded in retrieved context.
    Chat,
    /// Translation into the configured target language.
    Translate,
    /// Explanation of a concept, no retrieval.
    Explain,
}

impl Mode {
    /// All supported modes, in display order.
    pub const ALL: [Self; 3] = [Self::Chat, Self::Translate, Self::Explain];

    /// Get the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Translate => "translate",
            Self::Explain => "explain",
        }
    }

    /// Label used in provider-failure messages ("Error with Cohere chat: ...").
    #[must_use]
    pub const fn failure_label(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Translate => "translation",
            Self::Explain => "explanation",
        }
    }

    /// Whether this mode retrieves supporting passages before generation.
    #[must_use]
    pub const fn uses_retrieval(&self) -> bool {
        matches!(self, Self::Chat)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "chat" => Ok(Self::Chat),
            "translate" => Ok(Self::Translate),
            "explain" => Ok(Self::Explain),
            _ => Err(Error::InvalidMode { mode: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!(" chat ".parse::<Mode>().unwrap(), Mode::Chat);
    }

    #[test]
    fn test_parse_rejects_unknown_modes() {
        for bad in ["", "summarize", "Chat", "TRANSLATE", "explain!"] {
            let err = bad.parse::<Mode>().unwrap_err();
            assert!(matches!(err, Error::InvalidMode { ref mode } if mode == bad));
        }
    }

    #[test]
    fn test_only_chat_uses_retrieval() {
        assert!(Mode::Chat.uses_retrieval());
        assert!(!Mode::Translate.uses_retrieval());
        assert!(!Mode::Explain.uses_retrieval());
    }

    #[test]
    fn test_failure_labels() {
        assert_eq!(Mode::Chat.failure_label(), "chat");
        assert_eq!(Mode::Translate.failure_label(), "translation");
        assert_eq!(Mode::Explain.failure_label(), "explanation");
    }
}
