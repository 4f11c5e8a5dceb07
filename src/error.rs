//! Error types for askbook.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 4=validation, 7=config, etc.)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Provider outages are *not* errors here: the pipeline turns them into
//! fallback values (`ZeroFallback`, `RetrievedContext::Unavailable`,
//! `Answer::Mock`). The variants below cover what must reach the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for askbook operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    IndexNotFound,
    DatabaseError,

    // Validation (exit 4)
    InvalidMode,
    InvalidArgument,

    // Provider (exit 5)
    NotConfigured,
    RetrievalError,
    GenerationError,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Embedding (exit 9)
    EmbeddingError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::IndexNotFound => "INDEX_NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::InvalidMode => "INVALID_MODE",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::RetrievalError => "RETRIEVAL_ERROR",
            Self::GenerationError => "GENERATION_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::EmbeddingError => "EMBEDDING_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-9).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::IndexNotFound | Self::DatabaseError => 2,
            Self::InvalidMode | Self::InvalidArgument => 4,
            Self::NotConfigured | Self::RetrievalError | Self::GenerationError => 5,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
            Self::EmbeddingError => 9,
        }
    }

    /// Whether a caller should retry with corrected input.
    ///
    /// An invalid mode is terminal.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidArgument | Self::DatabaseError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in askbook operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mode specified: {mode}")]
    InvalidMode { mode: String },

    #[error("Local index not found at {path}")]
    IndexNotFound { path: PathBuf },

    #[error("{what} is not configured")]
    NotConfigured { what: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidMode { .. } => ErrorCode::InvalidMode,
            Self::IndexNotFound { .. } => ErrorCode::IndexNotFound,
            Self::NotConfigured { .. } => ErrorCode::NotConfigured,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Embedding(_) => ErrorCode::EmbeddingError,
            Self::Retrieval(_) => ErrorCode::RetrievalError,
            Self::Generation(_) => ErrorCode::GenerationError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidMode { .. } => {
                Some("Valid modes: chat, translate, explain".to_string())
            }

            Self::IndexNotFound { path } => Some(format!(
                "No local index at {}. Add documents with `askbook index add` or `askbook index import`.",
                path.display()
            )),

            Self::NotConfigured { what } if what.contains("embedding") => Some(
                "Set COHERE_API_KEY, or run `askbook config set embed-provider ollama`".to_string(),
            ),

            Self::InvalidArgument(msg) if msg.contains("limit") => {
                Some("Retrieval limit must be a positive integer".to_string())
            }

            Self::NotConfigured { .. }
            | Self::InvalidArgument(_)
            | Self::Database(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Config(_)
            | Self::Embedding(_)
            | Self::Retrieval(_)
            | Self::Generation(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
