//! Command implementations.

pub mod ask;
pub mod completions;
pub mod config;
pub mod index;
pub mod status;
pub mod version;

use crate::error::{Error, Result};

/// Create a tokio runtime for a single async command.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))
}
