//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Output format.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON (same as --json)
    Json,
}

/// askbook - ask questions about a book, translate, explain
#[derive(Parser, Debug)]
#[command(name = "askbook", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Local index path (default: ~/.askbook/data/index.db)
    #[arg(long, global = true, env = "ASKBOOK_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (text, json)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no logs, errors as exit code only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question (chat), translate text, or explain a concept
    Ask {
        /// The query text
        query: String,

        /// Mode: chat, translate, explain
        #[arg(short, long, default_value = "chat")]
        mode: String,

        /// Collection to search (chat mode)
        #[arg(short, long)]
        collection: Option<String>,

        /// Number of passages to retrieve (chat mode)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Manage the local document index
    Index {
        #[command(subcommand)]
        command: IndexCommands,
    },

    /// Show which providers and index are configured
    Status,

    /// Show or change settings in ~/.askbook/config.json
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Index Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum IndexCommands {
    /// Embed and store a passage
    Add {
        /// Passage text
        text: String,

        /// Target collection
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Chunk, embed and store a text file
    Import {
        /// File to import (UTF-8 text or markdown)
        file: PathBuf,

        /// Target collection
        #[arg(short, long)]
        collection: Option<String>,

        /// Maximum chunk size
        #[arg(long, default_value_t = 1500)]
        max_chars: usize,

        /// Overlap between chunks
        #[arg(long, default_value_t = 150)]
        overlap: usize,
    },

    /// Show collections and document counts
    Stats,

    /// Delete a collection from the local index
    Drop {
        /// Collection name
        collection: String,
    },
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the settings file and the resolved configuration
    Show,

    /// Set a setting
    Set {
        /// Setting key (e.g. collection, retrieval-limit, embed-provider)
        key: String,

        /// New value
        value: String,
    },

    /// Clear a setting
    Unset {
        /// Setting key
        key: String,
    },

    /// Delete the settings file
    Reset,
}
