//! Config command implementation.

use crate::cli::ConfigCommands;
use crate::config::{
    config_path, load_settings, reset_settings, save_settings, ResolvedConfig, Settings,
};
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ShowOutput {
    path: Option<PathBuf>,
    settings: Settings,
    resolved: ResolvedConfig,
    cohere_api_key_set: bool,
    qdrant_api_key_set: bool,
}

#[derive(Serialize)]
struct ChangeOutput<'a> {
    success: bool,
    key: Option<&'a str>,
    message: String,
}

/// Execute config commands.
///
/// # Errors
///
/// Returns `InvalidArgument` for unknown keys or bad values, or `Config`
/// when the settings file cannot be read or written.
pub fn execute(command: &ConfigCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(db_path, json),
        ConfigCommands::Set { key, value } => {
            let mut settings = load_settings()?;
            settings.set(key, value)?;
            save_settings(&settings)?;
            report(json, Some(key.as_str()), format!("Set {key}"))
        }
        ConfigCommands::Unset { key } => {
            let mut settings = load_settings()?;
            settings.unset(key)?;
            save_settings(&settings)?;
            report(json, Some(key.as_str()), format!("Unset {key}"))
        }
        ConfigCommands::Reset => {
            reset_settings()?;
            report(json, None, "Settings reset to defaults".to_string())
        }
    }
}

fn show(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let path = config_path().ok();
    let settings = load_settings()?;
    let resolved = ResolvedConfig::load(db_path.map(PathBuf::as_path));

    let output = ShowOutput {
        path,
        settings: settings.redacted(),
        cohere_api_key_set: resolved.has_cohere_key(),
        qdrant_api_key_set: resolved.qdrant_api_key.is_some(),
        resolved,
    };

    if json {
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    match &output.path {
        Some(p) => println!("Config file: {}", p.display()),
        None => println!("Config file: (home directory not found)"),
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&output.settings)?);
    println!();

    let r = &output.resolved;
    println!("Resolved:");
    println!("  Collection:       {}", r.collection);
    println!("  Retrieval limit:  {}", r.retrieval_limit);
    println!(
        "  Embedding dim:    {}",
        r.embedding_dim.map_or_else(|| "model default".to_string(), |d| d.to_string())
    );
    println!("  Target language:  {}", r.target_language);
    println!(
        "  Index:            {}",
        r.index_backend.map_or_else(|| "auto".to_string(), |k| k.to_string())
    );
    if let Some(db) = &r.db_path {
        println!("  Local index path: {}", db.display());
    }
    println!(
        "  Cohere API key:   {}",
        if output.cohere_api_key_set { "set" } else { "not set" }
    );

    Ok(())
}

fn report(json: bool, key: Option<&str>, message: String) -> Result<()> {
    if json {
        let output = ChangeOutput {
            success: true,
            key,
            message,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{message}");
    }
    Ok(())
}
