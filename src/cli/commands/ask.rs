//! Ask command implementation.

use crate::agent::ConfiguredAgent;
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::model::Answer;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct AskOutput<'a> {
    query: &'a str,
    mode: &'a str,
    #[serde(flatten)]
    answer: &'a Answer,
}

/// Execute the ask command.
///
/// # Errors
///
/// Returns `InvalidMode` for an unknown mode, or an error if the runtime
/// cannot start.
pub fn execute(
    query: &str,
    mode: &str,
    collection: Option<&str>,
    limit: Option<usize>,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let config = ResolvedConfig::load(db_path.map(PathBuf::as_path));
    let agent = ConfiguredAgent::from_config(&config);

    let rt = super::runtime()?;
    let answer = rt.block_on(agent.ask(query, mode, collection, limit))?;

    if json {
        let output = AskOutput {
            query,
            mode: mode.trim(),
            answer: &answer,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{answer}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_flattens_answer() {
        let answer = Answer::mock();
        let output = AskOutput {
            query: "q",
            mode: "explain",
            answer: &answer,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["status"], "mock");
        assert_eq!(json["mode"], "explain");
        assert!(json["answer"].as_str().unwrap().starts_with("This is a mock response"));
    }
}
