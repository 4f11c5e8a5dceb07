//! Ollama text generation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::provider::{GenerationProvider, GeneratorInfo};

/// Ollama `/api/generate` client (non-streaming).
pub struct OllamaGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaGenerator {
    #[must_use]
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl GenerationProvider for OllamaGenerator {
    fn info(&self) -> GeneratorInfo {
        GeneratorInfo {
            name: "ollama".into(),
            label: "Ollama".into(),
            model: Some(self.model.clone()),
        }
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.endpoint))
            .timeout(std::time::Duration::from_secs(2))
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.endpoint);
        debug!(model = %self.model, "POST {url}");

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Ollama request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("Ollama generate failed ({status}): {body}")));
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse Ollama response: {e}")))?;

        Ok(data.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_non_streaming() {
        let json = serde_json::to_value(GenerateRequest {
            model: "llama3.2",
            prompt: "hi",
            stream: false,
        })
        .unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["model"], "llama3.2");
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"model":"llama3.2","response":"Hi!","done":true}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.response, "Hi!");
    }

    #[test]
    fn test_info() {
        let generator = OllamaGenerator::new("http://localhost:11434/", "llama3.2");
        let info = generator.info();
        assert_eq!(info.label, "Ollama");
        assert_eq!(info.model.as_deref(), Some("llama3.2"));
    }
}
