//! Cohere chat generation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::provider::{GenerationProvider, GeneratorInfo};

/// Cohere `/v1/chat` client.
pub struct CohereChat {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CohereChat {
    /// Returns `None` when the key is empty.
    #[must_use]
    pub fn new(api_key: &str, base_url: &str) -> Option<Self> {
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    text: String,
}

impl GenerationProvider for CohereChat {
    fn info(&self) -> GeneratorInfo {
        GeneratorInfo {
            name: "cohere".into(),
            label: "Cohere".into(),
            model: None,
        }
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/chat", self.base_url);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest { message: prompt })
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Cohere request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("Cohere API error ({status}): {body}")));
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse Cohere response: {e}")))?;

        Ok(data.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_key() {
        assert!(CohereChat::new("", "https://api.cohere.com").is_none());
        let chat = CohereChat::new("k", "https://api.cohere.com/").unwrap();
        assert_eq!(chat.base_url, "https://api.cohere.com");
        assert_eq!(chat.info().label, "Cohere");
    }

    #[test]
    fn test_parse_chat_response() {
        let body = r#"{"response_id":"r","text":"Hello there","generation_id":"g","finish_reason":"COMPLETE"}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text, "Hello there");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_generation_error() {
        let chat = CohereChat::new("k", "http://127.0.0.1:9").unwrap();
        let err = chat.generate("hi").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }
}
