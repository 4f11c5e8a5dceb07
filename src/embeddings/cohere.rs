//! Cohere embedding provider.
//!
//! Calls the hosted `/v1/embed` endpoint. Queries and passages are embedded
//! with different `input_type`s, as Cohere v3 models expect.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

use super::provider::EmbeddingProvider;
use super::types::{cohere_models, EmbeddingPurpose, ProviderInfo};

/// Maximum number of texts Cohere accepts in one `/v1/embed` call.
pub const MAX_TEXTS_PER_REQUEST: usize = 96;

/// Cohere embedding provider.
pub struct CohereEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl CohereEmbedder {
    /// Create a provider for the given key, base URL and model.
    ///
    /// Returns `None` when the key is empty.
    #[must_use]
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Option<Self> {
        if api_key.trim().is_empty() {
            return None;
        }
        let config = cohere_models::get_config(model);

        Some(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: config.name,
            dimensions: config.dimensions,
        })
    }
}

/// Cohere API request for embedding.
#[derive(Debug, Serialize)]
struct CohereEmbedRequest<'a> {
    texts: Vec<&'a str>,
    model: &'a str,
    input_type: &'a str,
    embedding_types: [&'a str; 1],
}

/// Cohere embed response. v1 returns a bare list of vectors; requests that
/// name `embedding_types` get them keyed by type.
#[derive(Debug, Deserialize)]
struct CohereEmbedResponse {
    embeddings: CohereEmbeddings,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CohereEmbeddings {
    ByType { float: Vec<Vec<f32>> },
    Plain(Vec<Vec<f32>>),
}

impl CohereEmbeddings {
    fn into_vectors(self) -> Vec<Vec<f32>> {
        match self {
            Self::ByType { float } | Self::Plain(float) => float,
        }
    }
}

/// Split `texts` into request-sized groups, preserving order.
fn request_batches<'a, 'b>(texts: &'a [&'b str]) -> std::slice::Chunks<'a, &'b str> {
    texts.chunks(MAX_TEXTS_PER_REQUEST)
}

impl CohereEmbedder {
    async fn request(&self, texts: Vec<&str>, purpose: EmbeddingPurpose) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/v1/embed", self.base_url);
        let expected = texts.len();

        let request = CohereEmbedRequest {
            texts,
            model: &self.model,
            input_type: purpose.as_cohere_input_type(),
            embedding_types: ["float"],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Cohere request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!("Cohere API error ({status}): {error}")));
        }

        let data: CohereEmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse Cohere response: {e}")))?;

        let vectors = data.embeddings.into_vectors();
        if vectors.len() != expected {
            return Err(Error::Embedding(format!(
                "Cohere returned {} embeddings for {expected} texts",
                vectors.len()
            )));
        }
        Ok(vectors)
    }
}

impl EmbeddingProvider for CohereEmbedder {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "cohere".to_string(),
            model: self.model.clone(),
            dimensions: self.dimensions,
        }
    }

    async fn is_available(&self) -> bool {
        // Probing the API would spend quota; a key is the availability signal.
        !self.api_key.is_empty()
    }

    async fn embed(&self, text: &str, purpose: EmbeddingPurpose) -> Result<Vec<f32>> {
        self.request(vec![text], purpose)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("No embeddings returned from Cohere".into()))
    }

    async fn embed_batch(&self, texts: &[&str], purpose: EmbeddingPurpose) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in request_batches(texts) {
            vectors.extend(self.request(batch.to_vec(), purpose).await?);
        }
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_not_configured() {
        assert!(CohereEmbedder::new("", "https://api.cohere.com", "embed-english-v3.0").is_none());
        assert!(CohereEmbedder::new("  ", "https://api.cohere.com", "embed-english-v3.0").is_none());
    }

    #[test]
    fn test_provider_info() {
        let provider =
            CohereEmbedder::new("key", "https://api.cohere.com/", "embed-english-v3.0").unwrap();
        let info = provider.info();
        assert_eq!(info.name, "cohere");
        assert_eq!(info.dimensions, 1024);
        assert_eq!(provider.base_url, "https://api.cohere.com");
    }

    #[test]
    fn test_parse_typed_response() {
        let body = r#"{"id":"x","embeddings":{"float":[[0.1,0.2]]},"texts":["q"]}"#;
        let parsed: CohereEmbedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.embeddings.into_vectors(), vec![vec![0.1, 0.2]]);
    }

    #[test]
    fn test_parse_plain_response() {
        let body = r#"{"embeddings":[[1.0],[2.0]]}"#;
        let parsed: CohereEmbedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.embeddings.into_vectors(), vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_batches_respect_request_limit() {
        let texts: Vec<String> = (0..200).map(|i| format!("chunk {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

        let sizes: Vec<usize> = request_batches(&refs).map(<[&str]>::len).collect();
        assert_eq!(sizes, vec![96, 96, 8]);

        let rejoined: Vec<&str> = request_batches(&refs).flatten().copied().collect();
        assert_eq!(rejoined, refs);

        assert_eq!(request_batches(&refs[..96]).count(), 1);
        assert_eq!(request_batches(&[]).count(), 0);
    }

    #[test]
    fn test_request_shape() {
        let request = CohereEmbedRequest {
            texts: vec!["What is a B-tree?"],
            model: "embed-english-v3.0",
            input_type: EmbeddingPurpose::SearchQuery.as_cohere_input_type(),
            embedding_types: ["float"],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["input_type"], "search_query");
        assert_eq!(json["texts"][0], "What is a B-tree?");
        assert_eq!(json["embedding_types"][0], "float");
    }
}
