//! Qdrant retrieval index over the REST API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::RetrievedDocument;

use super::index::RetrievalIndex;

/// Qdrant index client.
pub struct QdrantIndex {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl QdrantIndex {
    /// Create a client for the Qdrant instance at `url`.
    #[must_use]
    pub fn new(url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_string),
        }
    }

    /// Base URL of the Qdrant instance.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, format!("{}{path}", self.url));
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    id: serde_json::Value,
    score: f32,
    #[serde(default)]
    payload: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ScoredPoint {
    fn into_document(self) -> Result<RetrievedDocument> {
        let id = match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let text = self
            .payload
            .as_ref()
            .and_then(|p| p.get("text"))
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| Error::Retrieval(format!("point {id} has no 'text' payload")))?
            .to_string();

        Ok(RetrievedDocument {
            id: Some(id),
            score: Some(self.score),
            text,
        })
    }
}

impl RetrievalIndex for QdrantIndex {
    fn name(&self) -> &'static str {
        "qdrant"
    }

    async fn is_available(&self) -> bool {
        self.request(reqwest::Method::GET, "/collections")
            .timeout(std::time::Duration::from_secs(2))
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }

    async fn search(
        &self,
        embedding: &[f32],
        collection: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedDocument>> {
        if limit == 0 {
            return Err(Error::InvalidArgument("Retrieval limit must be greater than 0".into()));
        }

        let request = SearchRequest {
            vector: embedding,
            limit,
            with_payload: true,
        };

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/collections/{collection}/points/search"),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("Qdrant request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(Error::Retrieval(format!("Qdrant search failed ({status}): {error}")));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Retrieval(format!("Failed to parse Qdrant response: {e}")))?;

        debug!(hits = data.result.len(), collection, "Qdrant search complete");

        data.result
            .into_iter()
            .map(ScoredPoint::into_document)
            .collect()
    }
}
