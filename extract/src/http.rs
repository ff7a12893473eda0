use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::extract::Extractor;

/// HTTP-backed [`Extractor`].
///
/// POSTs the image as base64 JSON and reads back the embedding vector.
/// The service reports extraction failures (no face found, bad image) in
/// the response `error` field rather than via HTTP status.
pub struct HttpExtractor {
    client: Client,
    endpoint: String,
    api_key: String,
    dim: usize,
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponse {
    embedding: Option<Vec<f64>>,
    error: Option<String>,
}

impl HttpExtractor {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, dim: usize) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            dim,
        }
    }
}

#[async_trait::async_trait]
impl Extractor for HttpExtractor {
    async fn extract(&self, image: &[u8]) -> Result<Vec<f32>, ExtractError> {
        if image.is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let encoded = BASE64.encode(image);
        let body = ExtractRequest { image: &encoded };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractError::Api(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ExtractError::Api(format!("HTTP {status}: {body}")));
        }

        let data: ExtractResponse = resp
            .json()
            .await
            .map_err(|e| ExtractError::Api(e.to_string()))?;

        if let Some(error) = data.error {
            return Err(ExtractError::Api(error));
        }
        let embedding = data
            .embedding
            .ok_or_else(|| ExtractError::Api("response missing embedding".into()))?;

        // float64 wire format -> f32.
        Ok(embedding.iter().map(|&v| v as f32).collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}
