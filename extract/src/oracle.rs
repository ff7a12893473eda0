use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Server-side comparison of a candidate image against a stored payload.
///
/// The oracle returns a raw similarity score in `[0, 1]`. Any match
/// verdict embedded in the response is ignored: the threshold and
/// tie-break rule are applied by the caller, keeping the decision policy
/// in one place.
pub struct CompareOracle {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct CompareRequest<'a> {
    image: &'a str,
    content_address: &'a str,
}

#[derive(Deserialize)]
struct CompareResponse {
    similarity: Option<f64>,
    success: bool,
    error: Option<String>,
}

impl CompareOracle {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Compares a candidate image against the payload stored at
    /// `content_address` and returns the raw similarity.
    pub async fn compare(
        &self,
        image: &[u8],
        content_address: &str,
    ) -> Result<f32, ExtractError> {
        if image.is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let encoded = BASE64.encode(image);
        let body = CompareRequest {
            image: &encoded,
            content_address,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractError::Oracle(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ExtractError::Oracle(format!("HTTP {status}: {body}")));
        }

        let data: CompareResponse = resp
            .json()
            .await
            .map_err(|e| ExtractError::Oracle(e.to_string()))?;

        if !data.success {
            return Err(ExtractError::Oracle(
                data.error.unwrap_or_else(|| "unspecified failure".into()),
            ));
        }
        let similarity = data
            .similarity
            .ok_or_else(|| ExtractError::Oracle("response missing similarity".into()))?;
        Ok(similarity as f32)
    }
}
