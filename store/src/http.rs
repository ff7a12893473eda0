use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::StoreError;
use crate::payload::EmbeddingPayload;
use crate::ContentStore;

/// Default per-gateway read timeout.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for [`HttpStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Single authoritative write endpoint. There is no write fallback.
    pub write_url: String,
    /// Bearer token for the write endpoint.
    pub auth_token: String,
    /// Ordered gateway URL prefixes; the content address is appended to
    /// each. Tried in order on reads, first success wins.
    pub gateways: Vec<String>,
    /// Per-gateway read timeout.
    pub gateway_timeout: Duration,
}

impl StoreConfig {
    pub fn new(
        write_url: impl Into<String>,
        auth_token: impl Into<String>,
        gateways: Vec<String>,
    ) -> Self {
        Self {
            write_url: write_url.into(),
            auth_token: auth_token.into(),
            gateways,
            gateway_timeout: DEFAULT_GATEWAY_TIMEOUT,
        }
    }

    pub fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = timeout;
        self
    }
}

/// Upload response from the write endpoint.
#[derive(Deserialize)]
struct PutResponse {
    hash: String,
}

/// HTTP-backed [`ContentStore`].
#[derive(Debug)]
pub struct HttpStore {
    client: Client,
    config: StoreConfig,
}

impl HttpStore {
    /// Creates a store client. Requires a write endpoint and at least one
    /// read gateway.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        if config.write_url.is_empty() {
            return Err(StoreError::Config("write_url must be non-empty".into()));
        }
        if config.gateways.is_empty() {
            return Err(StoreError::Config(
                "at least one read gateway is required".into(),
            ));
        }
        Ok(Self {
            client: Client::new(),
            config,
        })
    }
}

#[async_trait]
impl ContentStore for HttpStore {
    async fn put(&self, payload: &EmbeddingPayload) -> Result<String, StoreError> {
        let resp = self
            .client
            .post(&self.config.write_url)
            .bearer_auth(&self.config.auth_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Unavailable(format!("HTTP {status}: {body}")));
        }

        let out: PutResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(out.hash)
    }

    async fn get(&self, address: &str) -> Result<EmbeddingPayload, StoreError> {
        for gateway in &self.config.gateways {
            let url = format!("{gateway}{address}");
            let resp = match self
                .client
                .get(&url)
                .timeout(self.config.gateway_timeout)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(gateway = %gateway, address = %address, error = %e,
                        "gateway unreachable, trying next");
                    continue;
                }
            };

            if !resp.status().is_success() {
                tracing::warn!(gateway = %gateway, address = %address, status = %resp.status(),
                    "gateway returned error, trying next");
                continue;
            }

            match resp.json::<EmbeddingPayload>().await {
                Ok(payload) => return Ok(payload),
                Err(e) => {
                    tracing::warn!(gateway = %gateway, address = %address, error = %e,
                        "gateway returned malformed payload, trying next");
                    continue;
                }
            }
        }

        Err(StoreError::ContentUnavailable {
            address: address.to_string(),
            gateways: self.config.gateways.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use chrono::Utc;

    use super::*;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn sample_payload() -> EmbeddingPayload {
        EmbeddingPayload {
            embedding: vec![0.9, 0.1, 0.0, 0.0],
            identity: "0xabc".into(),
            created_at: Utc::now(),
        }
    }

    fn payload_router(payload: EmbeddingPayload) -> Router {
        Router::new().route(
            "/content/{address}",
            get(move || async move { Json(payload) }),
        )
    }

    fn failing_router() -> Router {
        Router::new().route(
            "/content/{address}",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
    }

    // Refused immediately; nothing listens on the discard port.
    const DEAD_GATEWAY: &str = "http://127.0.0.1:9/content/";

    #[tokio::test]
    async fn put_returns_address() {
        let base = spawn(Router::new().route(
            "/upload",
            post(|| async { Json(serde_json::json!({ "hash": "Qm123" })) }),
        ))
        .await;

        let store = HttpStore::new(StoreConfig::new(
            format!("{base}/upload"),
            "token",
            vec![format!("{base}/content/")],
        ))
        .unwrap();

        let address = store.put(&sample_payload()).await.unwrap();
        assert_eq!(address, "Qm123");
    }

    #[tokio::test]
    async fn put_http_error_is_unavailable() {
        let base = spawn(Router::new().route(
            "/upload",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        ))
        .await;

        let store = HttpStore::new(StoreConfig::new(
            format!("{base}/upload"),
            "token",
            vec![format!("{base}/content/")],
        ))
        .unwrap();

        let err = store.put(&sample_payload()).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "got {err}");
    }

    #[tokio::test]
    async fn put_unreachable_is_unavailable() {
        let store = HttpStore::new(StoreConfig::new(
            "http://127.0.0.1:9/upload",
            "token",
            vec!["http://127.0.0.1:9/content/".into()],
        ))
        .unwrap();

        let err = store.put(&sample_payload()).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "got {err}");
    }

    #[tokio::test]
    async fn get_first_gateway_wins() {
        let payload = sample_payload();
        let base = spawn(payload_router(payload.clone())).await;

        let store = HttpStore::new(StoreConfig::new(
            format!("{base}/upload"),
            "token",
            vec![format!("{base}/content/")],
        ))
        .unwrap();

        let got = store.get("QmX").await.unwrap();
        assert_eq!(got, payload);
    }

    #[tokio::test]
    async fn get_falls_back_to_third_gateway() {
        let payload = sample_payload();
        let erroring = spawn(failing_router()).await;
        let good = spawn(payload_router(payload.clone())).await;

        let store = HttpStore::new(StoreConfig::new(
            format!("{good}/upload"),
            "token",
            vec![
                DEAD_GATEWAY.to_string(),
                format!("{erroring}/content/"),
                format!("{good}/content/"),
            ],
        ))
        .unwrap();

        let got = store.get("QmX").await.unwrap();
        assert_eq!(got, payload);
    }

    #[tokio::test]
    async fn get_exhausting_all_gateways_fails() {
        let erroring = spawn(failing_router()).await;

        let store = HttpStore::new(StoreConfig::new(
            format!("{erroring}/upload"),
            "token",
            vec![DEAD_GATEWAY.to_string(), format!("{erroring}/content/")],
        ))
        .unwrap();

        let err = store.get("QmMissing").await.unwrap_err();
        match err {
            StoreError::ContentUnavailable { address, gateways } => {
                assert_eq!(address, "QmMissing");
                assert_eq!(gateways, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn new_requires_gateways() {
        let err = HttpStore::new(StoreConfig::new("http://w", "t", vec![])).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[tokio::test]
    async fn new_requires_write_url() {
        let err = HttpStore::new(StoreConfig::new("", "t", vec!["http://g/".into()])).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
