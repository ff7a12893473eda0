use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::RegistryError;
use crate::registry::{CommitReceipt, NewEntry, Registry, RegistryEntry};

/// JSON-over-HTTP [`Registry`] client.
///
/// Endpoint layout:
/// - `GET  {base}/entries/count`          -> `{ "count": n }`
/// - `GET  {base}/entries/{index}`        -> entry
/// - `GET  {base}/identities/{identity}`  -> entry, 404 if unbound
/// - `POST {base}/entries`                -> receipt, 409 if already bound
pub struct HttpRegistry {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

impl HttpRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            auth_token: None,
        }
    }

    /// Sets a bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn get_request(&self, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.get(format!("{}{path}", self.base_url));
        if let Some(token) = &self.auth_token {
            req = req.bearer_auth(token);
        }
        req
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn count(&self) -> Result<u64, RegistryError> {
        let resp = self
            .get_request("/entries/count")
            .send()
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(RegistryError::Read(format!("count: HTTP {}", resp.status())));
        }
        let out: CountResponse = resp
            .json()
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;
        Ok(out.count)
    }

    async fn entry_at(&self, index: u64) -> Result<RegistryEntry, RegistryError> {
        let resp = self
            .get_request(&format!("/entries/{index}"))
            .send()
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(RegistryError::Read(format!(
                "entry {index}: HTTP {}",
                resp.status()
            )));
        }
        resp.json()
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))
    }

    async fn entry_for(&self, identity: &str) -> Result<Option<RegistryEntry>, RegistryError> {
        let resp = self
            .get_request(&format!("/identities/{identity}"))
            .send()
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(RegistryError::Read(format!(
                "identity {identity}: HTTP {}",
                resp.status()
            )));
        }
        let entry: RegistryEntry = resp
            .json()
            .await
            .map_err(|e| RegistryError::Read(e.to_string()))?;
        Ok(if entry.is_empty() { None } else { Some(entry) })
    }

    async fn commit(&self, entry: &NewEntry) -> Result<CommitReceipt, RegistryError> {
        let mut req = self
            .client
            .post(format!("{}/entries", self.base_url))
            .json(entry);
        if let Some(token) = &self.auth_token {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| RegistryError::Commit(e.to_string()))?;

        if resp.status() == StatusCode::CONFLICT {
            return Err(RegistryError::AlreadyRegistered(entry.identity.clone()));
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::Commit(format!("HTTP {status}: {body}")));
        }
        resp.json()
            .await
            .map_err(|e| RegistryError::Commit(e.to_string()))
    }
}
