//! Base HTTP client with shared logic

use crate::infrastructure::model::types::ModelError;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Shared reqwest plumbing for backend clients.
///
/// Failure classification is the whole point here: connection-level trouble,
/// a non-success status, and an unparseable body are three distinct error
/// kinds, because the agent loop treats them differently from tool failures.
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(id: String, endpoint: String) -> Self {
        Self {
            id,
            endpoint,
            http: Client::new(),
        }
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Post JSON without auth (local backends like Ollama).
    pub async fn post_json<Req, Res>(&self, url: &str, body: &Req) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::unreachable(&self.id, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::backend(&self.id, status.as_u16(), message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ModelError::unreachable(&self.id, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ModelError::malformed(&self.id, e.to_string()))
    }
}
