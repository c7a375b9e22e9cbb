use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// HTTP client for the upstream nutrition backend.
///
/// Every call is made on behalf of one request's bearer token, so the token
/// is a per-call argument rather than client state. Cheap to clone.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, url);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    /// Forward a request as-is and hand back the upstream status and body,
    /// both untouched. This is the whole of the proxy layer: no business
    /// logic, no body inspection.
    #[tracing::instrument(skip(self, body, token), fields(path = %path))]
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Bytes>,
    ) -> Result<(StatusCode, Bytes), ApiError> {
        let mut req = self.request(method, path, token);
        if let Some(body) = body {
            req = req
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }
        let resp = req.send().await.map_err(ApiError::from_transport)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(ApiError::from_transport)?;
        debug!(%status, "forwarded");
        Ok((status, bytes))
    }

    /// GET a JSON resource, mapping error responses into `ApiError`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
    ) -> Result<T, ApiError> {
        let resp = self
            .request(Method::GET, path, Some(token))
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::parse(resp).await
    }

    /// Send a JSON body and parse a JSON response.
    pub async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .request(method, path, token)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::parse(resp).await
    }

    /// Send a JSON body where only success matters (password changes).
    pub async fn send_json_unit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let resp = self
            .request(method, path, Some(token))
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(resp).await)
    }

    /// Send a bodyless request where only success matters (logout, deletes).
    pub async fn send_empty(
        &self,
        method: Method,
        token: &str,
        path: &str,
    ) -> Result<(), ApiError> {
        let resp = self
            .request(method, path, Some(token))
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(resp).await)
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        resp.json()
            .await
            .map_err(|e| ApiError::network(format!("invalid upstream body: {e}")))
    }

    async fn error_from(resp: reqwest::Response) -> ApiError {
        let status = resp.status();
        let body = resp.json::<Value>().await.ok();
        ApiError::from_upstream(status, body)
    }
}
