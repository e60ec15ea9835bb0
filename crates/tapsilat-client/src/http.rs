//! # Reqwest Transport
//!
//! [`HttpTransport`] over `reqwest`. Sends the bearer token and JSON
//! headers on every request, and turns statuses and I/O failures into
//! [`TransportError`] values right here, once.

use crate::config::TapsilatConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use tapsilat_core::{HttpTransport, OrderError, TransportError, TransportResult};
use tracing::{debug, error};

/// HTTP transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport from configuration.
    ///
    /// Fails when the config lacks credentials or the token is not a valid
    /// header value.
    pub fn new(config: &TapsilatConfig) -> Result<Self, OrderError> {
        let base_url = match (&config.base_url, config.is_configured()) {
            (Some(url), true) => url.trim_end_matches('/').to_string(),
            _ => return Err(OrderError::Configuration("Tapsilat not configured".to_string())),
        };

        let mut auth = HeaderValue::from_str(&config.auth_header()).map_err(|_| {
            OrderError::Configuration("API token is not a valid header value".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| {
                OrderError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    async fn execute(&self, request: RequestBuilder) -> TransportResult {
        let response = request.send().await.map_err(classify_reqwest_error)?;

        let status = response.status();
        if let Some(err) = TransportError::from_status(status.as_u16()) {
            error!("Tapsilat API error: status={}", status);
            return Err(err);
        }

        let body = response.bytes().await.map_err(classify_reqwest_error)?;
        decode_body(&body)
    }
}

/// Decode a 2xx body; blank bodies mean "no content".
pub fn decode_body(body: &[u8]) -> TransportResult {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| TransportError::Decode(e.to_string()))
}

/// Sort a reqwest failure into the retryable transport classes.
pub fn classify_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else if error.is_decode() {
        TransportError::Decode(error.to_string())
    } else if let Some(status) = error.status() {
        TransportError::from_status(status.as_u16())
            .unwrap_or_else(|| TransportError::Network(error.to_string()))
    } else {
        TransportError::Network(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> TransportResult {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> TransportResult {
        self.execute(self.request(Method::POST, path).body(body)).await
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> TransportResult {
        self.execute(self.request(Method::PUT, path).body(body)).await
    }

    async fn delete(&self, path: &str) -> TransportResult {
        self.execute(self.request(Method::DELETE, path)).await
    }
}
