//! # Tapsilat Client
//!
//! Entry point: holds the configuration and a shared transport, hands out
//! the [`Orders`] service and exposes raw verb passthroughs for endpoints
//! without a typed wrapper.

use crate::config::TapsilatConfig;
use crate::http::ReqwestTransport;
use crate::orders::Orders;
use serde_json::Value;
use std::sync::Arc;
use tapsilat_core::{OrderError, OrderResult, SharedTransport, TransportResult};
use tracing::info;

/// Tapsilat API client
#[derive(Clone)]
pub struct Client {
    config: TapsilatConfig,
    transport: SharedTransport,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("max_attempts", &self.config.max_attempts)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client backed by `reqwest`.
    pub fn new(config: TapsilatConfig) -> OrderResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        info!("Tapsilat client ready: {}", transport.base_url());
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// Create a client from `TAPSILAT_*` environment variables
    pub fn from_env() -> OrderResult<Self> {
        Self::new(TapsilatConfig::from_env()?)
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// The config must still be complete; only its retry settings are used.
    pub fn with_transport(config: TapsilatConfig, transport: SharedTransport) -> OrderResult<Self> {
        if !config.is_configured() {
            return Err(OrderError::Configuration("Tapsilat not configured".to_string()));
        }
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &TapsilatConfig {
        &self.config
    }

    /// Order operations, retrying per the configured policy
    pub fn orders(&self) -> Orders {
        Orders::new(self.transport.clone(), self.config.retry_policy())
    }

    /// Raw `GET`; no retry, no classification beyond [`TransportError`](tapsilat_core::TransportError).
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> TransportResult {
        self.transport.get(path, query).await
    }

    /// Raw `POST` of a JSON document
    pub async fn post(&self, path: &str, body: &Value) -> TransportResult {
        self.transport.post(path, body.to_string().into_bytes()).await
    }

    /// Raw `PUT` of a JSON document
    pub async fn put(&self, path: &str, body: &Value) -> TransportResult {
        self.transport.put(path, body.to_string().into_bytes()).await
    }

    pub async fn delete(&self, path: &str) -> TransportResult {
        self.transport.delete(path).await
    }
}
