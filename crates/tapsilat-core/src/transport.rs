//! # HTTP Transport Trait
//!
//! The boundary between the order logic and the network. Implementations
//! perform a single request, decode the JSON body and classify failures
//! into [`TransportError`]; they never retry.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            HttpTransport (trait)            │
//! │  ├── get(path, query)                       │
//! │  ├── post(path, body)                       │
//! │  ├── put(path, body)                        │
//! │  └── delete(path)                           │
//! └─────────────────────────────────────────────┘
//!                       ▲
//!          ┌────────────┴────────────┐
//!  ┌───────┴────────┐       ┌────────┴───────┐
//!  │ReqwestTransport│       │ test doubles   │
//!  └────────────────┘       └────────────────┘
//! ```

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Decoded response body; `None` for an empty 2xx body.
pub type TransportResult = Result<Option<Value>, TransportError>;

/// One HTTP round-trip against the API.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> TransportResult;

    /// `body` is an already-encoded JSON document.
    async fn post(&self, path: &str, body: Vec<u8>) -> TransportResult;

    async fn put(&self, path: &str, body: Vec<u8>) -> TransportResult;

    async fn delete(&self, path: &str) -> TransportResult;
}

/// Type alias for a shared transport
pub type SharedTransport = Arc<dyn HttpTransport>;
