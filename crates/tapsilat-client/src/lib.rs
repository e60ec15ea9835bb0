//! # tapsilat-client
//!
//! HTTP client for the Tapsilat payment-order API.
//!
//! This crate wires the pure types from `tapsilat-core` to the network:
//!
//! 1. **Client** - configuration plus a shared transport
//!    - `Client::new(config)` or `Client::from_env()`
//!    - Raw `get` / `post` / `put` / `delete` passthroughs
//!
//! 2. **Orders** - the typed order operations
//!    - `create` validates, builds and submits an order
//!    - `get` fetches one order by ID
//!    - `list` pages through orders
//!    - Network faults retried with linear backoff (1s, 2s, ...)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use serde_json::json;
//! use tapsilat_client::{Client, TapsilatConfig};
//!
//! let client = Client::new(TapsilatConfig::new(
//!     "https://acquiring.tapsilat.dev/api/v1",
//!     "your-api-token",
//! ))?;
//!
//! let order = client.orders().create(&json!({
//!     "locale": "tr",
//!     "amount": 100.0,
//!     "currency": "TRY",
//!     "buyer": {"name": "John", "surname": "Doe", "email": "john@doe.com"},
//!     "billing_address": {"city": "Istanbul"},
//!     "basket_items": [{"id": "BI101", "name": "Phone", "price": 100.0, "quantity": 1}]
//! })).await?;
//!
//! // Redirect the buyer to order.checkout_url()
//! ```
//!
//! ## Listing
//!
//! ```rust,ignore
//! use tapsilat_client::ListOrdersParams;
//!
//! let page = client.orders().list(&ListOrdersParams::new().per_page(50)).await?;
//! for order in page.paid_orders() {
//!     println!("{} paid {}", order.reference_id().unwrap_or("?"), order.paid_amount().unwrap_or_default());
//! }
//! ```

pub mod client;
pub mod config;
pub mod http;
pub mod orders;
pub mod retry;

// Re-exports
pub use client::Client;
pub use config::TapsilatConfig;
pub use http::ReqwestTransport;
pub use orders::Orders;
pub use retry::{with_retry, RetryPolicy, MAX_ATTEMPTS, RETRY_DELAY};

pub use tapsilat_core;
pub use tapsilat_core::{
    ListOrdersParams, OrderError, OrderInput, OrderListResponse, OrderResponse, OrderResult,
    OrderStatus,
};
