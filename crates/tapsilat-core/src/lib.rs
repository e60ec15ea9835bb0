//! # tapsilat-core
//!
//! Core types for the Tapsilat payment-order client. Nothing in this crate
//! performs I/O.
//!
//! This crate provides:
//! - `validate_order` and `build_order` for the order-submission payload
//! - `OrderInput` and friends, typed builders for order data
//! - `OrderResponse` and `OrderListResponse`, read-only response views
//! - `OrderStatus` and `status_text` for the lifecycle code table
//! - `HttpTransport`, the seam the network client plugs into
//! - `OrderError` / `TransportError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tapsilat_core::{build_order, validate_order};
//!
//! let data = json!({
//!     "locale": "tr",
//!     "amount": 100.0,
//!     "currency": "TRY",
//!     "buyer": {"name": "John", "surname": "Doe", "email": "john@doe.com"},
//!     "billing_address": {"city": "Istanbul"},
//!     "basket_items": [{"id": "BI101", "name": "Phone", "price": 100.0, "quantity": 1}]
//! });
//!
//! let order = validate_order(&data).unwrap();
//! let payload = build_order(order);
//! assert_eq!(payload["billing_address"]["billing_type"], "PERSONAL");
//! ```

pub mod currency;
pub mod error;
pub mod input;
pub mod list;
pub mod params;
pub mod payload;
pub mod response;
pub mod status;
pub mod transport;
pub mod validate;
pub mod value;

// Re-exports for convenience
pub use currency::Currency;
pub use error::{Operation, OrderError, OrderResult, TransportError, ValidationError};
pub use input::{AddressInput, BasketItemInput, BuyerInput, OrderInput};
pub use list::OrderListResponse;
pub use params::ListOrdersParams;
pub use payload::build_order;
pub use response::OrderResponse;
pub use status::{status_text, OrderStatus};
pub use transport::{HttpTransport, SharedTransport, TransportResult};
pub use validate::validate_order;
