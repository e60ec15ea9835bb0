//! # Order Error Types
//!
//! Typed error handling for the Tapsilat order client.
//!
//! Failures are classified once, at the HTTP boundary, into a
//! [`TransportError`]. The order operations then re-tag that value with
//! the operation that was running ([`Operation`]) to build the
//! caller-facing [`OrderError`]. Nothing downstream inspects message text.

use std::fmt;
use thiserror::Error;

/// Failure reported by the HTTP collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// HTTP 401
    #[error("Unauthorized: Invalid API token")]
    Unauthorized,

    /// HTTP 404
    #[error("Resource not found")]
    NotFound,

    /// HTTP 500
    #[error("Server error")]
    ServerError,

    /// Any other non-2xx status
    #[error("Request failed with status {0}")]
    Status(u16),

    /// Open or read timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection refused/reset, DNS or socket failure
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Any other transport-level failure
    #[error("Transport error: {0}")]
    Network(String),

    /// A 2xx body that is not valid JSON
    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Map a non-2xx HTTP status to its transport error.
    ///
    /// Returns `None` for success statuses.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(TransportError::Unauthorized),
            404 => Some(TransportError::NotFound),
            500 => Some(TransportError::ServerError),
            other => Some(TransportError::Status(other)),
        }
    }

    /// Returns true for network-layer faults worth retrying.
    ///
    /// Faults derived from an HTTP status are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Timeout(_) | TransportError::Connect(_) | TransportError::Network(_)
        )
    }

    /// The HTTP status behind this error, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Unauthorized => Some(401),
            TransportError::NotFound => Some(404),
            TransportError::ServerError => Some(500),
            TransportError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Caller input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Order data must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Invalid currency. Must be one of: TRY, USD, EUR, GBP")]
    InvalidCurrency,

    #[error("Missing required buyer field: {0}")]
    MissingBuyerField(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Basket items cannot be empty")]
    EmptyBasket,

    #[error("Basket item {index}: missing required field '{field}'")]
    BasketItemMissingField { index: usize, field: &'static str },

    #[error("Basket item {index}: price must be a positive number")]
    BasketItemInvalidPrice { index: usize },

    #[error("Basket item {index}: quantity must be a positive integer")]
    BasketItemInvalidQuantity { index: usize },

    #[error("Order ID cannot be nil or empty")]
    EmptyOrderId,

    #[error("Invalid order data - JSON serialization failed: {0}")]
    Serialization(String),
}

/// The order operation an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Fetch,
    List,
}

impl Operation {
    /// Phrase used when wrapping an unclassified failure.
    pub fn unexpected_context(&self) -> &'static str {
        match self {
            Operation::Create => "during order creation",
            Operation::Fetch => "while fetching order",
            Operation::List => "while listing orders",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Operation::Create => "Order creation failed",
            Operation::Fetch => "Failed to fetch order",
            Operation::List => "Failed to list orders",
        };
        f.write_str(prefix)
    }
}

/// Core error type for all order operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    /// Client built without a base URL or API token
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller input defect, never retried
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The API refused to create the order; the message is shown as-is
    #[error("{0}")]
    Creation(String),

    /// Order lookup hit a 404
    #[error("Order with ID '{order_id}' not found")]
    NotFound { order_id: String },

    /// 401 from the API
    #[error("{operation} - Invalid API credentials: {source}")]
    Unauthorized {
        operation: Operation,
        source: TransportError,
    },

    /// 404 on an endpoint that should always exist
    #[error("{operation} - Invalid endpoint: {source}")]
    InvalidEndpoint {
        operation: Operation,
        source: TransportError,
    },

    /// 500 from the API
    #[error("{operation} - Server error: {source}")]
    Server {
        operation: Operation,
        source: TransportError,
    },

    /// Any other status-derived failure
    #[error("{operation}: {source}")]
    Api {
        operation: Operation,
        source: TransportError,
    },

    /// Network-layer fault; the retry executor consumes these
    #[error("{operation}: {source}")]
    Network {
        operation: Operation,
        source: TransportError,
    },

    /// Retries used up on network faults
    #[error("Max retry attempts ({attempts}) exceeded. Last error: {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },

    /// Response data could not be wrapped in a response model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Anything that fell through classification
    #[error("Unexpected error {}: {message}", .operation.unexpected_context())]
    Unexpected {
        operation: Operation,
        message: String,
    },
}

impl OrderError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Network { .. })
    }

    /// The underlying transport error, when the failure came from the HTTP layer.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            OrderError::Unauthorized { source, .. }
            | OrderError::InvalidEndpoint { source, .. }
            | OrderError::Server { source, .. }
            | OrderError::Api { source, .. }
            | OrderError::Network { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The HTTP status behind this error, if there was one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OrderError::NotFound { .. } => Some(404),
            other => other.transport_error().and_then(TransportError::status_code),
        }
    }
}

/// Result type alias for order operations
pub type OrderResult<T> = Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_transport_errors() {
        assert!(TransportError::Timeout("read".into()).is_retryable());
        assert!(TransportError::Connect("refused".into()).is_retryable());
        assert!(TransportError::Network("reset".into()).is_retryable());
        assert!(!TransportError::ServerError.is_retryable());
        assert!(!TransportError::Unauthorized.is_retryable());
        assert!(!TransportError::Decode("eof".into()).is_retryable());
    }

    #[test]
    fn test_from_status() {
        assert_eq!(TransportError::from_status(204), None);
        assert_eq!(TransportError::from_status(401), Some(TransportError::Unauthorized));
        assert_eq!(TransportError::from_status(404), Some(TransportError::NotFound));
        assert_eq!(TransportError::from_status(500), Some(TransportError::ServerError));
        assert_eq!(TransportError::from_status(503), Some(TransportError::Status(503)));
        assert_eq!(
            TransportError::Status(418).to_string(),
            "Request failed with status 418"
        );
    }

    #[test]
    fn test_order_error_messages() {
        let err = OrderError::Unauthorized {
            operation: Operation::Create,
            source: TransportError::Unauthorized,
        };
        assert_eq!(
            err.to_string(),
            "Order creation failed - Invalid API credentials: Unauthorized: Invalid API token"
        );

        let err = OrderError::NotFound {
            order_id: "ord_1".into(),
        };
        assert_eq!(err.to_string(), "Order with ID 'ord_1' not found");
        assert_eq!(err.status_code(), Some(404));

        let err = OrderError::Unexpected {
            operation: Operation::List,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Unexpected error while listing orders: boom");

        let err = OrderError::RetryExhausted {
            attempts: 3,
            last_error: "Request timed out: read".into(),
        };
        assert_eq!(
            err.to_string(),
            "Max retry attempts (3) exceeded. Last error: Request timed out: read"
        );
    }

    #[test]
    fn test_only_network_errors_retry() {
        let network = OrderError::Network {
            operation: Operation::Fetch,
            source: TransportError::Connect("refused".into()),
        };
        assert!(network.is_retryable());
        assert!(!OrderError::from(ValidationError::EmptyBasket).is_retryable());
        assert!(!OrderError::Creation("declined".into()).is_retryable());
        assert!(!OrderError::Server {
            operation: Operation::Create,
            source: TransportError::ServerError,
        }
        .is_retryable());
    }
}
