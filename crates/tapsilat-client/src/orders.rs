//! # Orders
//!
//! Create, fetch and list orders.
//!
//! Each operation validates its input before any I/O, then runs the HTTP
//! round-trip and response classification as one unit under the retry
//! policy. Transport errors are re-tagged with the operation (and order ID)
//! they came from; nothing escapes unclassified.
//!
//! `create` is not idempotent. A timeout after the server accepted the
//! order is retried like any other network fault and can create a second
//! order; the API offers no idempotency key to prevent this.

use crate::retry::RetryPolicy;
use serde_json::Value;
use tapsilat_core::{
    build_order, validate_order, ListOrdersParams, Operation, OrderError, OrderListResponse,
    OrderResponse, OrderResult, SharedTransport, TransportError, ValidationError,
};
use tracing::{debug, info, instrument, warn};

const ORDERS_PATH: &str = "/orders";
const ORDERS_LIST_PATH: &str = "/orders/list";

/// Order operations against the Tapsilat API
#[derive(Clone)]
pub struct Orders {
    transport: SharedTransport,
    retry: RetryPolicy,
}

impl Orders {
    pub fn new(transport: SharedTransport, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Validate and submit a new order.
    #[instrument(skip(self, order_data))]
    pub async fn create(&self, order_data: &Value) -> OrderResult<OrderResponse> {
        let order = validate_order(order_data)?;
        let payload = build_order(order);
        let body = serde_json::to_vec(&payload)
            .map_err(|e| ValidationError::Serialization(e.to_string()))?;

        debug!(
            "Creating order: {} basket items",
            payload["basket_items"].as_array().map_or(0, Vec::len)
        );

        let order = self
            .retry
            .run("create order", move || {
                let body = body.clone();
                async move {
                    let result = self.transport.post(ORDERS_PATH, body).await;
                    classify_create(result)
                }
            })
            .await?;

        info!(
            "Created order: reference_id={}",
            order.reference_id().unwrap_or("<none>")
        );
        Ok(order)
    }

    /// Fetch one order by its ID or reference.
    #[instrument(skip(self))]
    pub async fn get(&self, order_id: &str) -> OrderResult<OrderResponse> {
        if order_id.trim().is_empty() {
            return Err(ValidationError::EmptyOrderId.into());
        }

        let path = format!("{}/{}", ORDERS_PATH, order_id);
        let path = path.as_str();
        self.retry
            .run("fetch order", move || async move {
                let result = self.transport.get(path, &[]).await;
                classify_get(order_id, result)
            })
            .await
    }

    /// List orders, one page at a time.
    #[instrument(skip(self))]
    pub async fn list(&self, params: &ListOrdersParams) -> OrderResult<OrderListResponse> {
        let query = params.to_query();
        let query = query.as_slice();
        self.retry
            .run("list orders", move || async move {
                let result = self.transport.get(ORDERS_LIST_PATH, query).await;
                classify_list(result)
            })
            .await
    }

    /// Build the wire payload for `order_data` without sending it or
    /// checking required fields.
    pub fn build_order(&self, order_data: &Value) -> OrderResult<Value> {
        order_data
            .as_object()
            .map(build_order)
            .ok_or_else(|| ValidationError::NotAnObject.into())
    }
}

/// Faults shared by every operation: retryable network faults and
/// undecodable bodies.
fn classify_common(operation: Operation, error: TransportError) -> Result<TransportError, OrderError> {
    if error.is_retryable() {
        return Err(OrderError::Network {
            operation,
            source: error,
        });
    }
    if let TransportError::Decode(message) = error {
        return Err(OrderError::Unexpected {
            operation,
            message: format!("Invalid JSON response: {}", message),
        });
    }
    Ok(error)
}

fn empty_body(operation: Operation) -> OrderError {
    OrderError::Unexpected {
        operation,
        message: "empty response body".to_string(),
    }
}

/// Wrap a decoded body, treating a shape mismatch as unexpected.
fn wrap<T>(
    operation: Operation,
    body: Value,
    construct: fn(Value) -> OrderResult<T>,
) -> OrderResult<T> {
    construct(body).map_err(|e| OrderError::Unexpected {
        operation,
        message: e.to_string(),
    })
}

/// Classify the outcome of `POST /orders`.
pub fn classify_create(result: Result<Option<Value>, TransportError>) -> OrderResult<OrderResponse> {
    let operation = Operation::Create;
    let body = match result {
        Ok(Some(body)) => body,
        Ok(None) => return Err(empty_body(operation)),
        Err(e) => {
            return Err(match classify_common(operation, e) {
                Err(classified) => classified,
                Ok(source @ TransportError::Unauthorized) => OrderError::Unauthorized { operation, source },
                Ok(source @ TransportError::NotFound) => OrderError::InvalidEndpoint { operation, source },
                Ok(source @ TransportError::ServerError) => OrderError::Server { operation, source },
                Ok(other) => OrderError::Creation(format!("{}: {}", operation, other)),
            })
        }
    };

    if body.get("status").and_then(Value::as_str) == Some("error") {
        let message = ["message", "error_message"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map_or_else(|| operation.to_string(), str::to_string);
        return Err(OrderError::Creation(message));
    }

    let order = wrap(operation, body, OrderResponse::from_value)?;
    if order.reference_id().is_none() && order.order_id().is_none() {
        warn!("Order creation response carries no order_id or reference_id");
    }
    Ok(order)
}

/// Classify the outcome of `GET /orders/{id}`.
pub fn classify_get(
    order_id: &str,
    result: Result<Option<Value>, TransportError>,
) -> OrderResult<OrderResponse> {
    let operation = Operation::Fetch;
    match result {
        Ok(Some(body)) => wrap(operation, body, OrderResponse::from_value),
        Ok(None) => Err(empty_body(operation)),
        Err(e) => Err(match classify_common(operation, e) {
            Err(classified) => classified,
            Ok(TransportError::NotFound) => OrderError::NotFound {
                order_id: order_id.to_string(),
            },
            Ok(source @ TransportError::Unauthorized) => OrderError::Unauthorized { operation, source },
            Ok(source) => OrderError::Api { operation, source },
        }),
    }
}

/// Classify the outcome of `GET /orders/list`.
pub fn classify_list(result: Result<Option<Value>, TransportError>) -> OrderResult<OrderListResponse> {
    let operation = Operation::List;
    match result {
        Ok(Some(body)) => wrap(operation, body, OrderListResponse::from_value),
        Ok(None) => Err(empty_body(operation)),
        Err(e) => Err(match classify_common(operation, e) {
            Err(classified) => classified,
            Ok(source @ TransportError::Unauthorized) => OrderError::Unauthorized { operation, source },
            Ok(source) => OrderError::Api { operation, source },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tapsilat_core::{HttpTransport, TransportResult};

    /// Transport that replays canned results and records requests.
    struct ScriptedTransport {
        responses: Mutex<VecDeque<TransportResult>>,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<TransportResult>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::default(),
            })
        }

        fn next(&self, verb: &str, path: &str) -> TransportResult {
            self.requests
                .lock()
                .unwrap()
                .push((verb.to_string(), path.to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TransportError::Status(599)))
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn get(&self, path: &str, _query: &[(String, String)]) -> TransportResult {
            self.next("GET", path)
        }

        async fn post(&self, path: &str, _body: Vec<u8>) -> TransportResult {
            self.next("POST", path)
        }

        async fn put(&self, path: &str, _body: Vec<u8>) -> TransportResult {
            self.next("PUT", path)
        }

        async fn delete(&self, path: &str) -> TransportResult {
            self.next("DELETE", path)
        }
    }

    fn orders(transport: Arc<ScriptedTransport>) -> Orders {
        Orders::new(transport, RetryPolicy::new(3, Duration::from_secs(1)))
    }

    fn order_data() -> Value {
        json!({
            "locale": "tr",
            "amount": 100.0,
            "currency": "TRY",
            "buyer": {"name": "John", "surname": "Doe", "email": "john@doe.com"},
            "billing_address": {"city": "Istanbul"},
            "basket_items": [{"id": "BI101", "name": "Phone", "price": 100.0, "quantity": 1}]
        })
    }

    fn connection_reset() -> TransportResult {
        Err(TransportError::Connect("connection reset by peer".into()))
    }

    #[tokio::test]
    async fn test_validation_runs_before_io() {
        let transport = ScriptedTransport::new(vec![]);
        let orders = orders(transport.clone());

        let err = orders.create(&json!({"locale": "tr"})).await.unwrap_err();
        assert_eq!(err, OrderError::Validation(ValidationError::MissingField("amount")));

        let err = orders.get("   ").await.unwrap_err();
        assert_eq!(err, OrderError::Validation(ValidationError::EmptyOrderId));

        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_retries_network_faults() {
        let transport = ScriptedTransport::new(vec![
            connection_reset(),
            Err(TransportError::Timeout("read timeout".into())),
            Ok(Some(json!({"reference_id": "ref_1", "status": 1}))),
        ]);

        let order = orders(transport.clone()).create(&order_data()).await.unwrap();
        assert_eq!(order.reference_id(), Some("ref_1"));
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_exhausts_retries() {
        let transport = ScriptedTransport::new(vec![
            connection_reset(),
            connection_reset(),
            connection_reset(),
            Ok(Some(json!({}))),
        ]);

        let err = orders(transport.clone()).get("ord_1").await.unwrap_err();
        assert_eq!(
            err,
            OrderError::RetryExhausted {
                attempts: 3,
                last_error: "Connection failed: connection reset by peer".into(),
            }
        );
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn test_status_errors_are_not_retried() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::ServerError)]);

        let err = orders(transport.clone()).create(&order_data()).await.unwrap_err();
        assert_eq!(err.to_string(), "Order creation failed - Server error: Server error");
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_get_and_list_paths() {
        let transport = ScriptedTransport::new(vec![
            Ok(Some(json!({"status": 3}))),
            Ok(Some(json!({"rows": [], "page": 1}))),
        ]);
        let orders = orders(transport.clone());

        assert!(orders.get("ord_42").await.unwrap().is_paid());
        assert!(orders.list(&ListOrdersParams::new()).await.unwrap().is_empty());
        assert_eq!(
            *transport.requests.lock().unwrap(),
            vec![
                ("GET".to_string(), "/orders/ord_42".to_string()),
                ("GET".to_string(), "/orders/list".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_order_needs_object() {
        let orders = orders(ScriptedTransport::new(vec![]));
        assert!(orders.build_order(&json!({"locale": "tr"})).is_ok());
        assert_eq!(
            orders.build_order(&json!("order")).unwrap_err(),
            OrderError::Validation(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn test_classify_create() {
        let err = classify_create(Ok(Some(json!({"status": "error", "message": "Insufficient limit"}))))
            .unwrap_err();
        assert_eq!(err, OrderError::Creation("Insufficient limit".into()));

        let err = classify_create(Ok(Some(json!({"status": "error", "error_message": "Bad buyer"}))))
            .unwrap_err();
        assert_eq!(err.to_string(), "Bad buyer");

        let err = classify_create(Ok(Some(json!({"status": "error"})))).unwrap_err();
        assert_eq!(err, OrderError::Creation("Order creation failed".into()));

        assert!(matches!(
            classify_create(Err(TransportError::Unauthorized)),
            Err(OrderError::Unauthorized { operation: Operation::Create, .. })
        ));
        assert!(matches!(
            classify_create(Err(TransportError::NotFound)),
            Err(OrderError::InvalidEndpoint { .. })
        ));
        assert_eq!(
            classify_create(Err(TransportError::Status(422))).unwrap_err(),
            OrderError::Creation("Order creation failed: Request failed with status 422".into())
        );
        assert!(matches!(
            classify_create(Err(TransportError::Decode("eof".into()))),
            Err(OrderError::Unexpected { operation: Operation::Create, .. })
        ));
        assert!(matches!(
            classify_create(Ok(Some(json!([1, 2])))),
            Err(OrderError::Unexpected { .. })
        ));
        assert!(matches!(classify_create(Ok(None)), Err(OrderError::Unexpected { .. })));

        let order = classify_create(Ok(Some(json!({"status": 2, "reference_id": "r"})))).unwrap();
        assert!(order.is_pending_payment());
    }

    #[test]
    fn test_classify_get() {
        let err = classify_get("ord_9", Err(TransportError::NotFound)).unwrap_err();
        assert_eq!(err.to_string(), "Order with ID 'ord_9' not found");

        let err = classify_get("ord_9", Err(TransportError::Unauthorized)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch order - Invalid API credentials: Unauthorized: Invalid API token"
        );

        let err = classify_get("ord_9", Err(TransportError::ServerError)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch order: Server error");
        assert!(matches!(err, OrderError::Api { .. }));
    }

    #[test]
    fn test_classify_list() {
        let err = classify_list(Err(TransportError::Unauthorized)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to list orders - Invalid API credentials"));

        let err = classify_list(Err(TransportError::Status(429))).unwrap_err();
        assert_eq!(err.to_string(), "Failed to list orders: Request failed with status 429");

        let err = classify_list(Ok(Some(json!({"rows": 5})))).unwrap_err();
        assert!(err.to_string().starts_with("Unexpected error while listing orders"));

        let err = classify_list(Err(TransportError::Network("broken pipe".into()))).unwrap_err();
        assert!(err.is_retryable());
    }
}
