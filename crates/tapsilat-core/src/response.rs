//! # Order Response
//!
//! Read-only view over a decoded order object. Decoding happens once, at
//! construction; every accessor is a pure read over the stored mapping and
//! tolerates missing or unknown fields.

use crate::error::{OrderError, OrderResult};
use crate::status::{status_text, OrderStatus, UNKNOWN_STATUS};
use crate::value::{array_field, float_field, int_field, present, str_field};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Human name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a JSON document, mapping syntax errors to [`OrderError::InvalidResponse`].
pub(crate) fn parse_json(json: &str) -> OrderResult<Value> {
    serde_json::from_str(json)
        .map_err(|e| OrderError::InvalidResponse(format!("Invalid JSON response: {}", e)))
}

/// Take the object out of a decoded value.
pub(crate) fn expect_object(value: Value) -> OrderResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(OrderError::InvalidResponse(format!(
            "Invalid response data type: {}",
            json_type_name(&other)
        ))),
    }
}

/// A single order as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderResponse {
    data: Map<String, Value>,
}

impl OrderResponse {
    /// Decode from a JSON document. Fails on malformed JSON or a non-object.
    pub fn from_json(json: &str) -> OrderResult<Self> {
        Self::from_value(parse_json(json)?)
    }

    /// Wrap an already-decoded value. Fails unless it is an object.
    pub fn from_value(value: Value) -> OrderResult<Self> {
        expect_object(value).map(Self::from_map)
    }

    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// The raw mapping
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.data
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.data.clone()).to_string()
    }

    /// Raw field lookup; `None` for missing or `null`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        present(&self.data, key)
    }

    pub fn order_id(&self) -> Option<&str> {
        str_field(&self.data, "order_id")
    }

    pub fn locale(&self) -> Option<&str> {
        str_field(&self.data, "locale")
    }

    pub fn reference_id(&self) -> Option<&str> {
        str_field(&self.data, "reference_id")
    }

    pub fn external_reference_id(&self) -> Option<&str> {
        str_field(&self.data, "external_reference_id")
    }

    pub fn amount(&self) -> Option<f64> {
        float_field(&self.data, "amount")
    }

    pub fn total(&self) -> Option<f64> {
        float_field(&self.data, "total")
    }

    pub fn paid_amount(&self) -> Option<f64> {
        float_field(&self.data, "paid_amount")
    }

    pub fn refunded_amount(&self) -> Option<f64> {
        float_field(&self.data, "refunded_amount")
    }

    /// Creation timestamp as sent by the API
    pub fn created_at(&self) -> Option<&str> {
        str_field(&self.data, "created_at")
    }

    /// Creation timestamp, when it is valid RFC 3339
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn currency(&self) -> Option<&str> {
        str_field(&self.data, "currency")
    }

    /// Integer status code
    pub fn status(&self) -> Option<i64> {
        int_field(&self.data, "status")
    }

    pub fn order_status(&self) -> Option<OrderStatus> {
        self.status().and_then(OrderStatus::from_code)
    }

    /// Label for the status code; `"Unknown"` when missing or unrecognised.
    pub fn status_text(&self) -> &'static str {
        self.status().map_or(UNKNOWN_STATUS, status_text)
    }

    pub fn status_enum(&self) -> Option<&Value> {
        self.get("status_enum")
    }

    pub fn buyer(&self) -> Option<&Value> {
        self.get("buyer")
    }

    pub fn shipping_address(&self) -> Option<&Value> {
        self.get("shipping_address")
    }

    pub fn billing_address(&self) -> Option<&Value> {
        self.get("billing_address")
    }

    pub fn basket_items(&self) -> &[Value] {
        array_field(&self.data, "basket_items")
    }

    pub fn checkout_design(&self) -> Option<&Value> {
        self.get("checkout_design")
    }

    pub fn payment_terms(&self) -> &[Value] {
        array_field(&self.data, "payment_terms")
    }

    pub fn payment_failure_url(&self) -> Option<&str> {
        str_field(&self.data, "payment_failure_url")
    }

    pub fn payment_success_url(&self) -> Option<&str> {
        str_field(&self.data, "payment_success_url")
    }

    /// Hosted checkout page for this order
    pub fn checkout_url(&self) -> Option<&str> {
        str_field(&self.data, "checkout_url")
    }

    pub fn conversation_id(&self) -> Option<&str> {
        str_field(&self.data, "conversation_id")
    }

    pub fn payment_options(&self) -> &[Value] {
        array_field(&self.data, "payment_options")
    }

    pub fn metadata(&self) -> &[Value] {
        array_field(&self.data, "metadata")
    }

    fn status_in(&self, codes: &[OrderStatus]) -> bool {
        self.order_status().is_some_and(|s| codes.contains(&s))
    }

    pub fn is_paid(&self) -> bool {
        self.status_in(&[OrderStatus::Paid])
    }

    pub fn is_cancelled(&self) -> bool {
        self.status_in(&[OrderStatus::Cancelled])
    }

    pub fn is_completed(&self) -> bool {
        self.status_in(&[OrderStatus::Completed])
    }

    /// Fully or partially refunded
    pub fn is_refunded(&self) -> bool {
        self.status_in(&[OrderStatus::Refunded, OrderStatus::PartiallyRefunded])
    }

    /// Unpaid or waiting for payment
    pub fn is_pending_payment(&self) -> bool {
        self.status_in(&[OrderStatus::Unpaid, OrderStatus::WaitingForPayment])
    }

    /// Fraud, rejected or failure
    pub fn is_failed(&self) -> bool {
        self.status_in(&[OrderStatus::Fraud, OrderStatus::Rejected, OrderStatus::Failure])
    }

    /// Sum of a numeric field over the basket items; absent values count as 0.
    pub fn sum_basket_field(&self, field: &str) -> f64 {
        self.basket_items()
            .iter()
            .filter_map(Value::as_object)
            .map(|item| float_field(item, field).unwrap_or(0.0))
            .sum()
    }

    pub fn total_refundable_amount(&self) -> f64 {
        self.sum_basket_field("refundable_amount")
    }

    pub fn total_paid_amount_from_items(&self) -> f64 {
        self.sum_basket_field("paid_amount")
    }
}

impl FromStr for OrderResponse {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl TryFrom<Value> for OrderResponse {
    type Error = OrderError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
