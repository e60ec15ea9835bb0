//! # Order List Response
//!
//! Paginated listing returned by `GET /orders/list`.

use crate::error::{OrderError, OrderResult};
use crate::response::{expect_object, json_type_name, parse_json, OrderResponse};
use crate::value::{array_field, int_field, present};
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

/// One page of orders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderListResponse {
    data: Map<String, Value>,
}

impl OrderListResponse {
    pub fn from_json(json: &str) -> OrderResult<Self> {
        Self::from_value(parse_json(json)?)
    }

    /// Wrap a decoded page. `rows`, when present, must be an array of objects.
    pub fn from_value(value: Value) -> OrderResult<Self> {
        let data = expect_object(value)?;

        match present(&data, "rows") {
            None => {}
            Some(Value::Array(rows)) => {
                if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| !r.is_object()) {
                    return Err(OrderError::InvalidResponse(format!(
                        "Invalid order row {}: expected object, got {}",
                        i + 1,
                        json_type_name(row)
                    )));
                }
            }
            Some(other) => {
                return Err(OrderError::InvalidResponse(format!(
                    "Invalid rows field: expected array, got {}",
                    json_type_name(other)
                )));
            }
        }

        Ok(Self { data })
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.data.clone()).to_string()
    }

    /// Orders on this page, rebuilt from the raw rows on every call.
    pub fn rows(&self) -> Vec<OrderResponse> {
        array_field(&self.data, "rows")
            .iter()
            .filter_map(|row| row.as_object().cloned())
            .map(OrderResponse::from_map)
            .collect()
    }

    /// Total number of orders across all pages
    pub fn total(&self) -> i64 {
        int_field(&self.data, "total").unwrap_or(0)
    }

    pub fn page(&self) -> i64 {
        int_field(&self.data, "page").unwrap_or(1)
    }

    pub fn per_page(&self) -> i64 {
        int_field(&self.data, "per_page").unwrap_or(10)
    }

    pub fn total_pages(&self) -> i64 {
        int_field(&self.data, "total_pages").unwrap_or(0)
    }

    pub fn is_first_page(&self) -> bool {
        self.page() == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page() >= self.total_pages()
    }

    pub fn has_next_page(&self) -> bool {
        self.page() < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page() > 1
    }

    pub fn next_page(&self) -> Option<i64> {
        self.has_next_page().then(|| self.page() + 1)
    }

    pub fn previous_page(&self) -> Option<i64> {
        self.has_previous_page().then(|| self.page() - 1)
    }

    /// Orders matching a predicate
    pub fn filter<F>(&self, predicate: F) -> Vec<OrderResponse>
    where
        F: Fn(&OrderResponse) -> bool,
    {
        self.rows().into_iter().filter(|order| predicate(order)).collect()
    }

    pub fn orders_with_status(&self, status_code: i64) -> Vec<OrderResponse> {
        self.filter(|order| order.status() == Some(status_code))
    }

    pub fn paid_orders(&self) -> Vec<OrderResponse> {
        self.filter(OrderResponse::is_paid)
    }

    pub fn pending_orders(&self) -> Vec<OrderResponse> {
        self.filter(OrderResponse::is_pending_payment)
    }

    pub fn cancelled_orders(&self) -> Vec<OrderResponse> {
        self.filter(OrderResponse::is_cancelled)
    }

    /// Sum of `amount` over the rows; missing amounts count as 0
    pub fn total_amount(&self) -> f64 {
        self.rows().iter().map(|o| o.amount().unwrap_or(0.0)).sum()
    }

    pub fn total_paid_amount(&self) -> f64 {
        self.rows().iter().map(|o| o.paid_amount().unwrap_or(0.0)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of orders on this page
    pub fn count(&self) -> usize {
        array_field(&self.data, "rows").len()
    }
}

impl FromStr for OrderListResponse {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl TryFrom<Value> for OrderListResponse {
    type Error = OrderError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
