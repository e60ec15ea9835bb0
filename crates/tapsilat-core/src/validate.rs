//! # Order Validation
//!
//! Checks caller-supplied order data before anything touches the network.
//! Validation stops at the first defect; errors are not aggregated.

use crate::currency::Currency;
use crate::error::ValidationError;
use crate::value::present;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Top-level fields every order must carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "locale",
    "amount",
    "currency",
    "buyer",
    "billing_address",
    "basket_items",
];

const REQUIRED_BUYER_FIELDS: [&str; 3] = ["name", "surname", "email"];
const REQUIRED_ITEM_FIELDS: [&str; 4] = ["id", "name", "price", "quantity"];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Za-z0-9_+.\-]+@[a-z0-9\-]+(\.[a-z]+)+$").expect("Invalid regex")
});

/// A required field counts as given when present and not `false`.
fn given<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    present(map, key).filter(|v| !matches!(v, Value::Bool(false)))
}

/// Validate raw order data, returning the order object on success.
pub fn validate_order(data: &Value) -> Result<&Map<String, Value>, ValidationError> {
    let order = data.as_object().ok_or(ValidationError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if given(order, field).is_none() {
            return Err(ValidationError::MissingField(field));
        }
    }

    validate_amount(&order["amount"])?;
    validate_currency(&order["currency"])?;
    validate_buyer(&order["buyer"])?;
    validate_basket_items(&order["basket_items"])?;

    Ok(order)
}

pub fn validate_amount(amount: &Value) -> Result<(), ValidationError> {
    match amount.as_f64() {
        Some(a) if amount.is_number() && a > 0.0 => Ok(()),
        _ => Err(ValidationError::InvalidAmount),
    }
}

pub fn validate_currency(currency: &Value) -> Result<(), ValidationError> {
    currency
        .as_str()
        .and_then(|c| c.parse::<Currency>().ok())
        .map(|_| ())
        .ok_or(ValidationError::InvalidCurrency)
}

pub fn validate_buyer(buyer: &Value) -> Result<(), ValidationError> {
    let Some(buyer) = buyer.as_object() else {
        return Err(ValidationError::MissingBuyerField(REQUIRED_BUYER_FIELDS[0]));
    };

    for field in REQUIRED_BUYER_FIELDS {
        if given(buyer, field).is_none() {
            return Err(ValidationError::MissingBuyerField(field));
        }
    }

    let email = buyer["email"].as_str().unwrap_or_default();
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// `local@host.tld` check: ASCII word characters, `.`, `-` and `+` in the
/// local part, and at least one dot-separated segment after the host.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_basket_items(items: &Value) -> Result<(), ValidationError> {
    let items = items
        .as_array()
        .ok_or(ValidationError::MissingField("basket_items"))?;
    if items.is_empty() {
        return Err(ValidationError::EmptyBasket);
    }

    for (i, item) in items.iter().enumerate() {
        validate_basket_item(i + 1, item)?;
    }
    Ok(())
}

/// `index` is 1-based, as it appears in error messages.
fn validate_basket_item(index: usize, item: &Value) -> Result<(), ValidationError> {
    let Some(item) = item.as_object() else {
        return Err(ValidationError::BasketItemMissingField {
            index,
            field: REQUIRED_ITEM_FIELDS[0],
        });
    };

    for field in REQUIRED_ITEM_FIELDS {
        if given(item, field).is_none() {
            return Err(ValidationError::BasketItemMissingField { index, field });
        }
    }

    let price = &item["price"];
    if !(price.is_number() && price.as_f64().is_some_and(|p| p > 0.0)) {
        return Err(ValidationError::BasketItemInvalidPrice { index });
    }

    let quantity = &item["quantity"];
    let positive_int =
        quantity.as_i64().is_some_and(|q| q > 0) || quantity.as_u64().is_some_and(|q| q > 0);
    if !positive_int {
        return Err(ValidationError::BasketItemInvalidQuantity { index });
    }
    Ok(())
}
