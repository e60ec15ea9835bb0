//! # Order Payload Builder
//!
//! Turns loosely-typed order data into the wire payload for `POST /orders`.
//!
//! Every object is assembled as a list of `(key, Option<value>)` pairs and
//! then compacted: pairs whose value is absent are dropped, so the payload
//! never carries a `null`. An explicit `false` or `0` in the input is a
//! value, not an absence, and is kept.
//!
//! Monetary fields are coerced to floats and quantities to integers.
//! Building performs no validation; see [`crate::validate`].

use crate::currency::Currency;
use crate::value::{as_float, float_field, int_field, present};
use serde_json::{json, Map, Value};

type Field = (&'static str, Option<Value>);

/// Collect the present pairs into a JSON object.
pub fn compact<I>(fields: I) -> Value
where
    I: IntoIterator<Item = Field>,
{
    Value::Object(
        fields
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect(),
    )
}

fn raw(map: &Map<String, Value>, key: &str) -> Option<Value> {
    present(map, key).cloned()
}

fn or_default(map: &Map<String, Value>, key: &str, default: Value) -> Option<Value> {
    Some(raw(map, key).unwrap_or(default))
}

fn float(map: &Map<String, Value>, key: &str) -> Option<Value> {
    float_field(map, key).map(Value::from)
}

fn float_or_zero(map: &Map<String, Value>, key: &str) -> Option<Value> {
    Some(Value::from(float_field(map, key).unwrap_or(0.0)))
}

/// Build a nested object with `build` when the field holds one.
///
/// Non-object values are passed through untouched.
fn nested(
    map: &Map<String, Value>,
    key: &str,
    build: fn(&Map<String, Value>) -> Value,
) -> Option<Value> {
    match present(map, key)? {
        Value::Object(obj) => Some(build(obj)),
        other => Some(other.clone()),
    }
}

fn currency(map: &Map<String, Value>) -> Option<Value> {
    let value = present(map, "currency")?;
    let canonical = value
        .as_str()
        .and_then(|s| s.parse::<Currency>().ok())
        .map(|c| Value::from(c.as_str()));
    Some(canonical.unwrap_or_else(|| value.clone()))
}

fn basket_items(map: &Map<String, Value>) -> Option<Value> {
    match present(map, "basket_items")? {
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(obj) => build_basket_item(obj),
                    other => other.clone(),
                })
                .collect(),
        )),
        other => Some(other.clone()),
    }
}

/// Build the complete order payload.
pub fn build_order(order: &Map<String, Value>) -> Value {
    compact([
        ("locale", raw(order, "locale")),
        ("amount", float(order, "amount")),
        ("paid_amount", float_or_zero(order, "paid_amount")),
        ("tax_amount", float_or_zero(order, "tax_amount")),
        ("currency", currency(order)),
        ("three_d_force", or_default(order, "three_d_force", json!(false))),
        ("enabled_installments", or_default(order, "enabled_installments", json!([1]))),
        ("external_reference_id", raw(order, "external_reference_id")),
        ("conversation_id", raw(order, "conversation_id")),
        ("buyer", nested(order, "buyer", build_buyer)),
        ("shipping_address", nested(order, "shipping_address", build_shipping_address)),
        ("billing_address", nested(order, "billing_address", build_billing_address)),
        ("basket_items", basket_items(order)),
        ("submerchants", or_default(order, "submerchants", json!([]))),
        ("payment_terms", or_default(order, "payment_terms", json!([]))),
        ("payment_methods", or_default(order, "payment_methods", json!(true))),
        ("payment_failure_url", raw(order, "payment_failure_url")),
        ("payment_success_url", raw(order, "payment_success_url")),
        ("order_vpos_id", raw(order, "order_vpos_id")),
        ("order_cards", or_default(order, "order_cards", json!([]))),
        ("partial_payment", or_default(order, "partial_payment", json!(false))),
        ("pf_sub_merchant", nested(order, "pf_sub_merchant", build_pf_sub_merchant)),
        ("metadata", or_default(order, "metadata", json!([]))),
        ("payment_options", or_default(order, "payment_options", json!(["credit_card"]))),
    ])
}

pub fn build_buyer(buyer: &Map<String, Value>) -> Value {
    compact(
        [
            "id",
            "name",
            "surname",
            "email",
            "gsm_number",
            "identity_number",
            "registration_date",
            "registration_address",
            "last_login_date",
            "city",
            "country",
            "zip_code",
            "ip",
            "birth_date",
            "title",
        ]
        .map(|key| (key, raw(buyer, key))),
    )
}

pub fn build_shipping_address(address: &Map<String, Value>) -> Value {
    compact(
        [
            "address",
            "zip_code",
            "city",
            "country",
            "contact_name",
            "tracking_code",
            "shipping_date",
        ]
        .map(|key| (key, raw(address, key))),
    )
}

pub fn build_billing_address(address: &Map<String, Value>) -> Value {
    let billing_type = ("billing_type", or_default(address, "billing_type", json!("PERSONAL")));
    let rest = [
        "citizenship",
        "vat_number",
        "city",
        "district",
        "country",
        "address",
        "zip_code",
        "contact_name",
        "contact_phone",
        "title",
        "tax_office",
    ]
    .map(|key| (key, raw(address, key)));

    compact(std::iter::once(billing_type).chain(rest))
}

pub fn build_basket_item(item: &Map<String, Value>) -> Value {
    let quantity = int_field(item, "quantity");
    let quantity_float = float_field(item, "quantity_float")
        .or_else(|| present(item, "quantity").and_then(as_float));

    compact([
        ("id", raw(item, "id")),
        ("price", float(item, "price")),
        ("quantity", quantity.map(Value::from)),
        ("name", raw(item, "name")),
        ("category1", raw(item, "category1")),
        ("category2", raw(item, "category2")),
        ("item_type", or_default(item, "item_type", json!("PHYSICAL"))),
        ("sub_merchant_key", raw(item, "sub_merchant_key")),
        ("sub_merchant_price", float(item, "sub_merchant_price")),
        ("coupon", raw(item, "coupon")),
        ("coupon_discount", float_or_zero(item, "coupon_discount")),
        ("quantity_float", quantity_float.map(Value::from)),
        ("quantity_unit", or_default(item, "quantity_unit", json!("unit"))),
        ("paid_amount", float_or_zero(item, "paid_amount")),
        ("data", raw(item, "data")),
        ("payer", nested(item, "payer", build_payer)),
        ("commission_amount", float_or_zero(item, "commission_amount")),
    ])
}

pub fn build_payer(payer: &Map<String, Value>) -> Value {
    compact([
        ("type", or_default(payer, "type", json!("PERSONAL"))),
        ("title", raw(payer, "title")),
        ("address", raw(payer, "address")),
        ("vat", raw(payer, "vat")),
        ("tax_office", raw(payer, "tax_office")),
        ("reference_id", raw(payer, "reference_id")),
    ])
}

pub fn build_pf_sub_merchant(sub_merchant: &Map<String, Value>) -> Value {
    compact(
        [
            "id",
            "name",
            "postal_code",
            "city",
            "country",
            "mcc",
            "terminal_no",
            "org_id",
            "country_iso_code",
            "address",
            "submerchant_url",
            "submerchant_nin",
        ]
        .map(|key| (key, raw(sub_merchant, key))),
    )
}
