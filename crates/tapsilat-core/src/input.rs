//! # Order Input
//!
//! Typed builders for order data. They serialise into the same loose JSON
//! mapping that [`crate::validate`] and [`crate::payload`] accept, so callers
//! can pick either form.

use crate::currency::Currency;
use serde::Serialize;
use serde_json::{Map, Value};

/// Buyer details
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuyerInput {
    pub name: String,
    pub surname: String,
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gsm_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// Less common fields (registration_date, birth_date, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BuyerInput {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_gsm_number(mut self, gsm: impl Into<String>) -> Self {
        self.gsm_number = Some(gsm.into());
        self
    }

    pub fn with_identity_number(mut self, identity: impl Into<String>) -> Self {
        self.identity_number = Some(identity.into());
        self
    }

    pub fn with_location(mut self, city: impl Into<String>, country: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.country = Some(country.into());
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Set any other buyer field by its wire name.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Billing or shipping address
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddressInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    /// Other fields (billing_type, district, tracking_code, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AddressInput {
    pub fn new(address: impl Into<String>, city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            city: Some(city.into()),
            country: Some(country.into()),
            ..Default::default()
        }
    }

    pub fn with_zip_code(mut self, zip: impl Into<String>) -> Self {
        self.zip_code = Some(zip.into());
        self
    }

    pub fn with_contact_name(mut self, name: impl Into<String>) -> Self {
        self.contact_name = Some(name.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A line item in the basket
#[derive(Debug, Clone, Serialize)]
pub struct BasketItemInput {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BasketItemInput {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            category1: None,
            item_type: None,
            extra: Map::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category1 = Some(category.into());
        self
    }

    /// e.g. `"PHYSICAL"` or `"VIRTUAL"`
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// An order to be submitted
#[derive(Debug, Clone, Serialize)]
pub struct OrderInput {
    pub locale: String,
    pub amount: f64,
    pub currency: Currency,
    pub buyer: BuyerInput,
    pub billing_address: AddressInput,
    pub basket_items: Vec<BasketItemInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<AddressInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_success_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_failure_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_installments: Option<Vec<u32>>,

    /// Other top-level fields (tax_amount, pf_sub_merchant, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderInput {
    pub fn new(
        locale: impl Into<String>,
        amount: f64,
        currency: Currency,
        buyer: BuyerInput,
        billing_address: AddressInput,
    ) -> Self {
        Self {
            locale: locale.into(),
            amount,
            currency,
            buyer,
            billing_address,
            basket_items: Vec::new(),
            shipping_address: None,
            conversation_id: None,
            external_reference_id: None,
            payment_success_url: None,
            payment_failure_url: None,
            enabled_installments: None,
            extra: Map::new(),
        }
    }

    /// Add a line item
    pub fn add_item(&mut self, item: BasketItemInput) {
        self.basket_items.push(item);
    }

    pub fn with_item(mut self, item: BasketItemInput) -> Self {
        self.add_item(item);
        self
    }

    pub fn with_shipping_address(mut self, address: AddressInput) -> Self {
        self.shipping_address = Some(address);
        self
    }

    pub fn with_conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = Some(id.into());
        self
    }

    pub fn with_external_reference_id(mut self, id: impl Into<String>) -> Self {
        self.external_reference_id = Some(id.into());
        self
    }

    /// Set the redirect URLs used after payment
    pub fn with_redirect_urls(mut self, success: impl Into<String>, failure: impl Into<String>) -> Self {
        self.payment_success_url = Some(success.into());
        self.payment_failure_url = Some(failure.into());
        self
    }

    pub fn with_installments(mut self, installments: Vec<u32>) -> Self {
        self.enabled_installments = Some(installments);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Sum of `price * quantity` over the basket
    pub fn basket_total(&self) -> f64 {
        self.basket_items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum()
    }

    /// Convert to the loose JSON form
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
