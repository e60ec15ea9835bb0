//! # Currency
//!
//! Currencies accepted by the Tapsilat order API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    TRY,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Every accepted currency, in the order error messages list them.
    pub const ALL: [Currency; 4] = [Currency::TRY, Currency::USD, Currency::EUR, Currency::GBP];

    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::TRY => "TRY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::TRY
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a currency code is not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedCurrency(pub String);

impl fmt::Display for UnsupportedCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported currency: {}", self.0)
    }
}

impl std::error::Error for UnsupportedCurrency {}

impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    /// Case-insensitive match on the currency code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnsupportedCurrency(s.to_string()))
    }
}
