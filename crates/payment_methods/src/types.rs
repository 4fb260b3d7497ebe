//! Payment methods response and payment context.

use common_enums::{CardNetwork, PaymentMethodType};
use serde::{Deserialize, Serialize};

/// Amount in minor units.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Amount {
    pub value: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Amount and country of the payment being made.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payment {
    pub amount: Amount,
    #[serde(alias = "countryCode")]
    pub country_code: String,
}

/// A partially paid order.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub psp_reference: String,
    pub order_data: String,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub remaining_amount: Option<Amount>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issuer {
    #[serde(rename = "id")]
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Details of a payment method the shopper stored earlier.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDetails {
    #[serde(rename = "id")]
    pub identifier: String,
    #[serde(default)]
    pub brand: Option<CardNetwork>,
    #[serde(default)]
    pub last_four: Option<String>,
    #[serde(default)]
    pub expiry_month: Option<String>,
    #[serde(default)]
    pub expiry_year: Option<String>,
    #[serde(default)]
    pub holder_name: Option<String>,
}

/// One entry of the payment methods response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub payment_method_type: PaymentMethodType,
    pub name: String,
    /// Brands accepted for a card payment method.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brands: Vec<CardNetwork>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issuers: Vec<Issuer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored: Option<StoredDetails>,
}

impl PaymentMethod {
    pub fn new(payment_method_type: PaymentMethodType, name: impl Into<String>) -> Self {
        Self {
            payment_method_type,
            name: name.into(),
            brands: Vec::new(),
            issuers: Vec::new(),
            stored: None,
        }
    }

    pub fn is_stored(&self) -> bool {
        self.stored.is_some()
    }
}
