//! Card brands and BIN queries.

use std::fmt;

use common_enums::{CardNetwork, CvcPolicy};
use masking::{PeekInterface, Secret, Strategy, WithType};
use serde::{Deserialize, Serialize};

/// A card brand resolved for a BIN, with the policies the form applies for it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBrand {
    /// Brand identifier.
    pub brand: CardNetwork,
    #[serde(default)]
    pub cvc_policy: CvcPolicy,
    #[serde(default = "enabled")]
    pub enable_luhn_check: bool,
    /// Whether the merchant accepts this brand.
    #[serde(default = "enabled")]
    pub supported: bool,
}

fn enabled() -> bool {
    true
}

impl CardBrand {
    pub fn new(brand: CardNetwork, cvc_policy: CvcPolicy) -> Self {
        Self {
            brand,
            cvc_policy,
            enable_luhn_check: true,
            supported: true,
        }
    }
}

/// Shows the first six digits of a BIN and masks the rest.
pub enum BinStrategy {}

impl<T> Strategy<T> for BinStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();

        match val_str.get(..6) {
            Some(prefix) => write!(f, "{}{}", prefix, "*".repeat(val_str.len() - 6)),
            None if val_str.chars().all(|c| c.is_ascii_digit()) => f.write_str(val_str),
            None => WithType::fmt(val, f),
        }
    }
}

/// Leading card number digits typed so far and the brands the merchant accepts.
///
/// A new query supersedes any earlier one for the same card number field.
#[derive(Clone, Debug)]
pub struct BinQuery {
    bin: Secret<String, BinStrategy>,
    supported_brands: Vec<CardNetwork>,
}

impl BinQuery {
    pub fn new(bin: impl Into<String>, supported_brands: Vec<CardNetwork>) -> Self {
        Self {
            bin: Secret::new(bin.into()),
            supported_brands,
        }
    }

    pub fn bin(&self) -> &Secret<String, BinStrategy> {
        &self.bin
    }

    /// Number of characters in the BIN.
    pub fn bin_length(&self) -> usize {
        self.bin.peek().chars().count()
    }

    /// Accepted brands, in the merchant's order of preference.
    pub fn supported_brands(&self) -> &[CardNetwork] {
        &self.supported_brands
    }
}
