//! Address entered by the shopper.

use common_enums::AddressField;
use serde::{Deserialize, Serialize};

/// Postal address as submitted with a payment.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number_or_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl PostalAddress {
    /// Value entered for `field`, if any.
    pub fn value(&self, field: AddressField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Whether `field` holds something other than whitespace.
    pub fn is_filled(&self, field: AddressField) -> bool {
        self.value(field)
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Returns the address with `field` set to `value`.
    pub fn with(mut self, field: AddressField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    fn slot(&self, field: AddressField) -> &Option<String> {
        match field {
            AddressField::Street => &self.street,
            AddressField::HouseNumberOrName => &self.house_number_or_name,
            AddressField::Apartment => &self.apartment,
            AddressField::PostalCode => &self.postal_code,
            AddressField::City => &self.city,
            AddressField::StateOrProvince => &self.state_or_province,
            AddressField::Country => &self.country,
        }
    }

    fn slot_mut(&mut self, field: AddressField) -> &mut Option<String> {
        match field {
            AddressField::Street => &mut self.street,
            AddressField::HouseNumberOrName => &mut self.house_number_or_name,
            AddressField::Apartment => &mut self.apartment,
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::City => &mut self.city,
            AddressField::StateOrProvince => &mut self.state_or_province,
            AddressField::Country => &mut self.country,
        }
    }
}
