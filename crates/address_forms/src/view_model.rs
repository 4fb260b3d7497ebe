//! The address form handed to the rendering layer.

use std::collections::{BTreeMap, BTreeSet};

use common_enums::{AddressField, LocalizationKey};
use common_utils::errors::{CustomResult, ValidationError};
use error_stack::report;
use serde::Serialize;

use crate::{address::PostalAddress, scheme::Scheme};

/// Everything needed to render an address form for one country.
///
/// Built by an [`AddressFormModelBuilder`](crate::AddressFormModelBuilder) and replaced as a whole
/// when the country changes. The scheme alone decides what is rendered: labels and placeholders
/// may exist for fields the scheme leaves out.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AddressFormModel {
    pub(crate) labels: BTreeMap<AddressField, LocalizationKey>,
    pub(crate) placeholders: BTreeMap<AddressField, LocalizationKey>,
    pub(crate) optional_fields: BTreeSet<AddressField>,
    pub(crate) scheme: Scheme,
}

impl AddressFormModel {
    pub fn labels(&self) -> &BTreeMap<AddressField, LocalizationKey> {
        &self.labels
    }

    pub fn placeholders(&self) -> &BTreeMap<AddressField, LocalizationKey> {
        &self.placeholders
    }

    pub fn optional_fields(&self) -> &BTreeSet<AddressField> {
        &self.optional_fields
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn label(&self, field: AddressField) -> Option<LocalizationKey> {
        self.labels.get(&field).copied()
    }

    pub fn placeholder(&self, field: AddressField) -> Option<LocalizationKey> {
        self.placeholders.get(&field).copied()
    }

    pub fn is_optional(&self, field: AddressField) -> bool {
        self.optional_fields.contains(&field)
    }

    /// Rendered fields in scheme order, paired rows flattened left to right.
    pub fn rendered_fields(&self) -> Vec<AddressField> {
        self.scheme
            .iter()
            .flat_map(|node| node.children())
            .collect()
    }

    /// Rendered, non-optional fields the shopper left empty.
    pub fn missing_required_fields(&self, address: &PostalAddress) -> Vec<AddressField> {
        self.rendered_fields()
            .into_iter()
            .filter(|field| !self.is_optional(*field) && !address.is_filled(*field))
            .collect()
    }

    /// Fails on the first rendered, non-optional field left empty.
    pub fn validate(&self, address: &PostalAddress) -> CustomResult<(), ValidationError> {
        match self.missing_required_fields(address).first() {
            Some(field) => Err(report!(ValidationError::MissingRequiredField {
                field_name: field.to_string(),
            })),
            None => Ok(()),
        }
    }
}
