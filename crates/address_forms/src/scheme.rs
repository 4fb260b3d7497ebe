//! Layout primitives of an address form.

use common_enums::AddressField;
use serde::Serialize;
use strum::IntoEnumIterator;

/// One visual row of an address form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", content = "fields", rename_all = "lowercase")]
pub enum AddressLayoutNode {
    /// A row holding a single field.
    Single(AddressField),
    /// A row holding two fields side by side.
    Paired(AddressField, AddressField),
}

impl AddressLayoutNode {
    /// Fields of this row, left to right.
    pub fn children(&self) -> Vec<AddressField> {
        match *self {
            Self::Single(field) => vec![field],
            Self::Paired(first, second) => vec![first, second],
        }
    }

    /// Whether `field` is rendered in this row.
    pub fn contains(&self, field: AddressField) -> bool {
        match *self {
            Self::Single(item) => item == field,
            Self::Paired(first, second) => first == field || second == field,
        }
    }
}

/// Ordered rows making up an address form. Fields absent from the scheme are not rendered.
pub type Scheme = Vec<AddressLayoutNode>;

/// Default scheme: one row per field in declaration order, without the country.
pub fn default_scheme() -> Scheme {
    AddressField::iter()
        .filter(|field| *field != AddressField::Country)
        .map(AddressLayoutNode::Single)
        .collect()
}

/// One single-field row per entry of `fields`.
pub fn single_rows(fields: &[AddressField]) -> Scheme {
    fields.iter().copied().map(AddressLayoutNode::Single).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_skips_country() {
        let scheme = default_scheme();

        assert_eq!(scheme.len(), 6);
        assert!(!scheme
            .iter()
            .any(|node| node.contains(AddressField::Country)));
        assert_eq!(
            scheme.first(),
            Some(&AddressLayoutNode::Single(AddressField::Street))
        );
    }

    #[test]
    fn paired_children_keep_visual_order() {
        let node = AddressLayoutNode::Paired(AddressField::StateOrProvince, AddressField::PostalCode);
        assert_eq!(
            node.children(),
            vec![AddressField::StateOrProvince, AddressField::PostalCode]
        );
    }
}
