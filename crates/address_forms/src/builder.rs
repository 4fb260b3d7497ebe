//! Country specific address form construction.

use std::collections::{BTreeMap, BTreeSet};

use checkout_env::logger;
use common_enums::{AddressField, LocalizationKey};

use crate::{
    scheme::{self, AddressLayoutNode},
    view_model::AddressFormModel,
};

/// Builds the address form for a country.
pub trait AddressFormModelBuilder: Send + Sync {
    /// Accepts any country code; codes without specific rules get the default form.
    fn build(&self, country_code: &str) -> AddressFormModel;
}

/// Builder with overrides for Brazil, Canada, the United Kingdom and the United States.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAddressFormModelBuilder;

impl AddressFormModelBuilder for DefaultAddressFormModelBuilder {
    fn build(&self, country_code: &str) -> AddressFormModel {
        let base = base_model();

        let model = match country_code {
            "BR" => AddressFormModel {
                labels: with_overrides(
                    &base.labels,
                    [(AddressField::StateOrProvince, LocalizationKey::StateFieldTitle)],
                ),
                placeholders: with_overrides(
                    &base.placeholders,
                    [(
                        AddressField::StateOrProvince,
                        LocalizationKey::SelectStateOrProvinceFieldPlaceholder,
                    )],
                ),
                ..base
            },
            "CA" => AddressFormModel {
                labels: with_overrides(
                    &base.labels,
                    [
                        (
                            AddressField::HouseNumberOrName,
                            LocalizationKey::ApartmentSuiteFieldTitle,
                        ),
                        (
                            AddressField::StateOrProvince,
                            LocalizationKey::ProvinceOrTerritoryFieldTitle,
                        ),
                        (AddressField::Street, LocalizationKey::AddressFieldTitle),
                    ],
                ),
                placeholders: with_overrides(
                    &base.placeholders,
                    [
                        (
                            AddressField::HouseNumberOrName,
                            LocalizationKey::ApartmentSuiteFieldPlaceholder,
                        ),
                        (
                            AddressField::StateOrProvince,
                            LocalizationKey::ProvinceOrTerritoryFieldPlaceholder,
                        ),
                        (AddressField::Street, LocalizationKey::AddressFieldPlaceholder),
                    ],
                ),
                optional_fields: BTreeSet::from([AddressField::HouseNumberOrName]),
                scheme: scheme::single_rows(&[
                    AddressField::Street,
                    AddressField::HouseNumberOrName,
                    AddressField::City,
                    AddressField::PostalCode,
                    AddressField::StateOrProvince,
                ]),
            },
            "GB" => AddressFormModel {
                labels: with_overrides(
                    &base.labels,
                    [(AddressField::City, LocalizationKey::CityTownFieldTitle)],
                ),
                placeholders: with_overrides(
                    &base.placeholders,
                    [(AddressField::City, LocalizationKey::CityTownFieldPlaceholder)],
                ),
                scheme: scheme::single_rows(&[
                    AddressField::HouseNumberOrName,
                    AddressField::Street,
                    AddressField::City,
                    AddressField::PostalCode,
                ]),
                ..base
            },
            "US" => AddressFormModel {
                labels: with_overrides(
                    &base.labels,
                    [
                        (AddressField::PostalCode, LocalizationKey::ZipCodeFieldTitle),
                        (
                            AddressField::HouseNumberOrName,
                            LocalizationKey::ApartmentSuiteFieldTitle,
                        ),
                        (AddressField::StateOrProvince, LocalizationKey::StateFieldTitle),
                        (AddressField::Street, LocalizationKey::AddressFieldTitle),
                    ],
                ),
                placeholders: with_overrides(
                    &base.placeholders,
                    [
                        (
                            AddressField::PostalCode,
                            LocalizationKey::ZipCodeFieldPlaceholder,
                        ),
                        (
                            AddressField::HouseNumberOrName,
                            LocalizationKey::ApartmentSuiteFieldPlaceholder,
                        ),
                        (
                            AddressField::StateOrProvince,
                            LocalizationKey::SelectStateFieldPlaceholder,
                        ),
                        (AddressField::Street, LocalizationKey::AddressFieldPlaceholder),
                    ],
                ),
                optional_fields: BTreeSet::from([AddressField::HouseNumberOrName]),
                scheme: vec![
                    AddressLayoutNode::Single(AddressField::Street),
                    AddressLayoutNode::Single(AddressField::HouseNumberOrName),
                    AddressLayoutNode::Single(AddressField::City),
                    AddressLayoutNode::Paired(
                        AddressField::StateOrProvince,
                        AddressField::PostalCode,
                    ),
                ],
            },
            _ => base,
        };

        logger::trace!(
            country_code,
            rendered_fields = ?model.rendered_fields(),
            "address form built"
        );
        model
    }
}

/// Address form for `country_code` from the [`DefaultAddressFormModelBuilder`].
pub fn resolve(country_code: &str) -> AddressFormModel {
    DefaultAddressFormModelBuilder.build(country_code)
}

fn base_model() -> AddressFormModel {
    AddressFormModel {
        labels: BTreeMap::from([
            (AddressField::City, LocalizationKey::CityFieldTitle),
            (
                AddressField::HouseNumberOrName,
                LocalizationKey::HouseNumberFieldTitle,
            ),
            (AddressField::Street, LocalizationKey::StreetFieldTitle),
            (
                AddressField::StateOrProvince,
                LocalizationKey::ProvinceOrTerritoryFieldTitle,
            ),
            (AddressField::PostalCode, LocalizationKey::PostalCodeFieldTitle),
            (
                AddressField::Apartment,
                LocalizationKey::ApartmentSuiteFieldTitle,
            ),
        ]),
        placeholders: BTreeMap::from([
            (AddressField::City, LocalizationKey::CityFieldPlaceholder),
            (
                AddressField::HouseNumberOrName,
                LocalizationKey::HouseNumberFieldPlaceholder,
            ),
            (AddressField::Street, LocalizationKey::StreetFieldPlaceholder),
            (
                AddressField::StateOrProvince,
                LocalizationKey::ProvinceOrTerritoryFieldPlaceholder,
            ),
            (
                AddressField::PostalCode,
                LocalizationKey::PostalCodeFieldPlaceholder,
            ),
            (
                AddressField::Apartment,
                LocalizationKey::ApartmentSuiteFieldPlaceholder,
            ),
        ]),
        optional_fields: BTreeSet::from([AddressField::Apartment]),
        scheme: scheme::default_scheme(),
    }
}

fn with_overrides<const N: usize>(
    base: &BTreeMap<AddressField, LocalizationKey>,
    overrides: [(AddressField, LocalizationKey); N],
) -> BTreeMap<AddressField, LocalizationKey> {
    let mut entries = base.clone();
    entries.extend(overrides);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brazil_relabels_state_only() {
        let base = resolve("NL");
        let brazil = resolve("BR");

        assert_eq!(brazil.scheme(), base.scheme());
        assert_eq!(brazil.optional_fields(), base.optional_fields());
        assert_eq!(
            brazil.label(AddressField::StateOrProvince),
            Some(LocalizationKey::StateFieldTitle)
        );
        assert_eq!(
            brazil.placeholder(AddressField::StateOrProvince),
            Some(LocalizationKey::SelectStateOrProvinceFieldPlaceholder)
        );
        assert_eq!(brazil.label(AddressField::City), base.label(AddressField::City));
    }

    #[test]
    fn base_model_has_no_country_entries() {
        let base = base_model();

        assert!(!base.labels().contains_key(&AddressField::Country));
        assert!(!base.placeholders().contains_key(&AddressField::Country));
        assert!(base.is_optional(AddressField::Apartment));
    }
}
