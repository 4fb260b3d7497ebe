//! Security code (CVC) field policy derived from the resolved card brands.

use checkout_env::{logger, Tag};
use common_enums::{CardNetwork, LocalizationKey};
use common_utils::{
    errors::{CustomResult, ValidationError},
    observable::Observable,
    validation::Validator,
};
use error_stack::report;

use crate::brand::CardBrand;

/// Digits-only security code check for a card network.
///
/// American Express takes four digits and every other listed network three. Without a network,
/// or for one reported as unknown, both lengths are accepted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SecurityCodeValidator {
    pub card_network: Option<CardNetwork>,
}

impl SecurityCodeValidator {
    pub fn new(card_network: Option<CardNetwork>) -> Self {
        Self { card_network }
    }

    fn accepted_lengths(&self) -> std::ops::RangeInclusive<usize> {
        match self.card_network {
            Some(CardNetwork::AmericanExpress) => 4..=4,
            Some(CardNetwork::Unknown) | None => 3..=4,
            Some(_) => 3..=3,
        }
    }
}

impl Validator for SecurityCodeValidator {
    fn is_valid(&self, value: &str) -> bool {
        self.accepted_lengths().contains(&value.len())
            && value.chars().all(|character| character.is_ascii_digit())
    }

    fn maximum_length(&self, _value: &str) -> usize {
        *self.accepted_lengths().end()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SecurityCodeTitle {
    #[default]
    Default,
    Optional,
}

impl SecurityCodeTitle {
    pub fn localization_key(self) -> LocalizationKey {
        match self {
            Self::Default => LocalizationKey::CardCvcTitle,
            Self::Optional => LocalizationKey::CardCvcTitleOptional,
        }
    }
}

/// How the security code field behaves for a brand list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SecurityCodePolicy {
    pub is_optional: bool,
    /// `None` when any input, including an empty one, is accepted.
    pub active_validator: Option<SecurityCodeValidator>,
    pub title: SecurityCodeTitle,
}

/// Derives the security code policy for the brands detected for the current card number.
///
/// The field is optional only when at least one brand was detected and none of them requires a
/// security code. The standard validator is bound to the first brand's network.
pub fn derive_policy(brands: &[CardBrand]) -> SecurityCodePolicy {
    let is_optional =
        !brands.is_empty() && brands.iter().all(|brand| brand.cvc_policy.is_skippable());

    if is_optional {
        SecurityCodePolicy {
            is_optional,
            active_validator: None,
            title: SecurityCodeTitle::Optional,
        }
    } else {
        SecurityCodePolicy {
            is_optional,
            active_validator: Some(SecurityCodeValidator::new(
                brands.first().map(|brand| brand.brand),
            )),
            title: SecurityCodeTitle::Default,
        }
    }
}

/// Form item holding the security code policy currently in force.
///
/// Every brand update replaces the previous policy entirely.
#[derive(Clone, Debug, Default)]
pub struct SecurityCodeItem {
    pub title: Observable<SecurityCodeTitle>,
    pub is_optional: Observable<bool>,
    pub selected_network: Observable<Option<CardNetwork>>,
}

impl SecurityCodeItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the policy derived from `brands` and returns it.
    ///
    /// The selected network follows the first detected brand whether or not the code is optional.
    pub fn update(&self, brands: &[CardBrand]) -> SecurityCodePolicy {
        let policy = derive_policy(brands);

        self.selected_network
            .set(brands.first().map(|brand| brand.brand));
        self.title.set(policy.title);
        if self.is_optional.set(policy.is_optional) {
            logger::debug!(
                tag = ?Tag::SecurityCodePolicy,
                is_optional = policy.is_optional,
                "security code policy changed"
            );
        }
        policy
    }

    pub fn active_validator(&self) -> Option<SecurityCodeValidator> {
        (!self.is_optional.get()).then(|| SecurityCodeValidator::new(self.selected_network.get()))
    }

    /// Keeps the digits of `raw` up to the length allowed for the selected network.
    pub fn format(&self, raw: &str) -> String {
        let maximum_length =
            SecurityCodeValidator::new(self.selected_network.get()).maximum_length(raw);
        raw.chars()
            .filter(char::is_ascii_digit)
            .take(maximum_length)
            .collect()
    }

    pub fn validate(&self, value: &str) -> CustomResult<(), ValidationError> {
        match self.active_validator() {
            Some(validator) if !validator.is_valid(value) => {
                Err(report!(ValidationError::IncorrectValueProvided {
                    field_name: "security_code",
                }))
            }
            _ => Ok(()),
        }
    }
}
