use std::path::PathBuf;

use checkout_env::{env, logger::config::Log};
use common_enums::CardNetwork;
use serde::Deserialize;

use crate::types::Payment;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: Log,
    pub merchant: Merchant,
    pub card: CardSettings,
    pub drop_in: DropInSettings,
    pub payment: Option<Payment>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Merchant {
    /// Country whose address form is shown for the billing address.
    pub country_code: String,
    /// Card networks the merchant accepts, in order of preference.
    pub supported_card_networks: Vec<CardNetwork>,
}

impl Default for Merchant {
    fn default() -> Self {
        Self {
            country_code: String::new(),
            supported_card_networks: CardNetwork::known().collect(),
        }
    }
}

/// Fields shown by the card form.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct CardSettings {
    pub shows_holder_name_field: bool,
    pub shows_security_code_field: bool,
    pub shows_billing_address: bool,
    pub shows_store_payment_method_field: bool,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            shows_holder_name_field: false,
            shows_security_code_field: true,
            shows_billing_address: false,
            shows_store_payment_method_field: true,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DropInSettings {
    pub partial_payment_enabled: bool,
    pub wechat_pay_sdk_available: bool,
    /// Apple Pay is only offered when this is set.
    pub apple_pay: Option<ApplePaySettings>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ApplePaySettings {
    pub merchant_identifier: String,
}

impl Settings {
    /// Loads the settings of the current environment.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let config_path = explicit_config_path.unwrap_or_else(env::config_path);

        let config = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(env::ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("merchant.supported_card_networks"),
            )
            .build()?;

        #[allow(clippy::print_stderr)]
        let settings: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.merchant.supported_card_networks.is_empty() {
            return Err(config::ConfigError::Message(
                "merchant.supported_card_networks must not be empty".into(),
            ));
        }

        match &self.drop_in.apple_pay {
            Some(apple_pay) if apple_pay.merchant_identifier.trim().is_empty() => {
                Err(config::ConfigError::Message(
                    "drop_in.apple_pay.merchant_identifier must not be empty".into(),
                ))
            }
            _ => Ok(()),
        }
    }
}
