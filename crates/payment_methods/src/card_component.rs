//! Card form: live brand detection, security code policy and submission.

use std::{
    str::FromStr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use address_forms::{AddressFormModel, PostalAddress};
use cards::{BinQuery, CardBrand, CardBrandProvider, CardExpiration, CardNumber, SecurityCodeItem};
use checkout_env::{logger, Tag};
use common_enums::{CardNetwork, PaymentMethodType};
use common_utils::{
    consts,
    observable::{Observable, SubscriptionId},
};
use error_stack::{report, ResultExt};
use masking::{PeekInterface, Secret};
use serde::{Serialize, Serializer};
use tokio::runtime::Handle;

use crate::{
    builder::{self, ComponentKind},
    configs::settings::{CardSettings, Settings},
    errors::{ComponentError, CustomResult, ValidationError},
    types::PaymentMethod,
};

/// Receives the payment data of a submitted component.
pub trait PaymentComponentDelegate: Send + Sync {
    fn did_submit(&self, data: PaymentComponentData, kind: ComponentKind);
}

/// Values entered in the card form.
#[derive(Clone, Debug, Default)]
pub struct CardInput {
    pub number: Secret<String>,
    /// `MM/YY` or `MM/YYYY`.
    pub expiry_date: String,
    pub security_code: Secret<String>,
    pub holder_name: Option<String>,
    pub billing_address: Option<PostalAddress>,
    pub store_payment_method: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[serde(rename = "type")]
    pub payment_method_type: PaymentMethodType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<CardNetwork>,
    pub number: CardNumber,
    pub expiry_month: String,
    pub expiry_year: String,
    #[serde(
        serialize_with = "serialize_optional_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub security_code: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
}

fn serialize_optional_secret<S: Serializer>(
    value: &Option<Secret<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(secret) => serializer.serialize_some(secret.peek()),
        None => serializer.serialize_none(),
    }
}

/// Payload handed to the [`PaymentComponentDelegate`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentComponentData {
    pub payment_method: CardDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<PostalAddress>,
    pub store_payment_method: bool,
}

#[derive(Debug, Default)]
struct LookupState {
    latest: AtomicU64,
    current_bin: Mutex<String>,
    apply: Mutex<()>,
}

/// Card or Bancontact form.
///
/// The shopper's input flows through [`Observable`] cells. Once
/// [`CardComponent::watch_card_number`] is called, every change of the first eight digits of
/// `card_number` starts a brand lookup whose result updates `detected_brands` and the security
/// code item. Only the most recent lookup is applied.
pub struct CardComponent {
    kind: ComponentKind,
    payment_method: PaymentMethod,
    card_settings: CardSettings,
    supported_brands: Vec<CardNetwork>,
    brand_provider: Arc<dyn CardBrandProvider>,
    lookups: Arc<LookupState>,
    pub card_number: Observable<String>,
    pub security_code: SecurityCodeItem,
    pub detected_brands: Observable<Vec<CardBrand>>,
    pub billing_address: Observable<AddressFormModel>,
}

impl std::fmt::Debug for CardComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardComponent")
            .field("kind", &self.kind)
            .field("supported_brands", &self.supported_brands)
            .field("detected_brands", &self.detected_brands)
            .finish_non_exhaustive()
    }
}

impl CardComponent {
    pub fn new(
        settings: &Settings,
        payment_method: PaymentMethod,
        brand_provider: Arc<dyn CardBrandProvider>,
    ) -> CustomResult<Self, ComponentError> {
        let kind = ComponentKind::of(&payment_method);
        let supported_brands = match kind {
            ComponentKind::Card => builder::supported_card_networks(settings, &payment_method),
            ComponentKind::Bancontact if payment_method.brands.is_empty() => {
                vec![CardNetwork::Bancontact]
            }
            ComponentKind::Bancontact => payment_method.brands.clone(),
            _ => {
                return Err(report!(ComponentError::NotACardPaymentMethod {
                    payment_method_type: payment_method.payment_method_type,
                }))
            }
        };

        Ok(Self {
            kind,
            card_settings: settings.card,
            supported_brands,
            brand_provider,
            lookups: Arc::default(),
            card_number: Observable::default(),
            security_code: SecurityCodeItem::new(),
            detected_brands: Observable::default(),
            billing_address: Observable::new(address_forms::resolve(
                &settings.merchant.country_code,
            )),
            payment_method,
        })
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn supported_brands(&self) -> &[CardNetwork] {
        &self.supported_brands
    }

    fn shows_security_code(&self) -> bool {
        self.kind != ComponentKind::Bancontact && self.card_settings.shows_security_code_field
    }

    /// Starts brand detection on `runtime` whenever the BIN of `card_number` changes.
    pub fn watch_card_number(&self, runtime: Handle) -> SubscriptionId {
        let lookups = Arc::clone(&self.lookups);
        let provider = Arc::clone(&self.brand_provider);
        let supported_brands = self.supported_brands.clone();
        let security_code = self.security_code.clone();
        let detected_brands = self.detected_brands.clone();

        self.card_number.subscribe(move |number: &String| {
            let bin: String = number
                .chars()
                .filter(char::is_ascii_digit)
                .take(consts::MAX_BIN_LENGTH)
                .collect();
            {
                let mut current_bin = lookups
                    .current_bin
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if *current_bin == bin {
                    return;
                }
                *current_bin = bin.clone();
            }
            let token = lookups.latest.fetch_add(1, Ordering::SeqCst) + 1;

            if bin.is_empty() {
                let _apply = lookups.apply.lock().unwrap_or_else(PoisonError::into_inner);
                security_code.update(&[]);
                detected_brands.set(Vec::new());
                return;
            }

            let query = BinQuery::new(bin, supported_brands.clone());
            let lookups = Arc::clone(&lookups);
            let provider = Arc::clone(&provider);
            let security_code = security_code.clone();
            let detected_brands = detected_brands.clone();

            runtime.spawn(async move {
                let brands = provider.request_card_brands(&query).await;

                let _apply = lookups.apply.lock().unwrap_or_else(PoisonError::into_inner);
                if lookups.latest.load(Ordering::SeqCst) != token {
                    logger::debug!(
                        tag = ?Tag::BinLookup,
                        bin = ?query.bin(),
                        token,
                        "dropping card brands of a superseded BIN"
                    );
                    return;
                }
                security_code.update(&brands);
                detected_brands.set(brands);
            });
        })
    }

    /// Replaces the billing address form with the one of `country_code`.
    pub fn update_billing_country(&self, country_code: &str) -> bool {
        self.billing_address
            .set(address_forms::resolve(country_code))
    }

    /// Validates `input` and hands the payment data to `delegate`.
    ///
    /// The delegate is not called when validation fails.
    pub fn submit(
        &self,
        input: &CardInput,
        delegate: &dyn PaymentComponentDelegate,
    ) -> CustomResult<(), ValidationError> {
        let data = self.validate(input).inspect_err(|error| {
            logger::info!(
                tag = ?Tag::Submission,
                kind = %self.kind,
                ?error,
                "card form rejected"
            );
        })?;

        logger::info!(
            tag = ?Tag::Submission,
            kind = %self.kind,
            brand = ?data.payment_method.brand,
            "card form submitted"
        );
        delegate.did_submit(data, self.kind);
        Ok(())
    }

    fn validate(&self, input: &CardInput) -> CustomResult<PaymentComponentData, ValidationError> {
        let number = CardNumber::from_str(input.number.peek()).change_context(
            ValidationError::IncorrectValueProvided {
                field_name: "card_number",
            },
        )?;

        let brands = self.detected_brands.get();
        if !brands.is_empty() && brands.iter().all(|brand| !brand.supported) {
            return Err(report!(ValidationError::IncorrectValueProvided {
                field_name: "card_number",
            }))
            .attach_printable("card brand is not supported");
        }

        let expiration = CardExpiration::from_str(&input.expiry_date).change_context(
            ValidationError::IncorrectValueProvided {
                field_name: "expiry_date",
            },
        )?;
        if expiration.is_expired()? {
            return Err(report!(ValidationError::IncorrectValueProvided {
                field_name: "expiry_date",
            }))
            .attach_printable("card is expired");
        }

        let security_code = if self.shows_security_code() {
            self.security_code.validate(input.security_code.peek())?;
            Some(input.security_code.clone()).filter(|code| !code.peek().is_empty())
        } else {
            None
        };

        let holder_name = if self.card_settings.shows_holder_name_field {
            match input.holder_name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Some(name.to_string()),
                _ => {
                    return Err(report!(ValidationError::MissingRequiredField {
                        field_name: "holder_name".to_string(),
                    }))
                }
            }
        } else {
            None
        };

        let billing_address = if self.card_settings.shows_billing_address {
            let address = input.billing_address.clone().unwrap_or_default();
            self.billing_address.get().validate(&address)?;
            Some(address)
        } else {
            None
        };

        Ok(PaymentComponentData {
            payment_method: CardDetails {
                payment_method_type: self.payment_method.payment_method_type,
                brand: brands
                    .iter()
                    .find(|brand| brand.supported)
                    .map(|brand| brand.brand),
                number,
                expiry_month: expiration.get_month().two_digits(),
                expiry_year: expiration.get_year().four_digits(),
                security_code,
                holder_name,
            },
            billing_address,
            store_payment_method: self.card_settings.shows_store_payment_method_field
                && input.store_payment_method,
        })
    }
}
