//! Payment component construction.
//!
//! Every payment method maps to a [`ComponentKind`], and every kind to one builder function.
//! A builder returns `None` when the method can not be offered with the current settings.

use address_forms::AddressFormModel;
use checkout_env::{logger, Tag};
use common_enums::{CardNetwork, LocalizationKey, PaymentMethodType};
use common_utils::{
    consts,
    validation::{self, NumericStringValidator, PhoneNumberValidator, Validator},
};
use serde::Serialize;

use crate::{
    configs::settings::Settings,
    types::{Issuer, Order, Payment, PaymentMethod},
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, strum::Display, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComponentKind {
    Card,
    StoredCard,
    Bancontact,
    StoredBancontact,
    Stored,
    IssuerList,
    SepaDirectDebit,
    BacsDirectDebit,
    AchDirectDebit,
    ApplePay,
    WeChatPay,
    QiwiWallet,
    MbWay,
    Blik,
    Econtext,
    Doku,
    GiftCard,
    Boleto,
    Affirm,
    Atome,
    Instant,
}

type ComponentBuilder = fn(&ComponentContext<'_>, &PaymentMethod) -> Option<PaymentComponent>;

impl ComponentKind {
    pub fn of(payment_method: &PaymentMethod) -> Self {
        match (payment_method.payment_method_type, payment_method.is_stored()) {
            (PaymentMethodType::Card, true) => Self::StoredCard,
            (PaymentMethodType::Bancontact, true) => Self::StoredBancontact,
            (_, true) => Self::Stored,
            (PaymentMethodType::Card, false) => Self::Card,
            (PaymentMethodType::Bancontact, false) => Self::Bancontact,
            (payment_method_type, false) if payment_method_type.is_issuer_list() => {
                Self::IssuerList
            }
            (PaymentMethodType::SepaDirectDebit, false) => Self::SepaDirectDebit,
            (PaymentMethodType::BacsDirectDebit, false) => Self::BacsDirectDebit,
            (PaymentMethodType::AchDirectDebit, false) => Self::AchDirectDebit,
            (PaymentMethodType::ApplePay, false) => Self::ApplePay,
            (PaymentMethodType::WeChatPaySdk, false) => Self::WeChatPay,
            (PaymentMethodType::QiwiWallet, false) => Self::QiwiWallet,
            (PaymentMethodType::MbWay, false) => Self::MbWay,
            (PaymentMethodType::Blik, false) => Self::Blik,
            (PaymentMethodType::Econtext, false) => Self::Econtext,
            (PaymentMethodType::Doku, false) => Self::Doku,
            (PaymentMethodType::GiftCard, false) => Self::GiftCard,
            (PaymentMethodType::Boleto, false) => Self::Boleto,
            (PaymentMethodType::Affirm, false) => Self::Affirm,
            (PaymentMethodType::Atome, false) => Self::Atome,
            (_, false) => Self::Instant,
        }
    }

    fn builder(self) -> ComponentBuilder {
        match self {
            Self::Card => build_card,
            Self::StoredCard => build_stored_card,
            Self::Bancontact => build_bancontact,
            Self::StoredBancontact | Self::Stored => build_stored,
            Self::IssuerList => build_issuer_list,
            Self::SepaDirectDebit => build_sepa_direct_debit,
            Self::BacsDirectDebit => build_bacs_direct_debit,
            Self::AchDirectDebit => build_ach_direct_debit,
            Self::ApplePay => build_apple_pay,
            Self::WeChatPay => build_wechat_pay,
            Self::QiwiWallet | Self::MbWay => build_phone_number,
            Self::Blik => build_blik,
            Self::Econtext | Self::Doku | Self::Atome => build_personal_information,
            Self::GiftCard => build_gift_card,
            Self::Boleto => build_boleto,
            Self::Affirm => build_affirm,
            Self::Instant => build_instant,
        }
    }
}

/// Settings and payment state the components are built for.
#[derive(Clone, Copy, Debug)]
pub struct ComponentContext<'a> {
    pub settings: &'a Settings,
    pub order: Option<&'a Order>,
}

impl<'a> ComponentContext<'a> {
    pub fn new(settings: &'a Settings, order: Option<&'a Order>) -> Self {
        Self { settings, order }
    }

    /// Configured payment, with the order's remaining amount while an order is being paid.
    pub fn payment(&self) -> Option<Payment> {
        let payment = self.settings.payment.as_ref()?;
        match self.order.and_then(|order| order.remaining_amount.as_ref()) {
            Some(remaining_amount) => Some(Payment {
                amount: remaining_amount.clone(),
                country_code: payment.country_code.clone(),
            }),
            None => Some(payment.clone()),
        }
    }
}

/// Input check attached to a text item.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextValidation {
    PhoneNumber,
    Email,
    Digits {
        minimum_length: usize,
        maximum_length: usize,
    },
}

impl TextValidation {
    pub fn is_valid(&self, value: &str) -> bool {
        match *self {
            Self::PhoneNumber => PhoneNumberValidator::new().is_valid(value),
            Self::Email => validation::validate_email(value).is_ok(),
            Self::Digits {
                minimum_length,
                maximum_length,
            } => NumericStringValidator::ranged(minimum_length, maximum_length).is_valid(value),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressPurpose {
    Billing,
    Delivery,
}

/// One item of a payment form, in display order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum FormItem {
    CardNumber {
        supported_brands: Vec<CardNetwork>,
    },
    ExpiryDate,
    SecurityCode,
    HolderName,
    StorePaymentMethod,
    Address {
        purpose: AddressPurpose,
        model: AddressFormModel,
    },
    IssuerList {
        issuers: Vec<Issuer>,
    },
    Text {
        title: LocalizationKey,
        validation: Option<TextValidation>,
    },
    Consent {
        title: LocalizationKey,
    },
}

impl FormItem {
    fn text(title: LocalizationKey) -> Self {
        Self::Text {
            title,
            validation: None,
        }
    }

    fn validated_text(title: LocalizationKey, validation: TextValidation) -> Self {
        Self::Text {
            title,
            validation: Some(validation),
        }
    }

    fn digits(title: LocalizationKey, minimum_length: usize, maximum_length: usize) -> Self {
        Self::validated_text(
            title,
            TextValidation::Digits {
                minimum_length,
                maximum_length,
            },
        )
    }

    fn address(purpose: AddressPurpose, country_code: &str) -> Self {
        Self::Address {
            purpose,
            model: address_forms::resolve(country_code),
        }
    }
}

/// A payment method ready to be rendered.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentComponent {
    pub kind: ComponentKind,
    pub payment_method: PaymentMethod,
    pub payment: Option<Payment>,
    /// Empty for methods that are paid without a form.
    pub items: Vec<FormItem>,
}

impl PaymentComponent {
    fn new(
        kind: ComponentKind,
        payment_method: &PaymentMethod,
        payment: Option<Payment>,
        items: Vec<FormItem>,
    ) -> Self {
        Self {
            kind,
            payment_method: payment_method.clone(),
            payment,
            items,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.items.is_empty()
    }
}

/// Builds the component for `payment_method`, or `None` when it can not be offered.
pub fn build_component(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    let kind = ComponentKind::of(payment_method);
    let component = (kind.builder())(context, payment_method);

    match &component {
        Some(component) => logger::debug!(
            tag = ?Tag::ComponentBuild,
            payment_method_type = %payment_method.payment_method_type,
            kind = %component.kind,
            items = component.items.len(),
            "payment component built"
        ),
        None => logger::info!(
            tag = ?Tag::ComponentBuild,
            payment_method_type = %payment_method.payment_method_type,
            %kind,
            "payment method skipped"
        ),
    }
    component
}

/// Builds the components of every method that can be offered, keeping the response order.
pub fn build_components(
    context: &ComponentContext<'_>,
    payment_methods: &[PaymentMethod],
) -> Vec<PaymentComponent> {
    payment_methods
        .iter()
        .filter_map(|payment_method| build_component(context, payment_method))
        .collect()
}

/// Networks offered in the card form: the method's brands, or the merchant's when it lists none.
pub(crate) fn supported_card_networks(
    settings: &Settings,
    payment_method: &PaymentMethod,
) -> Vec<CardNetwork> {
    if payment_method.brands.is_empty() {
        settings.merchant.supported_card_networks.clone()
    } else {
        payment_method.brands.clone()
    }
}

fn card_items(
    settings: &Settings,
    supported_brands: Vec<CardNetwork>,
    shows_security_code: bool,
) -> Vec<FormItem> {
    let card = &settings.card;
    let mut items = vec![
        FormItem::CardNumber { supported_brands },
        FormItem::ExpiryDate,
    ];
    if shows_security_code && card.shows_security_code_field {
        items.push(FormItem::SecurityCode);
    }
    if card.shows_holder_name_field {
        items.push(FormItem::HolderName);
    }
    if card.shows_billing_address {
        items.push(FormItem::address(
            AddressPurpose::Billing,
            &settings.merchant.country_code,
        ));
    }
    if card.shows_store_payment_method_field {
        items.push(FormItem::StorePaymentMethod);
    }
    items
}

fn personal_information_items() -> Vec<FormItem> {
    vec![
        FormItem::text(LocalizationKey::FirstNameTitle),
        FormItem::text(LocalizationKey::LastNameTitle),
        FormItem::validated_text(LocalizationKey::EmailTitle, TextValidation::Email),
        FormItem::validated_text(LocalizationKey::PhoneNumberTitle, TextValidation::PhoneNumber),
    ]
}

fn build_card(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    let items = card_items(
        context.settings,
        supported_card_networks(context.settings, payment_method),
        true,
    );
    Some(PaymentComponent::new(
        ComponentKind::Card,
        payment_method,
        context.payment(),
        items,
    ))
}

fn build_bancontact(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    let supported_brands = if payment_method.brands.is_empty() {
        vec![CardNetwork::Bancontact]
    } else {
        payment_method.brands.clone()
    };
    Some(PaymentComponent::new(
        ComponentKind::Bancontact,
        payment_method,
        context.payment(),
        card_items(context.settings, supported_brands, false),
    ))
}

fn build_stored_card(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    let items = if context.settings.card.shows_security_code_field {
        vec![FormItem::SecurityCode]
    } else {
        Vec::new()
    };
    Some(PaymentComponent::new(
        ComponentKind::StoredCard,
        payment_method,
        context.payment(),
        items,
    ))
}

fn build_stored(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::of(payment_method),
        payment_method,
        context.payment(),
        Vec::new(),
    ))
}

fn build_issuer_list(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    if payment_method.issuers.is_empty() {
        return build_instant(context, payment_method);
    }

    Some(PaymentComponent::new(
        ComponentKind::IssuerList,
        payment_method,
        None,
        vec![FormItem::IssuerList {
            issuers: payment_method.issuers.clone(),
        }],
    ))
}

fn build_sepa_direct_debit(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::SepaDirectDebit,
        payment_method,
        context.payment(),
        vec![
            FormItem::text(LocalizationKey::AccountHolderNameTitle),
            FormItem::text(LocalizationKey::IbanTitle),
        ],
    ))
}

fn build_bacs_direct_debit(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::BacsDirectDebit,
        payment_method,
        context.payment(),
        vec![
            FormItem::text(LocalizationKey::AccountHolderNameTitle),
            FormItem::digits(LocalizationKey::BankAccountNumberTitle, 8, 8),
            FormItem::digits(LocalizationKey::SortCodeTitle, 6, 6),
            FormItem::validated_text(LocalizationKey::EmailTitle, TextValidation::Email),
            FormItem::Consent {
                title: LocalizationKey::BacsAmountConsent,
            },
            FormItem::Consent {
                title: LocalizationKey::BacsAccountConsent,
            },
        ],
    ))
}

fn build_ach_direct_debit(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::AchDirectDebit,
        payment_method,
        context.payment(),
        vec![
            FormItem::text(LocalizationKey::AccountHolderNameTitle),
            FormItem::digits(LocalizationKey::BankAccountNumberTitle, 4, 17),
            FormItem::digits(LocalizationKey::RoutingNumberTitle, 9, 9),
            FormItem::address(AddressPurpose::Billing, "US"),
        ],
    ))
}

fn build_apple_pay(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    if context.settings.drop_in.apple_pay.is_none() {
        logger::warn!(
            tag = ?Tag::ComponentBuild,
            "Apple Pay is not offered because its settings are missing"
        );
        return None;
    }

    Some(PaymentComponent::new(
        ComponentKind::ApplePay,
        payment_method,
        context.payment(),
        Vec::new(),
    ))
}

fn build_wechat_pay(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    context
        .settings
        .drop_in
        .wechat_pay_sdk_available
        .then(|| {
            PaymentComponent::new(
                ComponentKind::WeChatPay,
                payment_method,
                context.payment(),
                Vec::new(),
            )
        })
}

fn build_phone_number(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::of(payment_method),
        payment_method,
        context.payment(),
        vec![FormItem::validated_text(
            LocalizationKey::PhoneNumberTitle,
            TextValidation::PhoneNumber,
        )],
    ))
}

fn build_blik(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::Blik,
        payment_method,
        context.payment(),
        vec![FormItem::digits(
            LocalizationKey::BlikCodeTitle,
            consts::BLIK_CODE_LENGTH,
            consts::BLIK_CODE_LENGTH,
        )],
    ))
}

fn build_personal_information(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::of(payment_method),
        payment_method,
        context.payment(),
        personal_information_items(),
    ))
}

fn build_gift_card(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    context.settings.payment.as_ref()?;
    if !context.settings.drop_in.partial_payment_enabled {
        return None;
    }

    Some(PaymentComponent::new(
        ComponentKind::GiftCard,
        payment_method,
        context.settings.payment.clone(),
        vec![
            FormItem::digits(LocalizationKey::GiftCardNumberTitle, 15, 32),
            FormItem::digits(LocalizationKey::GiftCardPinTitle, 3, 10),
        ],
    ))
}

fn build_boleto(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::Boleto,
        payment_method,
        context.payment(),
        vec![
            FormItem::text(LocalizationKey::FirstNameTitle),
            FormItem::text(LocalizationKey::LastNameTitle),
            FormItem::digits(LocalizationKey::SocialSecurityNumberTitle, 11, 14),
            FormItem::address(AddressPurpose::Billing, "BR"),
            FormItem::validated_text(LocalizationKey::EmailTitle, TextValidation::Email),
        ],
    ))
}

fn build_affirm(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    let country_code = context
        .payment()
        .map(|payment| payment.country_code)
        .unwrap_or_else(|| context.settings.merchant.country_code.clone());

    let mut items = personal_information_items();
    items.push(FormItem::address(AddressPurpose::Billing, &country_code));
    items.push(FormItem::address(AddressPurpose::Delivery, &country_code));

    Some(PaymentComponent::new(
        ComponentKind::Affirm,
        payment_method,
        context.payment(),
        items,
    ))
}

fn build_instant(
    context: &ComponentContext<'_>,
    payment_method: &PaymentMethod,
) -> Option<PaymentComponent> {
    Some(PaymentComponent::new(
        ComponentKind::Instant,
        payment_method,
        context.payment(),
        Vec::new(),
    ))
}
