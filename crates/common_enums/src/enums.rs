use serde::{Deserialize, Serialize};

/// Indicates the card network.
///
/// The serialized form is the brand identifier used on the wire by the BIN lookup service and in
/// the payment methods response (`visa`, `mc`, `amex`, ...). Identifiers without a variant of
/// their own deserialize to [`CardNetwork::Unknown`].
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum CardNetwork {
    #[serde(rename = "visa", alias = "VISA")]
    #[strum(serialize = "visa")]
    Visa,
    #[serde(rename = "mc", alias = "mastercard", alias = "MASTERCARD")]
    #[strum(to_string = "mc", serialize = "mastercard")]
    Mastercard,
    #[serde(rename = "amex", alias = "AMEX", alias = "AMERICANEXPRESS")]
    #[strum(serialize = "amex")]
    AmericanExpress,
    #[serde(rename = "jcb", alias = "JCB")]
    #[strum(serialize = "jcb")]
    Jcb,
    #[serde(rename = "diners", alias = "DINERSCLUB")]
    #[strum(serialize = "diners")]
    DinersClub,
    #[serde(rename = "discover", alias = "DISCOVER")]
    #[strum(serialize = "discover")]
    Discover,
    #[serde(rename = "cup", alias = "unionpay", alias = "UNIONPAY")]
    #[strum(to_string = "cup", serialize = "unionpay")]
    UnionPay,
    #[serde(rename = "maestro", alias = "MAESTRO")]
    #[strum(serialize = "maestro")]
    Maestro,
    #[serde(rename = "cartebancaire", alias = "CARTESBANCAIRES")]
    #[strum(serialize = "cartebancaire")]
    CartesBancaires,
    #[serde(rename = "bcmc", alias = "BANCONTACT")]
    #[strum(serialize = "bcmc")]
    Bancontact,
    #[serde(other)]
    #[strum(serialize = "unknown")]
    Unknown,
}

impl CardNetwork {
    /// Networks with their own identifier, in declaration order.
    pub fn known() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter().filter(|network| *network != Self::Unknown)
    }
}

/// Whether a card brand expects the shopper to enter a card security code.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CvcPolicy {
    #[default]
    Required,
    Optional,
    Hidden,
    /// A policy this client does not know. Treated like [`CvcPolicy::Required`].
    #[serde(other)]
    Unknown,
}

impl CvcPolicy {
    /// `true` when the shopper may leave the security code empty.
    pub fn is_skippable(self) -> bool {
        matches!(self, Self::Optional | Self::Hidden)
    }
}

/// Fields an address form can be made of.
///
/// Declaration order is the order of the default address scheme.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AddressField {
    Street,
    HouseNumberOrName,
    Apartment,
    PostalCode,
    City,
    StateOrProvince,
    Country,
}

impl AddressField {
    /// Autofill token a text input for this field should advertise.
    pub fn autocomplete_hint(self) -> Option<&'static str> {
        match self {
            Self::Street => Some("address-line1"),
            Self::HouseNumberOrName => Some("address-line2"),
            Self::Apartment => None,
            Self::PostalCode => Some("postal-code"),
            Self::City => Some("address-level2"),
            Self::StateOrProvince => Some("address-level1"),
            Self::Country => Some("country-name"),
        }
    }
}

/// Payment method types as returned by the payment methods endpoint.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize, strum::Display)]
pub enum PaymentMethodType {
    #[serde(rename = "scheme")]
    #[strum(serialize = "scheme")]
    Card,
    #[serde(rename = "bcmc")]
    #[strum(serialize = "bcmc")]
    Bancontact,
    #[serde(rename = "ideal")]
    #[strum(serialize = "ideal")]
    Ideal,
    #[serde(rename = "eps")]
    #[strum(serialize = "eps")]
    Eps,
    #[serde(rename = "dotpay")]
    #[strum(serialize = "dotpay")]
    Dotpay,
    #[serde(rename = "entercash")]
    #[strum(serialize = "entercash")]
    Entercash,
    #[serde(rename = "openbanking_UK")]
    #[strum(serialize = "openbanking_UK")]
    OpenBankingUk,
    #[serde(rename = "sepadirectdebit")]
    #[strum(serialize = "sepadirectdebit")]
    SepaDirectDebit,
    #[serde(rename = "directdebit_GB")]
    #[strum(serialize = "directdebit_GB")]
    BacsDirectDebit,
    #[serde(rename = "ach")]
    #[strum(serialize = "ach")]
    AchDirectDebit,
    #[serde(rename = "applepay")]
    #[strum(serialize = "applepay")]
    ApplePay,
    #[serde(rename = "wechatpaySDK")]
    #[strum(serialize = "wechatpaySDK")]
    WeChatPaySdk,
    #[serde(rename = "qiwiwallet")]
    #[strum(serialize = "qiwiwallet")]
    QiwiWallet,
    #[serde(rename = "mbway")]
    #[strum(serialize = "mbway")]
    MbWay,
    #[serde(rename = "blik")]
    #[strum(serialize = "blik")]
    Blik,
    #[serde(
        rename = "econtext_seven_eleven",
        alias = "econtext_atm",
        alias = "econtext_stores",
        alias = "econtext_online"
    )]
    #[strum(serialize = "econtext")]
    Econtext,
    #[serde(
        rename = "doku_alfamart",
        alias = "doku_permata_lite_atm",
        alias = "doku_indomaret",
        alias = "doku_bca_va",
        alias = "doku_bni_va",
        alias = "doku_bri_va",
        alias = "doku_cimb_va",
        alias = "doku_danamon_va",
        alias = "doku_mandiri_va",
        alias = "doku_sinarmas_va"
    )]
    #[strum(serialize = "doku")]
    Doku,
    #[serde(rename = "giftcard")]
    #[strum(serialize = "giftcard")]
    GiftCard,
    #[serde(rename = "boletobancario", alias = "boletobancario_santander")]
    #[strum(serialize = "boletobancario")]
    Boleto,
    #[serde(rename = "affirm")]
    #[strum(serialize = "affirm")]
    Affirm,
    #[serde(rename = "atome")]
    #[strum(serialize = "atome")]
    Atome,
    /// Any type without a dedicated form. Rendered as an instant (redirect) payment.
    #[serde(other)]
    #[strum(serialize = "other")]
    Other,
}

impl PaymentMethodType {
    /// Types that present a list of issuers to pick from.
    pub fn is_issuer_list(self) -> bool {
        matches!(
            self,
            Self::Ideal | Self::Eps | Self::Dotpay | Self::Entercash | Self::OpenBankingUk
        )
    }
}

/// Keys resolved to shopper-facing strings by the host application's localization layer.
///
/// Serialized as the key string itself.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display, strum::AsRefStr)]
pub enum LocalizationKey {
    #[strum(serialize = "checkout.address.street.title")]
    StreetFieldTitle,
    #[strum(serialize = "checkout.address.street.placeholder")]
    StreetFieldPlaceholder,
    #[strum(serialize = "checkout.address.address.title")]
    AddressFieldTitle,
    #[strum(serialize = "checkout.address.address.placeholder")]
    AddressFieldPlaceholder,
    #[strum(serialize = "checkout.address.houseNumber.title")]
    HouseNumberFieldTitle,
    #[strum(serialize = "checkout.address.houseNumber.placeholder")]
    HouseNumberFieldPlaceholder,
    #[strum(serialize = "checkout.address.apartmentSuite.title")]
    ApartmentSuiteFieldTitle,
    #[strum(serialize = "checkout.address.apartmentSuite.placeholder")]
    ApartmentSuiteFieldPlaceholder,
    #[strum(serialize = "checkout.address.postalCode.title")]
    PostalCodeFieldTitle,
    #[strum(serialize = "checkout.address.postalCode.placeholder")]
    PostalCodeFieldPlaceholder,
    #[strum(serialize = "checkout.address.zipCode.title")]
    ZipCodeFieldTitle,
    #[strum(serialize = "checkout.address.zipCode.placeholder")]
    ZipCodeFieldPlaceholder,
    #[strum(serialize = "checkout.address.city.title")]
    CityFieldTitle,
    #[strum(serialize = "checkout.address.city.placeholder")]
    CityFieldPlaceholder,
    #[strum(serialize = "checkout.address.cityTown.title")]
    CityTownFieldTitle,
    #[strum(serialize = "checkout.address.cityTown.placeholder")]
    CityTownFieldPlaceholder,
    #[strum(serialize = "checkout.address.provinceOrTerritory.title")]
    ProvinceOrTerritoryFieldTitle,
    #[strum(serialize = "checkout.address.provinceOrTerritory.placeholder")]
    ProvinceOrTerritoryFieldPlaceholder,
    #[strum(serialize = "checkout.address.state.title")]
    StateFieldTitle,
    #[strum(serialize = "checkout.address.selectStateOrProvince.placeholder")]
    SelectStateOrProvinceFieldPlaceholder,
    #[strum(serialize = "checkout.address.selectState.placeholder")]
    SelectStateFieldPlaceholder,
    #[strum(serialize = "checkout.address.country.title")]
    CountryFieldTitle,

    #[strum(serialize = "checkout.card.numberItem.title")]
    CardNumberTitle,
    #[strum(serialize = "checkout.card.expiryItem.title")]
    CardExpiryTitle,
    #[strum(serialize = "checkout.card.cvcItem.title")]
    CardCvcTitle,
    #[strum(serialize = "checkout.card.cvcItem.title.optional")]
    CardCvcTitleOptional,
    #[strum(serialize = "checkout.card.cvcItem.invalid")]
    CardCvcInvalid,
    #[strum(serialize = "checkout.card.holderName.title")]
    CardHolderNameTitle,
    #[strum(serialize = "checkout.card.storeDetailsButton")]
    CardStoreDetails,
    #[strum(serialize = "checkout.billingAddress.title")]
    BillingAddressTitle,
    #[strum(serialize = "checkout.deliveryAddress.title")]
    DeliveryAddressTitle,

    #[strum(serialize = "checkout.issuerList.title")]
    IssuerListTitle,
    #[strum(serialize = "checkout.sepa.ibanItem.title")]
    IbanTitle,
    #[strum(serialize = "checkout.bankAccount.holderName.title")]
    AccountHolderNameTitle,
    #[strum(serialize = "checkout.bankAccount.number.title")]
    BankAccountNumberTitle,
    #[strum(serialize = "checkout.bankAccount.sortCode.title")]
    SortCodeTitle,
    #[strum(serialize = "checkout.bankAccount.routingNumber.title")]
    RoutingNumberTitle,
    #[strum(serialize = "checkout.bacs.consent.amount")]
    BacsAmountConsent,
    #[strum(serialize = "checkout.bacs.consent.account")]
    BacsAccountConsent,
    #[strum(serialize = "checkout.phoneNumber.title")]
    PhoneNumberTitle,
    #[strum(serialize = "checkout.blik.code.title")]
    BlikCodeTitle,
    #[strum(serialize = "checkout.firstName.title")]
    FirstNameTitle,
    #[strum(serialize = "checkout.lastName.title")]
    LastNameTitle,
    #[strum(serialize = "checkout.emailItem.title")]
    EmailTitle,
    #[strum(serialize = "checkout.socialSecurityNumber.title")]
    SocialSecurityNumberTitle,
    #[strum(serialize = "checkout.giftCard.number.title")]
    GiftCardNumberTitle,
    #[strum(serialize = "checkout.giftCard.pin.title")]
    GiftCardPinTitle,
    #[strum(serialize = "checkout.storedPaymentMethod.confirm")]
    StoredPaymentMethodConfirm,
}

impl Serialize for LocalizationKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn card_network_wire_identifiers() {
        assert_eq!(
            serde_json::to_string(&CardNetwork::Mastercard).unwrap(),
            r#""mc""#
        );
        assert_eq!(
            serde_json::from_str::<CardNetwork>(r#""AMEX""#).unwrap(),
            CardNetwork::AmericanExpress
        );
        assert_eq!(CardNetwork::from_str("cup").unwrap(), CardNetwork::UnionPay);
        assert_eq!(CardNetwork::Bancontact.to_string(), "bcmc");
    }

    #[test]
    fn unlisted_card_network_deserializes_to_unknown() {
        assert_eq!(
            serde_json::from_str::<CardNetwork>(r#""elo""#).unwrap(),
            CardNetwork::Unknown
        );
        assert_eq!(
            serde_json::from_str::<Vec<CardNetwork>>(r#"["hipercard","visa"]"#).unwrap(),
            vec![CardNetwork::Unknown, CardNetwork::Visa]
        );
        assert!(!CardNetwork::known().any(|network| network == CardNetwork::Unknown));
        assert_eq!(CardNetwork::known().count(), CardNetwork::iter().count() - 1);
    }

    #[test]
    fn cvc_policy_serialization() {
        assert_eq!(
            serde_json::from_str::<CvcPolicy>(r#""hidden""#).unwrap(),
            CvcPolicy::Hidden
        );
        assert!(CvcPolicy::Optional.is_skippable());
        assert!(!CvcPolicy::Required.is_skippable());
    }

    #[test]
    fn unlisted_cvc_policy_counts_as_required() {
        let policy = serde_json::from_str::<CvcPolicy>(r#""unknown""#).unwrap();
        assert_eq!(policy, CvcPolicy::Unknown);
        assert!(!policy.is_skippable());

        assert_eq!(
            serde_json::from_str::<CvcPolicy>(r#""whenPresent""#).unwrap(),
            CvcPolicy::Unknown
        );
    }

    #[test]
    fn address_fields_iterate_in_declaration_order() {
        let fields = AddressField::iter().collect::<Vec<_>>();
        assert_eq!(fields.first(), Some(&AddressField::Street));
        assert_eq!(fields.last(), Some(&AddressField::Country));
        assert_eq!(AddressField::HouseNumberOrName.to_string(), "houseNumberOrName");
        assert_eq!(AddressField::Apartment.autocomplete_hint(), None);
    }

    #[test]
    fn unknown_payment_method_type_maps_to_other() {
        assert_eq!(
            serde_json::from_str::<PaymentMethodType>(r#""paywithgoogle""#).unwrap(),
            PaymentMethodType::Other
        );
        assert_eq!(
            serde_json::from_str::<PaymentMethodType>(r#""econtext_atm""#).unwrap(),
            PaymentMethodType::Econtext
        );
        assert!(PaymentMethodType::Ideal.is_issuer_list());
    }

    #[test]
    fn localization_keys_serialize_as_key_strings() {
        assert_eq!(
            serde_json::to_string(&LocalizationKey::CardCvcTitleOptional).unwrap(),
            r#""checkout.card.cvcItem.title.optional""#
        );
    }
}
