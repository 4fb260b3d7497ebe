#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use address_forms::AddressLayoutNode;
use common_enums::{AddressField, CardNetwork, PaymentMethodType};
use payment_methods::{
    build_component, build_components,
    builder::{AddressPurpose, TextValidation},
    configs::settings::{ApplePaySettings, Merchant},
    types::{Amount, Issuer, Order, Payment, PaymentMethod, StoredDetails},
    ComponentContext, ComponentKind, FormItem, Settings,
};

fn settings() -> Settings {
    Settings {
        merchant: Merchant {
            country_code: "NL".to_string(),
            supported_card_networks: vec![CardNetwork::Visa, CardNetwork::Mastercard],
        },
        payment: Some(Payment {
            amount: Amount {
                value: 1000,
                currency: "EUR".to_string(),
            },
            country_code: "NL".to_string(),
        }),
        ..Default::default()
    }
}

fn stored(payment_method_type: PaymentMethodType) -> PaymentMethod {
    PaymentMethod {
        stored: Some(StoredDetails {
            identifier: "8415".to_string(),
            brand: Some(CardNetwork::Visa),
            last_four: Some("1111".to_string()),
            expiry_month: Some("03".to_string()),
            expiry_year: Some("2030".to_string()),
            holder_name: None,
        }),
        ..PaymentMethod::new(payment_method_type, "Stored")
    }
}

#[test]
fn card_form_items() {
    let mut settings = settings();
    settings.card.shows_holder_name_field = true;
    settings.card.shows_billing_address = true;
    let context = ComponentContext::new(&settings, None);

    let component =
        build_component(&context, &PaymentMethod::new(PaymentMethodType::Card, "Cards")).unwrap();

    assert_eq!(component.kind, ComponentKind::Card);
    assert_eq!(
        component.items.first(),
        Some(&FormItem::CardNumber {
            supported_brands: vec![CardNetwork::Visa, CardNetwork::Mastercard]
        })
    );
    assert!(component.items.contains(&FormItem::SecurityCode));
    assert!(component.items.contains(&FormItem::HolderName));
    assert!(component.items.contains(&FormItem::StorePaymentMethod));
    assert!(component.items.iter().any(|item| matches!(
        item,
        FormItem::Address {
            purpose: AddressPurpose::Billing,
            ..
        }
    )));
}

#[test]
fn card_form_prefers_the_method_brands() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);
    let payment_method = PaymentMethod {
        brands: vec![CardNetwork::AmericanExpress],
        ..PaymentMethod::new(PaymentMethodType::Card, "Cards")
    };

    let component = build_component(&context, &payment_method).unwrap();

    assert_eq!(
        component.items.first(),
        Some(&FormItem::CardNumber {
            supported_brands: vec![CardNetwork::AmericanExpress]
        })
    );
}

#[test]
fn bancontact_has_no_security_code() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);

    let component = build_component(
        &context,
        &PaymentMethod::new(PaymentMethodType::Bancontact, "Bancontact"),
    )
    .unwrap();

    assert_eq!(component.kind, ComponentKind::Bancontact);
    assert!(!component.items.contains(&FormItem::SecurityCode));
    assert_eq!(
        component.items.first(),
        Some(&FormItem::CardNumber {
            supported_brands: vec![CardNetwork::Bancontact]
        })
    );
}

#[test]
fn security_code_field_can_be_switched_off() {
    let mut settings = settings();
    settings.card.shows_security_code_field = false;
    let context = ComponentContext::new(&settings, None);

    let card =
        build_component(&context, &PaymentMethod::new(PaymentMethodType::Card, "Cards")).unwrap();
    let stored_card = build_component(&context, &stored(PaymentMethodType::Card)).unwrap();

    assert!(!card.items.contains(&FormItem::SecurityCode));
    assert!(stored_card.items.is_empty());
}

#[test]
fn stored_methods() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);

    let stored_card = build_component(&context, &stored(PaymentMethodType::Card)).unwrap();
    assert_eq!(stored_card.kind, ComponentKind::StoredCard);
    assert_eq!(stored_card.items, vec![FormItem::SecurityCode]);

    let stored_bancontact =
        build_component(&context, &stored(PaymentMethodType::Bancontact)).unwrap();
    assert_eq!(stored_bancontact.kind, ComponentKind::StoredBancontact);
    assert!(stored_bancontact.is_instant());

    let stored_paypal = build_component(&context, &stored(PaymentMethodType::Other)).unwrap();
    assert_eq!(stored_paypal.kind, ComponentKind::Stored);
    assert!(stored_paypal.is_instant());
}

#[test]
fn apple_pay_needs_its_settings() {
    let mut settings = settings();
    let apple_pay = PaymentMethod::new(PaymentMethodType::ApplePay, "Apple Pay");

    assert!(build_component(&ComponentContext::new(&settings, None), &apple_pay).is_none());

    settings.drop_in.apple_pay = Some(ApplePaySettings {
        merchant_identifier: "merchant.com.example".to_string(),
    });
    let component = build_component(&ComponentContext::new(&settings, None), &apple_pay).unwrap();
    assert_eq!(component.kind, ComponentKind::ApplePay);
}

#[test]
fn wechat_pay_needs_the_sdk() {
    let mut settings = settings();
    let wechat_pay = PaymentMethod::new(PaymentMethodType::WeChatPaySdk, "WeChat Pay");

    assert!(build_component(&ComponentContext::new(&settings, None), &wechat_pay).is_none());

    settings.drop_in.wechat_pay_sdk_available = true;
    assert!(build_component(&ComponentContext::new(&settings, None), &wechat_pay).is_some());
}

#[test]
fn gift_card_needs_an_amount_and_partial_payments() {
    let gift_card = PaymentMethod::new(PaymentMethodType::GiftCard, "Gift card");

    let mut settings = settings();
    assert!(build_component(&ComponentContext::new(&settings, None), &gift_card).is_none());

    settings.drop_in.partial_payment_enabled = true;
    let component = build_component(&ComponentContext::new(&settings, None), &gift_card).unwrap();
    assert_eq!(component.kind, ComponentKind::GiftCard);
    assert_eq!(component.items.len(), 2);

    settings.payment = None;
    assert!(build_component(&ComponentContext::new(&settings, None), &gift_card).is_none());
}

#[test]
fn issuer_list_without_issuers_is_instant() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);

    let empty = build_component(&context, &PaymentMethod::new(PaymentMethodType::Ideal, "iDEAL"))
        .unwrap();
    assert_eq!(empty.kind, ComponentKind::Instant);

    let issuers = vec![Issuer {
        identifier: "1121".to_string(),
        name: "Test Issuer".to_string(),
        disabled: false,
    }];
    let ideal = PaymentMethod {
        issuers: issuers.clone(),
        ..PaymentMethod::new(PaymentMethodType::Ideal, "iDEAL")
    };
    let component = build_component(&context, &ideal).unwrap();

    assert_eq!(component.kind, ComponentKind::IssuerList);
    assert_eq!(component.items, vec![FormItem::IssuerList { issuers }]);
    assert!(component.payment.is_none());
}

#[test]
fn order_remaining_amount_replaces_the_payment_amount() {
    let settings = settings();
    let order = Order {
        psp_reference: "8815".to_string(),
        order_data: "order".to_string(),
        amount: None,
        remaining_amount: Some(Amount {
            value: 250,
            currency: "EUR".to_string(),
        }),
    };
    let context = ComponentContext::new(&settings, Some(&order));

    let payment = context.payment().unwrap();
    assert_eq!(payment.amount.value, 250);
    assert_eq!(payment.country_code, "NL");

    let component =
        build_component(&context, &PaymentMethod::new(PaymentMethodType::Other, "PayPal")).unwrap();
    assert_eq!(component.payment, Some(payment));
}

#[test]
fn ach_uses_the_us_address_form() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);

    let component = build_component(
        &context,
        &PaymentMethod::new(PaymentMethodType::AchDirectDebit, "ACH"),
    )
    .unwrap();

    let model = component
        .items
        .iter()
        .find_map(|item| match item {
            FormItem::Address { model, .. } => Some(model),
            _ => None,
        })
        .expect("billing address");
    assert!(model.scheme().contains(&AddressLayoutNode::Paired(
        AddressField::StateOrProvince,
        AddressField::PostalCode
    )));
}

#[test]
fn blik_takes_a_six_digit_code() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);

    let component =
        build_component(&context, &PaymentMethod::new(PaymentMethodType::Blik, "BLIK")).unwrap();

    match component.items.as_slice() {
        [FormItem::Text {
            validation: Some(validation),
            ..
        }] => {
            assert_eq!(
                *validation,
                TextValidation::Digits {
                    minimum_length: 6,
                    maximum_length: 6
                }
            );
            assert!(validation.is_valid("123456"));
        }
        items => panic!("unexpected BLIK items {items:?}"),
    }
}

#[test]
fn affirm_asks_for_both_addresses() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);

    let component =
        build_component(&context, &PaymentMethod::new(PaymentMethodType::Affirm, "Affirm"))
            .unwrap();

    let purposes = component
        .items
        .iter()
        .filter_map(|item| match item {
            FormItem::Address { purpose, .. } => Some(*purpose),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(purposes, vec![AddressPurpose::Billing, AddressPurpose::Delivery]);
}

#[test]
fn skipped_methods_are_left_out() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);

    let components = build_components(
        &context,
        &[
            PaymentMethod::new(PaymentMethodType::Card, "Cards"),
            PaymentMethod::new(PaymentMethodType::ApplePay, "Apple Pay"),
            PaymentMethod::new(PaymentMethodType::MbWay, "MB WAY"),
        ],
    );

    assert_eq!(
        components
            .iter()
            .map(|component| component.kind)
            .collect::<Vec<_>>(),
        vec![ComponentKind::Card, ComponentKind::MbWay]
    );
}

#[test]
fn component_serialization() {
    let settings = settings();
    let context = ComponentContext::new(&settings, None);

    let component =
        build_component(&context, &PaymentMethod::new(PaymentMethodType::MbWay, "MB WAY")).unwrap();
    let json = serde_json::to_value(&component).unwrap();

    assert_eq!(json["kind"], "mb_way");
    assert_eq!(json["paymentMethod"]["type"], "mbway");
    assert_eq!(json["items"][0]["item"], "text");
    assert_eq!(json["items"][0]["title"], "checkout.phoneNumber.title");
    assert_eq!(json["items"][0]["validation"]["type"], "phone_number");
}
