//! Local card brand detection from BIN prefixes.

use std::sync::LazyLock;

use async_trait::async_trait;
use checkout_env::{logger, Tag};
use common_enums::{CardNetwork, CvcPolicy};
use masking::PeekInterface;
use regex::Regex;

use crate::{
    brand::{BinQuery, CardBrand},
    provider::CardBrandProvider,
};

#[deny(clippy::invalid_regex)]
static CARD_PREFIX_PATTERNS: LazyLock<Vec<(CardNetwork, Regex)>> = LazyLock::new(|| {
    [
        (CardNetwork::Visa, r"^4[0-9]{0,16}$"),
        (
            CardNetwork::Mastercard,
            r"^(5[1-5][0-9]{0,14}|2[2-7][0-9]{0,14})$",
        ),
        (CardNetwork::AmericanExpress, r"^3[47][0-9]{0,13}$"),
        (CardNetwork::DinersClub, r"^(36)[0-9]{0,12}$"),
        (
            CardNetwork::Discover,
            r"^(6011[0-9]{0,12}|(644|645|646|647|648|649)[0-9]{0,13}|65[0-9]{0,14})$",
        ),
        (
            CardNetwork::Jcb,
            r"^(352[8,9]{1}[0-9]{0,15}|35[4-8]{1}[0-9]{0,16})$",
        ),
        (CardNetwork::Maestro, r"^(5[0|6-8][0-9]{0,17}|6[0-9]{0,18})$"),
        (CardNetwork::UnionPay, r"^62[0-9]{0,17}$"),
        (
            CardNetwork::Bancontact,
            r"^((6703)[0-9]{0,15}|(479658|606005)[0-9]{0,13})$",
        ),
    ]
    .into_iter()
    .filter_map(|(network, pattern)| match Regex::new(pattern) {
        Ok(regex) => Some((network, regex)),
        Err(error) => {
            logger::error!(
                tag = ?Tag::FallbackLookup,
                %network,
                ?error,
                "invalid card prefix pattern"
            );
            None
        }
    })
    .collect()
});

/// Infers card brands from the BIN without any network access.
///
/// Every supported network whose prefix pattern matches is returned, in the order of the
/// query's supported brands. Bancontact never asks for a security code.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackCardBrandProvider;

impl FallbackCardBrandProvider {
    pub fn detect(&self, query: &BinQuery) -> Vec<CardBrand> {
        let bin = query.bin().peek();
        let brands: Vec<CardBrand> = query
            .supported_brands()
            .iter()
            .filter(|network| {
                CARD_PREFIX_PATTERNS
                    .iter()
                    .any(|(candidate, regex)| candidate == *network && regex.is_match(bin))
            })
            .map(|network| CardBrand::new(*network, fallback_cvc_policy(*network)))
            .collect();

        logger::debug!(
            tag = ?Tag::FallbackLookup,
            bin = ?query.bin(),
            brands = ?brands.iter().map(|brand| brand.brand).collect::<Vec<_>>(),
            "card brands detected locally"
        );
        brands
    }
}

fn fallback_cvc_policy(network: CardNetwork) -> CvcPolicy {
    match network {
        CardNetwork::Bancontact => CvcPolicy::Hidden,
        _ => CvcPolicy::Required,
    }
}

#[async_trait]
impl CardBrandProvider for FallbackCardBrandProvider {
    async fn request_card_brands(&self, query: &BinQuery) -> Vec<CardBrand> {
        self.detect(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn networks(bin: &str, supported: &[CardNetwork]) -> Vec<CardNetwork> {
        FallbackCardBrandProvider
            .detect(&BinQuery::new(bin, supported.to_vec()))
            .into_iter()
            .map(|brand| brand.brand)
            .collect()
    }

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(CARD_PREFIX_PATTERNS.len(), 9);
    }

    #[test]
    fn detects_single_brands() {
        let all = [
            CardNetwork::Visa,
            CardNetwork::Mastercard,
            CardNetwork::AmericanExpress,
            CardNetwork::Discover,
            CardNetwork::UnionPay,
        ];

        assert_eq!(networks("411111", &all), vec![CardNetwork::Visa]);
        assert_eq!(networks("222100", &all), vec![CardNetwork::Mastercard]);
        assert_eq!(networks("3714", &all), vec![CardNetwork::AmericanExpress]);
        assert_eq!(networks("6011", &all), vec![CardNetwork::Discover]);
        assert!(networks("9999", &all).is_empty());
        assert!(networks("", &all).is_empty());
    }

    #[test]
    fn follows_supported_order_for_co_badged_prefixes() {
        assert_eq!(
            networks("6703", &[CardNetwork::Bancontact, CardNetwork::Maestro]),
            vec![CardNetwork::Bancontact, CardNetwork::Maestro]
        );
        assert_eq!(
            networks("6703", &[CardNetwork::Maestro, CardNetwork::Bancontact]),
            vec![CardNetwork::Maestro, CardNetwork::Bancontact]
        );
    }

    #[test]
    fn unsupported_networks_are_never_returned() {
        assert!(networks("411111", &[CardNetwork::Mastercard]).is_empty());
    }

    #[test]
    fn bancontact_hides_the_security_code() {
        let brands = FallbackCardBrandProvider.detect(&BinQuery::new(
            "479658",
            vec![CardNetwork::Visa, CardNetwork::Bancontact],
        ));

        assert_eq!(
            brands,
            vec![
                CardBrand::new(CardNetwork::Visa, CvcPolicy::Required),
                CardBrand::new(CardNetwork::Bancontact, CvcPolicy::Hidden),
            ]
        );
    }
}
