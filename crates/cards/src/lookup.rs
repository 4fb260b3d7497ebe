//! Remote BIN lookup session and its collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use checkout_env::{logger, Tag};
use common_enums::CardNetwork;
use common_utils::errors::CustomResult;
use masking::{PeekInterface, Secret, Strategy};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    brand::{BinQuery, BinStrategy, CardBrand},
    errors::BrandLookupError,
};

/// Client key used to protect the BIN sent to the lookup service.
#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey(Secret<String>);

impl PublicKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Secret::new(key.into()))
    }
}

impl PeekInterface<Secret<String>> for PublicKey {
    fn peek(&self) -> &Secret<String> {
        &self.0
    }
}

/// Source of the public key of the BIN lookup service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicKeyProvider: Send + Sync {
    async fn fetch(&self) -> CustomResult<PublicKey, BrandLookupError>;
}

/// Transport to the BIN lookup endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BinLookupApiClient: Send + Sync {
    async fn request_card_type(
        &self,
        request: BinLookupRequest,
    ) -> CustomResult<BinLookupResponse, BrandLookupError>;
}

/// Body of a BIN lookup call.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinLookupRequest {
    pub request_id: uuid::Uuid,
    #[serde(serialize_with = "serialize_public_key")]
    pub public_key: PublicKey,
    #[serde(rename = "encryptedBin", serialize_with = "serialize_secret")]
    pub bin: Secret<String, BinStrategy>,
    pub supported_brands: Vec<CardNetwork>,
}

fn serialize_secret<S, I>(value: &Secret<String, I>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    I: Strategy<String>,
{
    serializer.serialize_str(value.peek())
}

fn serialize_public_key<S: Serializer>(
    value: &PublicKey,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serialize_secret(value.peek(), serializer)
}

/// Answer of the BIN lookup endpoint.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BinLookupResponse {
    #[serde(default)]
    pub brands: Option<Vec<CardBrand>>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub issuing_country_code: Option<String>,
}

/// A fetched public key bound to an API client.
///
/// Built once per resolver and reused for every later lookup.
#[derive(Clone)]
pub struct BinLookupService {
    public_key: PublicKey,
    api_client: Arc<dyn BinLookupApiClient>,
}

impl std::fmt::Debug for BinLookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinLookupService")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl BinLookupService {
    pub fn new(public_key: PublicKey, api_client: Arc<dyn BinLookupApiClient>) -> Self {
        Self {
            public_key,
            api_client,
        }
    }

    /// Looks up the brands of `query` restricted to its supported brands.
    ///
    /// A successful answer without brands is an empty list.
    pub async fn request_card_brands(
        &self,
        query: &BinQuery,
    ) -> CustomResult<Vec<CardBrand>, BrandLookupError> {
        let request = BinLookupRequest {
            request_id: uuid::Uuid::new_v4(),
            public_key: self.public_key.clone(),
            bin: query.bin().clone(),
            supported_brands: query.supported_brands().to_vec(),
        };
        let request_id = request.request_id;

        let response = self.api_client.request_card_type(request).await?;

        logger::debug!(
            tag = ?Tag::BinLookup,
            %request_id,
            issuing_country_code = ?response.issuing_country_code,
            "BIN lookup answered"
        );
        Ok(response.brands.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_enums::CvcPolicy;
    use error_stack::report;

    use super::*;

    fn query() -> BinQuery {
        BinQuery::new("41111111", vec![CardNetwork::Visa, CardNetwork::Mastercard])
    }

    #[tokio::test]
    async fn missing_brands_become_an_empty_list() {
        let mut client = MockBinLookupApiClient::new();
        client
            .expect_request_card_type()
            .times(1)
            .returning(|_| Ok(BinLookupResponse::default()));

        let service = BinLookupService::new(PublicKey::new("10001|ABCD"), Arc::new(client));

        assert_eq!(service.request_card_brands(&query()).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn request_carries_key_bin_and_supported_brands() {
        let mut client = MockBinLookupApiClient::new();
        client
            .expect_request_card_type()
            .withf(|request| {
                request.public_key == PublicKey::new("10001|ABCD")
                    && request.bin.peek() == "41111111"
                    && request.supported_brands == [CardNetwork::Visa, CardNetwork::Mastercard]
            })
            .returning(|_| {
                Ok(BinLookupResponse {
                    brands: Some(vec![CardBrand::new(CardNetwork::Visa, CvcPolicy::Required)]),
                    ..Default::default()
                })
            });

        let service = BinLookupService::new(PublicKey::new("10001|ABCD"), Arc::new(client));
        let brands = service.request_card_brands(&query()).await.unwrap();

        assert_eq!(
            brands.iter().map(|brand| brand.brand).collect::<Vec<_>>(),
            vec![CardNetwork::Visa]
        );
    }

    #[tokio::test]
    async fn transport_errors_are_propagated() {
        let mut client = MockBinLookupApiClient::new();
        client
            .expect_request_card_type()
            .returning(|_| Err(report!(BrandLookupError::RemoteLookupFailed)));

        let service = BinLookupService::new(PublicKey::new("key"), Arc::new(client));
        let error = service.request_card_brands(&query()).await.unwrap_err();

        assert_eq!(error.current_context(), &BrandLookupError::RemoteLookupFailed);
    }

    #[test]
    fn request_serialization() {
        let request = BinLookupRequest {
            request_id: uuid::Uuid::nil(),
            public_key: PublicKey::new("key"),
            bin: Secret::new("41111111".to_string()),
            supported_brands: vec![CardNetwork::Mastercard],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "requestId": "00000000-0000-0000-0000-000000000000",
                "publicKey": "key",
                "encryptedBin": "41111111",
                "supportedBrands": ["mc"],
            })
        );
    }

    #[test]
    fn response_deserialization() {
        let response: BinLookupResponse = serde_json::from_str(
            r#"{"brands":[{"brand":"bcmc","cvcPolicy":"hidden"},{"brand":"maestro"}],"issuingCountryCode":"BE"}"#,
        )
        .unwrap();

        assert_eq!(
            response.brands.unwrap(),
            vec![
                CardBrand::new(CardNetwork::Bancontact, CvcPolicy::Hidden),
                CardBrand::new(CardNetwork::Maestro, CvcPolicy::Required),
            ]
        );
        assert_eq!(response.issuing_country_code.as_deref(), Some("BE"));
    }

    #[test]
    fn response_with_unlisted_brand_and_policy_still_deserializes() {
        let response: BinLookupResponse = serde_json::from_str(
            r#"{"brands":[{"brand":"elo","cvcPolicy":"unknown"},{"brand":"visa","cvcPolicy":"optional"}]}"#,
        )
        .unwrap();

        assert_eq!(
            response.brands.unwrap(),
            vec![
                CardBrand::new(CardNetwork::Unknown, CvcPolicy::Unknown),
                CardBrand::new(CardNetwork::Visa, CvcPolicy::Optional),
            ]
        );
    }
}
