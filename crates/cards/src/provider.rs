//! Card brand resolution: remote lookup with a local fallback.

use std::sync::Arc;

use async_trait::async_trait;
use checkout_env::{logger, Tag};
use common_utils::{consts, errors::CustomResult};
use error_stack::{report, ResultExt};
use tokio::sync::OnceCell;

use crate::{
    brand::{BinQuery, CardBrand},
    errors::BrandLookupError,
    fallback::FallbackCardBrandProvider,
    lookup::{BinLookupApiClient, BinLookupService, PublicKeyProvider},
};

/// Produces the card brands of a BIN.
///
/// Implementations never fail: every call yields exactly one brand list, possibly empty.
#[async_trait]
pub trait CardBrandProvider: Send + Sync {
    async fn request_card_brands(&self, query: &BinQuery) -> Vec<CardBrand>;
}

/// Where a brand list came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BrandSource {
    Remote,
    Fallback,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BrandResolution {
    pub brands: Vec<CardBrand>,
    pub source: BrandSource,
}

/// Resolves card brands through the BIN lookup service, falling back to local detection.
///
/// BINs of at most six digits are resolved locally. Longer BINs go through a lookup session
/// that is created on first use by fetching the public key, and reused afterwards. Any key
/// fetch or lookup failure is logged and answered by the fallback.
pub struct CardBrandResolver {
    public_key_provider: Arc<dyn PublicKeyProvider>,
    api_client: Arc<dyn BinLookupApiClient>,
    fallback: Arc<dyn CardBrandProvider>,
    session: OnceCell<BinLookupService>,
}

impl std::fmt::Debug for CardBrandResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardBrandResolver")
            .field("session", &self.session.get())
            .finish_non_exhaustive()
    }
}

impl CardBrandResolver {
    /// Resolver using the [`FallbackCardBrandProvider`] for local detection.
    pub fn new(
        public_key_provider: Arc<dyn PublicKeyProvider>,
        api_client: Arc<dyn BinLookupApiClient>,
    ) -> Self {
        Self::with_fallback(
            public_key_provider,
            api_client,
            Arc::new(FallbackCardBrandProvider),
        )
    }

    pub fn with_fallback(
        public_key_provider: Arc<dyn PublicKeyProvider>,
        api_client: Arc<dyn BinLookupApiClient>,
        fallback: Arc<dyn CardBrandProvider>,
    ) -> Self {
        Self {
            public_key_provider,
            api_client,
            fallback,
            session: OnceCell::new(),
        }
    }

    /// Whether the lookup session has been created.
    pub fn has_session(&self) -> bool {
        self.session.initialized()
    }

    pub async fn resolve(&self, query: &BinQuery) -> BrandResolution {
        match self.remote_lookup(query).await {
            Ok(brands) => BrandResolution {
                brands,
                source: BrandSource::Remote,
            },
            Err(error) => {
                match error.current_context() {
                    BrandLookupError::RemoteLookupUnavailable => logger::trace!(
                        tag = ?Tag::FallbackLookup,
                        bin_length = query.bin_length(),
                        "BIN too short for a remote lookup"
                    ),
                    BrandLookupError::KeyFetchFailed | BrandLookupError::RemoteLookupFailed => {
                        logger::warn!(
                            tag = ?Tag::BinLookup,
                            bin = ?query.bin(),
                            ?error,
                            "remote card brand lookup failed, using local detection"
                        )
                    }
                }

                BrandResolution {
                    brands: self.fallback.request_card_brands(query).await,
                    source: BrandSource::Fallback,
                }
            }
        }
    }

    async fn remote_lookup(
        &self,
        query: &BinQuery,
    ) -> CustomResult<Vec<CardBrand>, BrandLookupError> {
        if query.bin_length() <= consts::MIN_REMOTE_LOOKUP_BIN_LENGTH {
            return Err(report!(BrandLookupError::RemoteLookupUnavailable));
        }

        let session = self
            .session
            .get_or_try_init(|| async {
                let public_key = self
                    .public_key_provider
                    .fetch()
                    .await
                    .change_context(BrandLookupError::KeyFetchFailed)?;
                logger::debug!(tag = ?Tag::KeyFetch, "BIN lookup session created");
                Ok::<_, error_stack::Report<BrandLookupError>>(BinLookupService::new(
                    public_key,
                    Arc::clone(&self.api_client),
                ))
            })
            .await?;

        session
            .request_card_brands(query)
            .await
            .change_context(BrandLookupError::RemoteLookupFailed)
    }
}

#[async_trait]
impl CardBrandProvider for CardBrandResolver {
    async fn request_card_brands(&self, query: &BinQuery) -> Vec<CardBrand> {
        self.resolve(query).await.brands
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_enums::{CardNetwork, CvcPolicy};

    use super::*;
    use crate::{
        lookup::{BinLookupResponse, MockBinLookupApiClient, MockPublicKeyProvider, PublicKey},
        security_code::derive_policy,
    };

    struct CountingFallback {
        calls: std::sync::atomic::AtomicUsize,
        brands: Vec<CardBrand>,
    }

    impl CountingFallback {
        fn new(brands: Vec<CardBrand>) -> Arc<Self> {
            Arc::new(Self {
                calls: std::sync::atomic::AtomicUsize::new(0),
                brands,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CardBrandProvider for CountingFallback {
        async fn request_card_brands(&self, _query: &BinQuery) -> Vec<CardBrand> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.brands.clone()
        }
    }

    fn visa() -> CardBrand {
        CardBrand::new(CardNetwork::Visa, CvcPolicy::Required)
    }

    fn query(bin: &str) -> BinQuery {
        BinQuery::new(bin, vec![CardNetwork::Visa, CardNetwork::Mastercard])
    }

    #[tokio::test]
    async fn short_bin_never_reaches_the_remote_service() {
        let mut keys = MockPublicKeyProvider::new();
        keys.expect_fetch().never();
        let mut client = MockBinLookupApiClient::new();
        client.expect_request_card_type().never();
        let fallback = CountingFallback::new(vec![visa()]);

        let resolver =
            CardBrandResolver::with_fallback(Arc::new(keys), Arc::new(client), fallback.clone());
        let resolution = resolver.resolve(&query("411111")).await;

        assert_eq!(resolution.source, BrandSource::Fallback);
        assert_eq!(resolution.brands, vec![visa()]);
        assert_eq!(fallback.calls(), 1);
        assert!(!resolver.has_session());
    }

    #[tokio::test]
    async fn key_fetch_failure_falls_back_once() {
        let mut keys = MockPublicKeyProvider::new();
        keys.expect_fetch()
            .times(1)
            .returning(|| Err(report!(BrandLookupError::KeyFetchFailed)));
        let mut client = MockBinLookupApiClient::new();
        client.expect_request_card_type().never();
        let fallback = CountingFallback::new(vec![visa()]);

        let resolver =
            CardBrandResolver::with_fallback(Arc::new(keys), Arc::new(client), fallback.clone());
        let resolution = resolver.resolve(&query("4111111")).await;

        assert_eq!(resolution.source, BrandSource::Fallback);
        assert_eq!(resolution.brands, vec![visa()]);
        assert_eq!(fallback.calls(), 1);
        assert!(!resolver.has_session());
    }

    #[tokio::test]
    async fn failed_key_fetch_is_retried_on_the_next_query() {
        let mut keys = MockPublicKeyProvider::new();
        let mut sequence = mockall::Sequence::new();
        keys.expect_fetch()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|| Err(report!(BrandLookupError::KeyFetchFailed)));
        keys.expect_fetch()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|| Ok(PublicKey::new("key")));
        let mut client = MockBinLookupApiClient::new();
        client.expect_request_card_type().times(1).returning(|_| {
            Ok(BinLookupResponse {
                brands: Some(vec![visa()]),
                ..Default::default()
            })
        });

        let resolver = CardBrandResolver::new(Arc::new(keys), Arc::new(client));

        assert_eq!(
            resolver.resolve(&query("4111111")).await.source,
            BrandSource::Fallback
        );
        assert_eq!(
            resolver.resolve(&query("41111111")).await.source,
            BrandSource::Remote
        );
        assert!(resolver.has_session());
    }

    #[tokio::test]
    async fn remote_brands_drive_a_required_security_code() {
        let mut keys = MockPublicKeyProvider::new();
        keys.expect_fetch()
            .times(1)
            .returning(|| Ok(PublicKey::new("key")));
        let mut client = MockBinLookupApiClient::new();
        client.expect_request_card_type().times(1).returning(|_| {
            Ok(BinLookupResponse {
                brands: Some(vec![visa()]),
                ..Default::default()
            })
        });
        let fallback = CountingFallback::new(vec![]);

        let resolver =
            CardBrandResolver::with_fallback(Arc::new(keys), Arc::new(client), fallback.clone());
        let resolution = resolver.resolve(&query("4111111")).await;

        assert_eq!(resolution.source, BrandSource::Remote);
        assert_eq!(resolution.brands, vec![visa()]);
        assert_eq!(fallback.calls(), 0);
        assert!(!derive_policy(&resolution.brands).is_optional);
    }

    #[tokio::test]
    async fn remote_answer_without_brands_is_an_empty_list() {
        let mut keys = MockPublicKeyProvider::new();
        keys.expect_fetch().returning(|| Ok(PublicKey::new("key")));
        let mut client = MockBinLookupApiClient::new();
        client
            .expect_request_card_type()
            .returning(|_| Ok(BinLookupResponse::default()));
        let fallback = CountingFallback::new(vec![visa()]);

        let resolver =
            CardBrandResolver::with_fallback(Arc::new(keys), Arc::new(client), fallback.clone());
        let resolution = resolver.resolve(&query("4111111")).await;

        assert_eq!(resolution.source, BrandSource::Remote);
        assert!(resolution.brands.is_empty());
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn session_is_created_once() {
        let mut keys = MockPublicKeyProvider::new();
        keys.expect_fetch()
            .times(1)
            .returning(|| Ok(PublicKey::new("key")));
        let mut client = MockBinLookupApiClient::new();
        client.expect_request_card_type().times(3).returning(|_| {
            Ok(BinLookupResponse {
                brands: Some(vec![visa()]),
                ..Default::default()
            })
        });

        let resolver = CardBrandResolver::new(Arc::new(keys), Arc::new(client));
        for bin in ["4111111", "41111111", "4111112"] {
            assert_eq!(
                resolver.request_card_brands(&query(bin)).await,
                vec![visa()]
            );
        }
    }

    #[tokio::test]
    async fn lookup_failure_uses_local_detection() {
        let mut keys = MockPublicKeyProvider::new();
        keys.expect_fetch().returning(|| Ok(PublicKey::new("key")));
        let mut client = MockBinLookupApiClient::new();
        client
            .expect_request_card_type()
            .times(1)
            .returning(|_| Err(report!(BrandLookupError::RemoteLookupFailed)));

        let resolver = CardBrandResolver::new(Arc::new(keys), Arc::new(client));
        let resolution = resolver.resolve(&query("41111111")).await;

        assert_eq!(resolution.source, BrandSource::Fallback);
        assert_eq!(resolution.brands, vec![visa()]);
        assert!(resolver.has_session());
    }
}
