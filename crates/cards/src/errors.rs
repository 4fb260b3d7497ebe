//! Errors of the card brand resolution pipeline.

/// Failures on the remote brand lookup path.
///
/// None of them reaches the caller of the resolver: each one routes the query to the local
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BrandLookupError {
    #[error("Failed to fetch the public key of the BIN lookup service")]
    KeyFetchFailed,
    #[error("BIN lookup request failed")]
    RemoteLookupFailed,
    #[error("BIN is too short for a remote lookup")]
    RemoteLookupUnavailable,
}
