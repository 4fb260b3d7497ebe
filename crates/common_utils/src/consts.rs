//! Commonly used constants

/// A BIN needs more digits than this before the remote lookup service is consulted.
pub const MIN_REMOTE_LOOKUP_BIN_LENGTH: usize = 6;

/// Number of leading card number digits published as the BIN while the shopper types.
pub const MAX_BIN_LENGTH: usize = 8;

/// Minimum length of a phone number accepted by the phone number validator
pub const PHONE_NUMBER_MIN_LENGTH: usize = 2;

/// Maximum length of a phone number accepted by the phone number validator
pub const PHONE_NUMBER_MAX_LENGTH: usize = 20;

/// Number of digits in a BLIK code
pub const BLIK_CODE_LENGTH: usize = 6;
