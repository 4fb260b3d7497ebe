//! Validators applied to shopper input while a form is being filled in.

#![deny(clippy::invalid_regex)]

use std::{fmt, sync::LazyLock};

use error_stack::report;
use regex::Regex;
#[cfg(feature = "logs")]
use checkout_env::logger;

use crate::{
    consts,
    errors::{CustomResult, ValidationError},
};

/// A validator attached to a form text item.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Returns `true` when `value` is acceptable.
    fn is_valid(&self, value: &str) -> bool;

    /// Maximum number of characters the input may hold for the given `value`.
    fn maximum_length(&self, value: &str) -> usize;
}

/// Validates input against a regular expression and a length range.
#[derive(Debug, Clone)]
pub struct RegularExpressionValidator {
    regex: Option<Regex>,
    minimum_length: usize,
    maximum_length: usize,
}

impl RegularExpressionValidator {
    /// Builds a validator from a regular expression.
    ///
    /// A pattern that does not compile is logged and makes every value invalid.
    pub fn new(pattern: &str, minimum_length: usize, maximum_length: usize) -> Self {
        let regex = Regex::new(pattern)
            .map_err(|_err| {
                #[cfg(feature = "logs")]
                logger::error!(?_err, pattern, "invalid validator regex");
            })
            .ok();

        Self {
            regex,
            minimum_length,
            maximum_length,
        }
    }
}

impl Validator for RegularExpressionValidator {
    fn is_valid(&self, value: &str) -> bool {
        let length = value.chars().count();
        if length < self.minimum_length || length > self.maximum_length {
            return false;
        }

        self.regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(value))
    }

    fn maximum_length(&self, _value: &str) -> usize {
        self.maximum_length
    }
}

/// Validates a phone number: an optional leading `+`, a one to four digit prefix and the
/// remaining digits, possibly separated by whitespace.
#[derive(Debug, Clone)]
pub struct PhoneNumberValidator(RegularExpressionValidator);

impl PhoneNumberValidator {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self(RegularExpressionValidator::new(
            r"^[+]*[0-9]{1,4}[\s0-9]*$",
            consts::PHONE_NUMBER_MIN_LENGTH,
            consts::PHONE_NUMBER_MAX_LENGTH,
        ))
    }
}

impl Default for PhoneNumberValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for PhoneNumberValidator {
    fn is_valid(&self, value: &str) -> bool {
        self.0.is_valid(value)
    }

    fn maximum_length(&self, value: &str) -> usize {
        self.0.maximum_length(value)
    }
}

/// Accepts strings made only of ASCII digits whose length lies in a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericStringValidator {
    minimum_length: usize,
    maximum_length: usize,
}

impl NumericStringValidator {
    /// Digits-only values of exactly `length` characters.
    pub fn exact(length: usize) -> Self {
        Self {
            minimum_length: length,
            maximum_length: length,
        }
    }

    /// Digits-only values between `minimum_length` and `maximum_length` characters inclusive.
    pub fn ranged(minimum_length: usize, maximum_length: usize) -> Self {
        Self {
            minimum_length,
            maximum_length,
        }
    }
}

impl Validator for NumericStringValidator {
    fn is_valid(&self, value: &str) -> bool {
        (self.minimum_length..=self.maximum_length).contains(&value.len())
            && value.chars().all(|character| character.is_ascii_digit())
    }

    fn maximum_length(&self, _value: &str) -> usize {
        self.maximum_length
    }
}

/// Performs a simple validation against a provided email address.
pub fn validate_email(email: &str) -> CustomResult<(), ValidationError> {
    #[deny(clippy::invalid_regex)]
    static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
        Regex::new(
            r"^(?i)[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
        )
        .map_err(|_err| {
            #[cfg(feature = "logs")]
            logger::error!(?_err);
        })
        .ok()
    });
    let email_regex = match EMAIL_REGEX.as_ref() {
        Some(regex) => Ok(regex),
        None => Err(report!(ValidationError::InvalidValue {
            message: "Invalid regex expression".into()
        })),
    }?;

    const EMAIL_MAX_LENGTH: usize = 319;
    if email.is_empty() || email.chars().count() > EMAIL_MAX_LENGTH {
        return Err(report!(ValidationError::InvalidValue {
            message: "Email address is either empty or exceeds maximum allowed length".into()
        }));
    }

    if !email_regex.is_match(email) {
        return Err(report!(ValidationError::InvalidValue {
            message: "Invalid email address format".into()
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn phone_number_validator() {
        let validator = PhoneNumberValidator::new();

        assert!(validator.is_valid("+351 912 345 678"));
        assert!(validator.is_valid("12"));
        assert!(!validator.is_valid("1"));
        assert!(!validator.is_valid("+351-912"));
        assert!(!validator.is_valid("123456789012345678901"));
        assert_eq!(validator.maximum_length(""), 20);
    }

    #[test]
    fn numeric_string_validator() {
        let blik = NumericStringValidator::exact(6);
        assert!(blik.is_valid("123456"));
        assert!(!blik.is_valid("12345"));
        assert!(!blik.is_valid("12345a"));

        let ranged = NumericStringValidator::ranged(3, 4);
        assert!(ranged.is_valid("123"));
        assert!(ranged.is_valid("1234"));
        assert!(!ranged.is_valid("12345"));
    }

    #[test]
    fn broken_regex_rejects_everything() {
        let validator = RegularExpressionValidator::new("([", 0, 10);
        assert!(!validator.is_valid("abc"));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("shopper@example.com").is_ok());
        assert!(validate_email("").is_err());
        let err = validate_email("shopper@").unwrap_err();
        assert_eq!(
            err.current_context(),
            &ValidationError::InvalidValue {
                message: "Invalid email address format".into()
            }
        );
    }
}
