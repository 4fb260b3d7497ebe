#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod brand;
pub mod errors;
pub mod fallback;
pub mod lookup;
pub mod provider;
pub mod security_code;
pub mod validate;

use std::str::FromStr;

use common_utils::{date_time, errors::CustomResult, errors::ValidationError};
use error_stack::{report, ResultExt};
use masking::{PeekInterface, StrongSecret};
use time::{util::days_in_year_month, Date, Duration, Month, PrimitiveDateTime, Time};

pub use crate::{
    brand::{BinQuery, CardBrand},
    errors::BrandLookupError,
    fallback::FallbackCardBrandProvider,
    provider::{BrandResolution, BrandSource, CardBrandProvider, CardBrandResolver},
    security_code::{derive_policy, SecurityCodeItem, SecurityCodePolicy},
    validate::CardNumber,
};

#[derive(Debug)]
pub struct CardExpirationMonth(StrongSecret<u8>);

impl CardExpirationMonth {
    pub fn new(secret: StrongSecret<u8>) -> CustomResult<Self, ValidationError> {
        let month = secret.peek();

        if (1..=12).contains(month) {
            Ok(Self(secret))
        } else {
            Err(report!(ValidationError::InvalidValue {
                message: "invalid card expiration month".to_string()
            }))
        }
    }

    pub fn two_digits(&self) -> String {
        format!("{:02}", self.0.peek())
    }
}

impl TryFrom<u8> for CardExpirationMonth {
    type Error = error_stack::Report<ValidationError>;

    fn try_from(month: u8) -> Result<Self, Self::Error> {
        Self::new(StrongSecret::new(month))
    }
}

#[derive(Debug)]
pub struct CardExpirationYear(StrongSecret<u16>);

impl CardExpirationYear {
    pub fn new(secret: StrongSecret<u16>) -> CustomResult<Self, ValidationError> {
        let year = secret.peek();

        if *year >= 1997 {
            Ok(Self(secret))
        } else {
            Err(report!(ValidationError::InvalidValue {
                message: "invalid card expiration year".to_string()
            }))
        }
    }

    pub fn four_digits(&self) -> String {
        self.0.peek().to_string()
    }

    pub fn two_digits(&self) -> String {
        format!("{:02}", self.0.peek() % 100)
    }
}

impl TryFrom<u16> for CardExpirationYear {
    type Error = error_stack::Report<ValidationError>;

    fn try_from(year: u16) -> Result<Self, Self::Error> {
        Self::new(StrongSecret::new(year))
    }
}

#[derive(Debug)]
pub struct CardExpiration {
    pub month: CardExpirationMonth,
    pub year: CardExpirationYear,
}

impl CardExpiration {
    pub fn new(
        secret_month: StrongSecret<u8>,
        secret_year: StrongSecret<u16>,
    ) -> CustomResult<Self, ValidationError> {
        Ok(Self {
            month: CardExpirationMonth::new(secret_month)?,
            year: CardExpirationYear::new(secret_year)?,
        })
    }

    /// Whether the card can no longer be used.
    ///
    /// A card stays valid until the last day of its expiry month, plus one day to cover every
    /// timezone ahead of UTC.
    pub fn is_expired(&self) -> CustomResult<bool, ValidationError> {
        let current_datetime_utc = date_time::now();

        let year = i32::from(*self.year.0.peek());
        let month = Month::try_from(*self.month.0.peek()).change_context(
            ValidationError::InvalidValue {
                message: "invalid card expiration month".to_string(),
            },
        )?;
        let expiration_date = Date::from_calendar_date(year, month, days_in_year_month(year, month))
            .change_context(ValidationError::InvalidValue {
                message: "invalid card expiration date".to_string(),
            })?;

        let expiration_datetime_utc = PrimitiveDateTime::new(expiration_date, Time::MIDNIGHT)
            .saturating_add(Duration::days(1));

        Ok(current_datetime_utc > expiration_datetime_utc)
    }

    pub fn get_month(&self) -> &CardExpirationMonth {
        &self.month
    }

    pub fn get_year(&self) -> &CardExpirationYear {
        &self.year
    }
}

/// Parses the `MM/YY` or `MM/YYYY` value of the expiry date field.
impl FromStr for CardExpiration {
    type Err = error_stack::Report<ValidationError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            message: "invalid card expiration date".to_string(),
        };

        let (month, year) = s.trim().split_once('/').ok_or_else(|| report!(invalid()))?;
        let month = month.trim().parse::<u8>().change_context(invalid())?;
        let year = match year.trim() {
            two_digits if two_digits.len() == 2 => {
                two_digits.parse::<u16>().change_context(invalid())? + 2000
            }
            four_digits => four_digits.parse::<u16>().change_context(invalid())?,
        };

        Self::new(StrongSecret::new(month), StrongSecret::new(year))
    }
}

impl PeekInterface<StrongSecret<u8>> for CardExpirationMonth {
    fn peek(&self) -> &StrongSecret<u8> {
        &self.0
    }
}

impl PeekInterface<StrongSecret<u16>> for CardExpirationYear {
    fn peek(&self) -> &StrongSecret<u16> {
        &self.0
    }
}
