//! Numeric policy for rates and amounts.
//!
//! All rates and amounts are `rust_decimal::Decimal` end to end; floats are
//! denied by the workspace lints. User input is parsed through
//! [`parse_positive_decimal`], which normalizes the decimal separator and
//! enforces the range the DECIMAL(21, 6) rate column can store. Output values
//! are rendered through [`round_display`] with exactly six fractional digits.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use kurs_shared::AppError;

/// Number of fractional digits every rate and amount is rendered with.
pub const DISPLAY_SCALE: u32 = 6;

/// Bounds applied to user-supplied rates and amounts.
///
/// `scale` is the maximum number of fractional digits, `integer_digits` the
/// maximum number of digits before the decimal point. Values come from the
/// validated `numeric` section of the configuration.
#[derive(Debug, Clone, Copy)]
pub struct NumericLimits {
    /// Maximum number of fractional digits.
    pub scale: u32,
    /// Maximum number of integer digits.
    pub integer_digits: u32,
}

impl Default for NumericLimits {
    fn default() -> Self {
        Self {
            scale: 6,
            integer_digits: 15,
        }
    }
}

/// Validation failures for user-supplied numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// More than one decimal separator in the input.
    #[error("value must contain at most one decimal point")]
    MultipleDecimalPoints,

    /// The input is not a decimal number at all.
    #[error("value is not a valid decimal number")]
    Unparsable,

    /// Zero or negative.
    #[error("value must be greater than zero")]
    NotPositive,

    /// Positive but below the smallest representable step.
    #[error("value is too small: the minimum is 10^-{0}")]
    TooSmall(u32),

    /// Too many digits after the decimal point.
    #[error("value must have at most {0} fractional digits")]
    TooManyFractionalDigits(u32),

    /// Too many digits before the decimal point.
    #[error("value must have at most {0} integer digits")]
    TooManyIntegerDigits(u32),

    /// Arithmetic result does not fit in a `Decimal`.
    #[error("value is too large to represent")]
    Overflow,
}

impl From<NumericError> for AppError {
    fn from(err: NumericError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Parses a user-supplied numeric string into a canonical positive `Decimal`.
///
/// Both ',' and '.' are accepted as the decimal separator. Checks are applied
/// in order: at most one separator, parsable, strictly positive, not below
/// `10^-scale`, fractional digits within `scale`, integer digits within
/// `integer_digits`.
pub fn parse_positive_decimal(input: &str, limits: &NumericLimits) -> Result<Decimal, NumericError> {
    let normalized = input.trim().replace(',', ".");
    if normalized.matches('.').count() > 1 {
        return Err(NumericError::MultipleDecimalPoints);
    }

    let value = Decimal::from_str(&normalized).map_err(|_| NumericError::Unparsable)?;

    if value <= Decimal::ZERO {
        return Err(NumericError::NotPositive);
    }
    if value < Decimal::new(1, limits.scale) {
        return Err(NumericError::TooSmall(limits.scale));
    }
    if value.normalize().scale() > limits.scale {
        return Err(NumericError::TooManyFractionalDigits(limits.scale));
    }
    if integer_digit_count(value) > limits.integer_digits {
        return Err(NumericError::TooManyIntegerDigits(limits.integer_digits));
    }

    Ok(value)
}

/// Rounds a value to exactly [`DISPLAY_SCALE`] fractional digits, half-up.
///
/// The result is rescaled so that serialization always prints six decimals
/// (`1866` becomes `1866.000000`).
#[must_use]
pub fn round_display(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

fn integer_digit_count(value: Decimal) -> u32 {
    let int_part = value.trunc().normalize();
    if int_part.is_zero() {
        return 0;
    }
    u32::try_from(int_part.mantissa().unsigned_abs().to_string().len()).unwrap_or(u32::MAX)
}
