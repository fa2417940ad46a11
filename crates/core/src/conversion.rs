//! Conversion arithmetic.
//!
//! The façade over rate resolution: multiplies the canonical (pre-rounding)
//! effective rate by the amount. Rounding to display precision happens only
//! at the response boundary, via [`crate::numeric::round_display`].

use rust_decimal::Decimal;

use crate::numeric::NumericError;

/// Result of applying an effective rate to an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// The effective rate, canonical precision.
    pub rate: Decimal,
    /// The input amount, canonical precision.
    pub amount: Decimal,
    /// `rate * amount`, canonical precision.
    pub converted_amount: Decimal,
}

/// Applies `rate` to `amount`.
///
/// # Errors
///
/// Returns [`NumericError::Overflow`] if the product does not fit in a
/// `Decimal`.
pub fn convert_amount(rate: Decimal, amount: Decimal) -> Result<Conversion, NumericError> {
    let converted_amount = rate.checked_mul(amount).ok_or(NumericError::Overflow)?;
    Ok(Conversion {
        rate,
        amount,
        converted_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::round_display;
    use rust_decimal_macros::dec;

    #[test]
    fn test_direct_conversion() {
        // USD→RUB at 77.75, amount 24
        let conversion = convert_amount(dec!(77.75), dec!(24)).unwrap();
        assert_eq!(
            round_display(conversion.converted_amount).to_string(),
            "1866.000000"
        );
    }

    #[test]
    fn test_inverse_conversion_rounds_half_up() {
        // RUB→USD derived as 1/77.75, amount 24
        let rate = Decimal::ONE / dec!(77.75);
        let conversion = convert_amount(rate, dec!(24)).unwrap();
        assert_eq!(
            round_display(conversion.converted_amount).to_string(),
            "0.308682"
        );
    }

    #[test]
    fn test_cross_conversion() {
        // EUR→RUB derived as 77.75 / 0.85, amount 24
        let rate = dec!(77.75) / dec!(0.85);
        assert_eq!(round_display(rate).to_string(), "91.470588");

        let conversion = convert_amount(rate, dec!(24)).unwrap();
        assert_eq!(
            round_display(conversion.converted_amount).to_string(),
            "2195.294118"
        );
    }

    #[test]
    fn test_multiplication_precedes_rounding() {
        // Multiplying the rounded rate would lose precision; the façade
        // multiplies the canonical rate instead.
        let rate = Decimal::ONE / dec!(3);
        let conversion = convert_amount(rate, dec!(3)).unwrap();
        assert_eq!(
            round_display(conversion.converted_amount).to_string(),
            "1.000000"
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let result = convert_amount(Decimal::MAX, dec!(2));
        assert_eq!(result, Err(NumericError::Overflow));
    }
}
