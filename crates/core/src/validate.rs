//! Input validation for currency codes, codepairs, and currency fields.
//!
//! Codes are trimmed and upper-cased here, before they reach the catalog or
//! ledger; storage always compares against the canonical uppercase form.

use thiserror::Error;

use kurs_shared::AppError;

/// Validation failures for currency input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodeFormatError {
    /// Not exactly three letters.
    #[error("currency code must be exactly 3 letters")]
    InvalidCode,

    /// Not exactly six letters.
    #[error("currency codepair must be exactly 6 letters")]
    InvalidCodepair,

    /// Base and target halves of a pair are identical.
    #[error("base and target currency codes must differ")]
    SameCurrency,

    /// Currency name out of shape.
    #[error("currency name must be 3-50 characters of letters and spaces")]
    InvalidName,

    /// Currency sign out of shape.
    #[error("currency sign must be 1-10 characters")]
    InvalidSign,
}

impl From<CodeFormatError> for AppError {
    fn from(err: CodeFormatError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Normalizes a currency code: trim, uppercase, exactly 3 ASCII letters.
pub fn normalize_code(raw: &str) -> Result<String, CodeFormatError> {
    let code = raw.trim().to_uppercase();
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(CodeFormatError::InvalidCode);
    }
    Ok(code)
}

/// Splits a 6-letter codepair into normalized (base, target) codes.
///
/// The two halves must differ; `(A, B)` and `(B, A)` address distinct edges.
pub fn split_codepair(raw: &str) -> Result<(String, String), CodeFormatError> {
    let pair = raw.trim().to_uppercase();
    if pair.len() != 6 || !pair.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(CodeFormatError::InvalidCodepair);
    }
    let (base, target) = pair.split_at(3);
    if base == target {
        return Err(CodeFormatError::SameCurrency);
    }
    Ok((base.to_string(), target.to_string()))
}

/// Validates a currency display name: 3-50 characters, letters and spaces.
pub fn validate_name(name: &str) -> Result<(), CodeFormatError> {
    let len = name.chars().count();
    if !(3..=50).contains(&len) || !name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(CodeFormatError::InvalidName);
    }
    Ok(())
}

/// Validates a currency sign: 1-10 characters.
pub fn validate_sign(sign: &str) -> Result<(), CodeFormatError> {
    let len = sign.chars().count();
    if !(1..=10).contains(&len) {
        return Err(CodeFormatError::InvalidSign);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("usd", "USD")]
    #[case(" RUB ", "RUB")]
    #[case("EuR", "EUR")]
    fn test_normalize_code_accepts(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_code(raw).as_deref(), Ok(expected));
    }

    #[rstest]
    #[case("US")]
    #[case("USDD")]
    #[case("U1D")]
    #[case("")]
    #[case("U D")]
    fn test_normalize_code_rejects(#[case] raw: &str) {
        assert_eq!(normalize_code(raw), Err(CodeFormatError::InvalidCode));
    }

    #[test]
    fn test_split_codepair() {
        assert_eq!(
            split_codepair("usdrub"),
            Ok(("USD".to_string(), "RUB".to_string()))
        );
        assert_eq!(
            split_codepair(" EURGBP "),
            Ok(("EUR".to_string(), "GBP".to_string()))
        );
    }

    #[rstest]
    #[case("USDRU")]
    #[case("USDRUBX")]
    #[case("USD123")]
    fn test_split_codepair_rejects_shape(#[case] raw: &str) {
        assert_eq!(split_codepair(raw), Err(CodeFormatError::InvalidCodepair));
    }

    #[test]
    fn test_split_codepair_rejects_same_halves() {
        assert_eq!(split_codepair("USDUSD"), Err(CodeFormatError::SameCurrency));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("US Dollar").is_ok());
        assert!(validate_name("ab").is_err());
        assert!(validate_name("Dollar$").is_err());
        assert!(validate_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_sign() {
        assert!(validate_sign("$").is_ok());
        assert!(validate_sign("").is_err());
        assert!(validate_sign("12345678901").is_err());
    }
}
