//! Core business logic for kurs.
//!
//! This crate contains the decision logic of the service, free of any web or
//! database dependency:
//! - Numeric policy: canonical decimal parsing, range checks, display rounding
//! - Input validation for currency codes and codepairs
//! - Rate resolution strategies (identity, direct, inverse, cross-reference)
//! - Conversion arithmetic

pub mod conversion;
pub mod exchange;
pub mod numeric;
pub mod validate;

pub use conversion::{Conversion, convert_amount};
pub use exchange::{RateEdge, RateLookupMethod, resolve_edges};
pub use numeric::{DISPLAY_SCALE, NumericError, NumericLimits, parse_positive_decimal, round_display};
pub use validate::{CodeFormatError, normalize_code, split_codepair};
