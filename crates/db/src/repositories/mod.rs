//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.

pub mod currency;
pub mod exchange_rate;

pub use currency::{CurrencyError, CurrencyRepository};
pub use exchange_rate::{ExchangeRateRepository, RateError, RateRecord};
