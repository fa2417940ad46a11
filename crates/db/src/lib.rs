//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for currencies and exchange rates
//! - Repository abstractions for data access
//! - The database-backed rate resolver
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod resolver;

pub use repositories::{
    CurrencyError, CurrencyRepository, ExchangeRateRepository, RateError, RateRecord,
};
pub use resolver::{RateResolver, ResolvedRate};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
