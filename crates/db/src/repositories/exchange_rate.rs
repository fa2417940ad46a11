//! Exchange rate ledger repository.
//!
//! The ledger owns the directed (base, target) edges between currencies.
//! Reads return [`RateRecord`] values that already carry both currency rows;
//! there is no lazy loading, so no hidden I/O on field access.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::info;

use kurs_shared::AppError;

use crate::entities::{currencies, exchange_rates};
use crate::repositories::currency::CurrencyError;

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// No edge stored for the exact directed pair.
    #[error("Exchange rate for pair {0}/{1} not found")]
    NotFound(String, String),

    /// The directed pair is already stored.
    #[error("Exchange rate for pair {0}/{1} already exists")]
    AlreadyExists(String, String),

    /// A catalog failure surfaced through a ledger operation.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::NotFound(..) => Self::NotFound(err.to_string()),
            RateError::AlreadyExists(..) => Self::Conflict(err.to_string()),
            RateError::Currency(inner) => inner.into(),
            RateError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// A fully populated exchange-rate edge.
#[derive(Debug, Clone)]
pub struct RateRecord {
    /// Row id.
    pub id: i32,
    /// Base currency row.
    pub base: currencies::Model,
    /// Target currency row.
    pub target: currencies::Model,
    /// Stored rate (base → target).
    pub rate: Decimal,
}

/// Exchange rate ledger repository.
#[derive(Debug, Clone)]
pub struct ExchangeRateRepository {
    db: DatabaseConnection,
}

impl ExchangeRateRepository {
    /// Creates a new exchange rate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all stored edges in insertion order, each carrying both
    /// currency rows.
    pub async fn list_all(&self) -> Result<Vec<RateRecord>, RateError> {
        let rates = exchange_rates::Entity::find()
            .order_by_asc(exchange_rates::Column::Id)
            .all(&self.db)
            .await?;

        let by_id: HashMap<i32, currencies::Model> = currencies::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        rates
            .into_iter()
            .map(|rate| {
                let base = currency_ref(&by_id, rate.base_currency_id)?;
                let target = currency_ref(&by_id, rate.target_currency_id)?;
                Ok(RateRecord {
                    id: rate.id,
                    base,
                    target,
                    rate: rate.rate,
                })
            })
            .collect()
    }

    /// Looks up the exact directed pair, returning `None` on a miss.
    ///
    /// This is the Option-returning primitive the resolver chains its
    /// strategies over. An unknown currency code is a miss, not an error.
    pub async fn find_pair(
        &self,
        base_code: &str,
        target_code: &str,
    ) -> Result<Option<RateRecord>, RateError> {
        let Some(base) = self.currency_by_code(base_code).await? else {
            return Ok(None);
        };
        let Some(target) = self.currency_by_code(target_code).await? else {
            return Ok(None);
        };

        let rate = exchange_rates::Entity::find()
            .filter(exchange_rates::Column::BaseCurrencyId.eq(base.id))
            .filter(exchange_rates::Column::TargetCurrencyId.eq(target.id))
            .one(&self.db)
            .await?;

        Ok(rate.map(|r| RateRecord {
            id: r.id,
            base,
            target,
            rate: r.rate,
        }))
    }

    /// Fetches the exact directed pair.
    ///
    /// Does not try the inverse ordering; fails with [`RateError::NotFound`]
    /// when no edge exists for this exact direction.
    pub async fn get_by_pair(
        &self,
        base_code: &str,
        target_code: &str,
    ) -> Result<RateRecord, RateError> {
        self.find_pair(base_code, target_code)
            .await?
            .ok_or_else(|| RateError::NotFound(base_code.to_string(), target_code.to_string()))
    }

    /// Inserts a new directed edge.
    ///
    /// Referential integrity is the caller's concern: both currencies must
    /// already have been fetched from the catalog. Duplicate detection
    /// relies on the UNIQUE(base, target) constraint; the inverse ordering
    /// is a distinct key and inserts independently.
    pub async fn add(
        &self,
        base: &currencies::Model,
        target: &currencies::Model,
        rate: Decimal,
    ) -> Result<(), RateError> {
        let edge = exchange_rates::ActiveModel {
            base_currency_id: Set(base.id),
            target_currency_id: Set(target.id),
            rate: Set(rate),
            ..Default::default()
        };

        match edge.insert(&self.db).await {
            Ok(created) => {
                info!(base = %base.code, target = %target.code, rate = %created.rate, "Exchange rate created");
                Ok(())
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Err(
                RateError::AlreadyExists(base.code.clone(), target.code.clone()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Updates the rate of the exact directed pair in place.
    pub async fn update(
        &self,
        base_code: &str,
        target_code: &str,
        new_rate: Decimal,
    ) -> Result<RateRecord, RateError> {
        let record = self.get_by_pair(base_code, target_code).await?;

        let edge = exchange_rates::ActiveModel {
            id: Set(record.id),
            rate: Set(new_rate),
            ..Default::default()
        };
        let updated = edge.update(&self.db).await?;
        info!(base = %base_code, target = %target_code, rate = %updated.rate, "Exchange rate updated");

        Ok(RateRecord {
            id: record.id,
            base: record.base,
            target: record.target,
            rate: updated.rate,
        })
    }

    async fn currency_by_code(&self, code: &str) -> Result<Option<currencies::Model>, DbErr> {
        currencies::Entity::find()
            .filter(currencies::Column::Code.eq(code))
            .one(&self.db)
            .await
    }
}

fn currency_ref(
    by_id: &HashMap<i32, currencies::Model>,
    id: i32,
) -> Result<currencies::Model, RateError> {
    by_id.get(&id).cloned().map_or_else(
        || {
            Err(RateError::Database(DbErr::RecordNotFound(format!(
                "currency id {id} referenced by exchange_rates is missing"
            ))))
        },
        Ok,
    )
}
