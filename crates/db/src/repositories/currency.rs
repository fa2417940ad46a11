//! Currency catalog repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::info;

use kurs_shared::AppError;

use crate::entities::currencies;

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    /// No currency stored under the given code.
    #[error("Currency '{0}' not found")]
    NotFound(String),

    /// The code is already taken.
    #[error("Currency with code '{0}' already exists")]
    AlreadyExists(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::NotFound(_) => Self::NotFound(err.to_string()),
            CurrencyError::AlreadyExists(_) => Self::Conflict(err.to_string()),
            CurrencyError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Currency catalog repository.
///
/// Currencies are immutable after insert; the catalog exposes no update or
/// delete.
#[derive(Debug, Clone)]
pub struct CurrencyRepository {
    db: DatabaseConnection,
}

impl CurrencyRepository {
    /// Creates a new currency repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all currencies in insertion order.
    pub async fn list_all(&self) -> Result<Vec<currencies::Model>, CurrencyError> {
        let all = currencies::Entity::find()
            .order_by_asc(currencies::Column::Id)
            .all(&self.db)
            .await?;
        Ok(all)
    }

    /// Fetches one currency by its canonical uppercase code.
    ///
    /// Comparison is case-sensitive on the stored form; callers normalize
    /// input before calling.
    pub async fn get_by_code(&self, code: &str) -> Result<currencies::Model, CurrencyError> {
        let currency = currencies::Entity::find()
            .filter(currencies::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        currency.ok_or_else(|| CurrencyError::NotFound(code.to_string()))
    }

    /// Inserts a new currency.
    ///
    /// There is no pre-check for the code: duplicate detection relies on the
    /// UNIQUE constraint, so two concurrent adds for the same code race at
    /// commit and exactly one succeeds.
    pub async fn add(
        &self,
        name: &str,
        code: &str,
        sign: &str,
    ) -> Result<currencies::Model, CurrencyError> {
        let currency = currencies::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            sign: Set(sign.to_string()),
            ..Default::default()
        };

        match currency.insert(&self.db).await {
            Ok(created) => {
                info!(code = %created.code, "Currency created");
                Ok(created)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(CurrencyError::AlreadyExists(code.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
