//! Initial database migration.
//!
//! Creates the currencies catalog and the exchange_rates ledger. The unique
//! constraints here are the source of truth for duplicate detection: the
//! repositories insert without pre-checks and translate constraint
//! violations, so concurrent inserts for the same key race at the database.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(CURRENCIES_SQL).await?;
        db.execute_unprepared(EXCHANGE_RATES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const CURRENCIES_SQL: &str = r"
CREATE TABLE currencies (
    id SERIAL PRIMARY KEY,
    code VARCHAR(3) NOT NULL UNIQUE,
    name VARCHAR(50) NOT NULL,
    sign VARCHAR(10) NOT NULL
);
";

const EXCHANGE_RATES_SQL: &str = r"
CREATE TABLE exchange_rates (
    id SERIAL PRIMARY KEY,
    base_currency_id INTEGER NOT NULL REFERENCES currencies(id),
    target_currency_id INTEGER NOT NULL REFERENCES currencies(id),
    rate DECIMAL(21, 6) NOT NULL,
    CONSTRAINT exchange_rates_pair_key UNIQUE (base_currency_id, target_currency_id)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS exchange_rates;
DROP TABLE IF EXISTS currencies;
";
