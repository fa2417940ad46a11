//! `SeaORM` Entity for the exchange_rates table.
//!
//! Each row is one directed edge; the ordered pair
//! (base_currency_id, target_currency_id) carries a unique constraint, so
//! (A, B) and (B, A) are independent rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "exchange_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub base_currency_id: i32,
    pub target_currency_id: i32,
    #[sea_orm(column_type = "Decimal(Some((21, 6)))")]
    pub rate: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::currencies::Entity",
        from = "Column::BaseCurrencyId",
        to = "super::currencies::Column::Id"
    )]
    BaseCurrency,
    #[sea_orm(
        belongs_to = "super::currencies::Entity",
        from = "Column::TargetCurrencyId",
        to = "super::currencies::Column::Id"
    )]
    TargetCurrency,
}

impl ActiveModelBehavior for ActiveModel {}
