//! Operation type entity - Read-only reference data describing how amounts are signed.
//!
//! `amount_behavior` holds `"CREDIT"` or `"DEBIT"`; see
//! [`crate::core::operation_type::AmountBehavior`] for the parsed form.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Operation type database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operation_types")]
pub struct Model {
    /// Stable identifier, assigned by the reference data
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Human-readable label (e.g., "PAYMENT", "WITHDRAWAL")
    pub description: String,
    /// `"CREDIT"` or `"DEBIT"`
    pub amount_behavior: String,
}

/// Defines relationships between `OperationType` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One operation type classifies many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
