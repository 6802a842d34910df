//! Account entity - A customer account transactions are posted against.
//!
//! Accounts are created once and never mutated by the ledger. `current_balance` is an
//! informational snapshot taken at creation; debt is tracked on the transactions.

use crate::core::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Document number of the account holder; one account per document
    #[sea_orm(unique)]
    pub document_number: String,
    /// Balance supplied at creation, in minor units
    pub current_balance: i64,
    /// Owning user
    pub user_id: i64,
    /// When the account was opened
    pub created_at: DateTimeUtc,
}

impl Model {
    /// The creation-time balance as [`Money`].
    #[must_use]
    pub const fn current_balance(&self) -> Money {
        Money::from_minor(self.current_balance)
    }
}

/// Defines relationships between Account and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each account belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One account has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
