//! Transaction entity - Every amount posted against an account.
//!
//! `amount` is signed by the operation type (debits negative, credits positive) and never
//! changes. `balance` is the unsettled remainder: debits move toward zero as later credits
//! discharge them, credits keep whatever was left over when they were posted.
//! Both are stored in minor units.
use crate::core::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the account this transaction belongs to
    pub account_id: i64,
    /// ID of the operation type that decided the sign
    pub operation_type_id: i64,
    /// Signed amount in minor units
    pub amount: i64,
    /// Unsettled remainder in minor units
    pub balance: i64,
    /// When the transaction was posted; defines discharge order
    pub created_at: DateTimeUtc,
}

impl Model {
    /// The signed amount as [`Money`].
    #[must_use]
    pub const fn amount(&self) -> Money {
        Money::from_minor(self.amount)
    }

    /// The unsettled remainder as [`Money`].
    #[must_use]
    pub const fn balance(&self) -> Money {
        Money::from_minor(self.balance)
    }
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
    /// Each transaction is classified by one operation type
    #[sea_orm(
        belongs_to = "super::operation_type::Entity",
        from = "Column::OperationTypeId",
        to = "super::operation_type::Column::Id"
    )]
    OperationType,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::operation_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OperationType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
