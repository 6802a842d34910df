//! Operation type classification - decides whether a posting is a credit or a debit.
//!
//! Operation types are reference data. This module only reads them and turns the stored
//! behavior text into an [`AmountBehavior`].

use crate::{
    core::money::Money,
    entities::{OperationType, operation_type},
    errors::{EntityKind, Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use std::fmt;
use std::str::FromStr;

/// How amounts posted under an operation type are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountBehavior {
    /// Stored positive; discharges outstanding debt
    Credit,
    /// Stored negative; accrues debt
    Debit,
}

impl AmountBehavior {
    /// Applies the sign convention to a caller-supplied amount.
    ///
    /// The absolute value is taken first, so the result only depends on the behavior.
    #[must_use]
    pub const fn apply_sign(self, amount: Money) -> Money {
        let magnitude = amount.abs().minor_units();
        match self {
            Self::Credit => Money::from_minor(magnitude),
            Self::Debit => Money::from_minor(-magnitude),
        }
    }

    /// The text stored in `operation_types.amount_behavior`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "CREDIT",
            Self::Debit => "DEBIT",
        }
    }
}

impl FromStr for AmountBehavior {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREDIT" => Ok(Self::Credit),
            "DEBIT" => Ok(Self::Debit),
            other => Err(Error::Config {
                message: format!("Unknown amount behavior '{other}'"),
            }),
        }
    }
}

impl fmt::Display for AmountBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finds an operation type by its ID.
///
/// # Errors
/// Returns [`Error::NotFound`] if the ID is unknown, or a store error.
pub async fn get_operation_type_by_id<C>(
    db: &C,
    operation_type_id: i64,
) -> Result<operation_type::Model>
where
    C: ConnectionTrait,
{
    OperationType::find_by_id(operation_type_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found(EntityKind::OperationType, operation_type_id))
}

/// Resolves the amount behavior of an operation type.
///
/// # Errors
/// Returns [`Error::NotFound`] if the ID is unknown, [`Error::Config`] if the stored
/// behavior is not recognised, or a store error.
pub async fn get_amount_behavior<C>(db: &C, operation_type_id: i64) -> Result<AmountBehavior>
where
    C: ConnectionTrait,
{
    let operation_type = get_operation_type_by_id(db, operation_type_id).await?;
    operation_type.amount_behavior.parse()
}

/// Lists every operation type, ordered by ID.
pub async fn list_operation_types(db: &DatabaseConnection) -> Result<Vec<operation_type::Model>> {
    OperationType::find()
        .order_by_asc(operation_type::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
