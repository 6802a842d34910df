//! Account store - Existence checks, lookups and creation of accounts.
//!
//! Every function is generic over [`ConnectionTrait`] so it can run either directly on the
//! connection or inside a database transaction opened by the ledger.

use crate::{
    core::money::Money,
    entities::{Account, User, account},
    errors::{EntityKind, Error, Result},
};
use sea_orm::{Set, SqlErr, prelude::*};

/// Returns `true` if a user with this ID exists.
pub async fn user_exists<C>(db: &C, user_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let user = User::find_by_id(user_id).one(db).await?;
    Ok(user.is_some())
}

/// Returns `true` if an account with this ID exists.
pub async fn account_exists<C>(db: &C, account_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let account = Account::find_by_id(account_id).one(db).await?;
    Ok(account.is_some())
}

/// Retrieves an account by its ID.
///
/// # Errors
/// Returns [`Error::NotFound`] if there is no such account, or a store error.
pub async fn get_account_by_id<C>(db: &C, account_id: i64) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    Account::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found(EntityKind::Account, account_id))
}

/// Inserts a new account.
///
/// The caller is responsible for checking that `user_id` exists first; the foreign key
/// only backs that up.
///
/// # Errors
/// Returns [`Error::AlreadyExists`] if an account with the same document number exists,
/// or a store error for anything else.
pub async fn create_account<C>(
    db: &C,
    document_number: String,
    initial_balance: Money,
    user_id: i64,
) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    let key = document_number.clone();
    let account = account::ActiveModel {
        document_number: Set(document_number),
        current_balance: Set(initial_balance.minor_units()),
        user_id: Set(user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    account.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::AlreadyExists {
            entity: EntityKind::Account,
            key,
        },
        _ => Error::from(e),
    })
}
