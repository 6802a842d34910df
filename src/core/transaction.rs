//! Transaction store - Lookups, inserts and discharge balance updates for transactions.
//!
//! Transactions are append-only. The only column ever rewritten is `balance`, and only on
//! debits, through [`apply_balance_updates`].

use crate::{
    core::{discharge::BalanceUpdate, money::Money},
    entities::{Transaction, transaction},
    errors::{EntityKind, Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};

/// Retrieves a transaction by its ID.
///
/// # Errors
/// Returns [`Error::NotFound`] if there is no such transaction, or a store error.
pub async fn get_transaction_by_id<C>(db: &C, transaction_id: i64) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found(EntityKind::Transaction, transaction_id))
}

/// Inserts a new transaction with an already computed `balance`.
///
/// `amount` must already carry the sign of its operation type.
pub async fn create_transaction<C>(
    db: &C,
    account_id: i64,
    operation_type_id: i64,
    amount: Money,
    balance: Money,
) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let transaction = transaction::ActiveModel {
        account_id: Set(account_id),
        operation_type_id: Set(operation_type_id),
        amount: Set(amount.minor_units()),
        balance: Set(balance.minor_units()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    transaction.insert(db).await.map_err(Into::into)
}

/// Lists the account's transactions that still carry debt (`balance < 0`).
///
/// Oldest first: ordered by `created_at`, then by `id` for rows posted at the same instant.
/// An account without open debits yields an empty list.
pub async fn list_open_debits<C>(db: &C, account_id: i64) -> Result<Vec<transaction::Model>>
where
    C: ConnectionTrait,
{
    Transaction::find()
        .filter(transaction::Column::AccountId.eq(account_id))
        .filter(transaction::Column::Balance.lt(0))
        .order_by_asc(transaction::Column::CreatedAt)
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Writes the new balances produced by a discharge run.
///
/// Each update is restricted to transactions of `account_id`. Run this on the same
/// database transaction as the insert of the triggering credit so both commit together.
///
/// # Errors
/// Returns [`Error::NotFound`] if an update matches no transaction of the account, or a
/// store error.
pub async fn apply_balance_updates<C>(
    db: &C,
    account_id: i64,
    updates: &[BalanceUpdate],
) -> Result<()>
where
    C: ConnectionTrait,
{
    for update in updates {
        let result = Transaction::update_many()
            .col_expr(
                transaction::Column::Balance,
                Expr::value(update.new_balance.minor_units()),
            )
            .filter(transaction::Column::Id.eq(update.transaction_id))
            .filter(transaction::Column::AccountId.eq(account_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::not_found(
                EntityKind::Transaction,
                update.transaction_id,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_and_get_transaction() -> Result<()> {
        let (db, account) = setup_with_account().await?;

        let created = create_transaction(
            &db,
            account.id,
            PURCHASE,
            Money::from_minor(-5000),
            Money::from_minor(-5000),
        )
        .await?;
        assert_eq!(created.account_id, account.id);
        assert_eq!(created.operation_type_id, PURCHASE);
        assert_eq!(created.amount(), Money::from_minor(-5000));
        assert_eq!(created.balance(), Money::from_minor(-5000));

        let fetched = get_transaction_by_id(&db, created.id).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_transaction_not_found() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<transaction::Model>::new()])
            .into_connection();

        let result = get_transaction_by_id(&db, 999).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: EntityKind::Transaction,
                id: 999
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_open_debits_empty() -> Result<()> {
        let (db, account) = setup_with_account().await?;
        assert!(list_open_debits(&db, account.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_open_debits_filters_and_orders() -> Result<()> {
        let (db, account) = setup_with_account().await?;
        let other = create_test_account(&db, "other-doc").await?;
        let now = chrono::Utc::now();

        // inserted newest first so the result order cannot come from insertion order
        let newer = insert_transaction_at(&db, account.id, -3000, -3000, now).await?;
        let older =
            insert_transaction_at(&db, account.id, -5000, -5000, now - chrono::Duration::hours(1))
                .await?;
        // settled debit, a credit and another account's debit are all excluded
        insert_transaction_at(&db, account.id, -1000, 0, now).await?;
        insert_transaction_at(&db, account.id, 2000, 2000, now).await?;
        insert_transaction_at(&db, other.id, -700, -700, now).await?;

        let open = list_open_debits(&db, account.id).await?;
        let ids: Vec<i64> = open.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![older.id, newer.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_open_debits_ties_broken_by_id() -> Result<()> {
        let (db, account) = setup_with_account().await?;
        let at = chrono::Utc::now();

        let first = insert_transaction_at(&db, account.id, -100, -100, at).await?;
        let second = insert_transaction_at(&db, account.id, -200, -200, at).await?;

        let open = list_open_debits(&db, account.id).await?;
        let ids: Vec<i64> = open.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_balance_updates() -> Result<()> {
        let (db, account) = setup_with_account().await?;
        let debit = post_test_debit(&db, account.id, 5000).await?;

        apply_balance_updates(
            &db,
            account.id,
            &[BalanceUpdate {
                transaction_id: debit.id,
                new_balance: Money::from_minor(-1200),
            }],
        )
        .await?;

        let updated = get_transaction_by_id(&db, debit.id).await?;
        assert_eq!(updated.balance(), Money::from_minor(-1200));
        // amount is never touched
        assert_eq!(updated.amount(), Money::from_minor(-5000));
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_balance_updates_rejects_foreign_account() -> Result<()> {
        let (db, account) = setup_with_account().await?;
        let other = create_test_account(&db, "someone-else").await?;
        let foreign_debit = post_test_debit(&db, other.id, 900).await?;

        let result = apply_balance_updates(
            &db,
            account.id,
            &[BalanceUpdate {
                transaction_id: foreign_debit.id,
                new_balance: Money::ZERO,
            }],
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: EntityKind::Transaction,
                ..
            })
        ));

        let untouched = get_transaction_by_id(&db, foreign_debit.id).await?;
        assert_eq!(untouched.balance(), Money::from_minor(-900));
        Ok(())
    }
}
