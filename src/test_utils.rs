//! Shared test utilities for the ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::{database, reference},
    core::{account, ledger::Ledger, money::Money, transaction},
    entities,
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// User seeded into every test database.
pub const TEST_USER: i64 = 1;
/// Debit: purchase paid in full.
pub const PURCHASE: i64 = 1;
/// Debit: purchase in installments.
pub const INSTALLMENT_PURCHASE: i64 = 2;
/// Debit: cash withdrawal.
pub const WITHDRAWAL: i64 = 3;
/// Credit: payment.
pub const PAYMENT: i64 = 4;

const TEST_REFERENCE_DATA: &str = r#"
    [[users]]
    id = 1
    name = "Test User"

    [[users]]
    id = 2
    name = "Second User"

    [[operation_types]]
    id = 1
    description = "PURCHASE"
    amount_behavior = "DEBIT"

    [[operation_types]]
    id = 2
    description = "INSTALLMENT PURCHASE"
    amount_behavior = "DEBIT"

    [[operation_types]]
    id = 3
    description = "WITHDRAWAL"
    amount_behavior = "DEBIT"

    [[operation_types]]
    id = 4
    description = "PAYMENT"
    amount_behavior = "CREDIT"
"#;

/// Creates an in-memory `SQLite` database with all tables but no rows.
pub async fn setup_empty_db() -> Result<DatabaseConnection> {
    let db = database::create_connection("sqlite::memory:").await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an in-memory `SQLite` database with tables and the test reference data.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = setup_empty_db().await?;
    let data = reference::ReferenceData::from_toml(TEST_REFERENCE_DATA)?;
    reference::seed_reference_data(&db, &data).await?;
    Ok(db)
}

/// Creates a ledger on top of [`setup_test_db`].
pub async fn setup_test_ledger() -> Result<Ledger> {
    Ok(Ledger::new(setup_test_db().await?))
}

/// Creates a test account owned by [`TEST_USER`] with a 100.00 opening balance.
pub async fn create_test_account(
    db: &DatabaseConnection,
    document_number: &str,
) -> Result<entities::account::Model> {
    account::create_account(
        db,
        document_number.to_string(),
        Money::from_minor(10_000),
        TEST_USER,
    )
    .await
}

/// Sets up a database with one account.
/// Returns (db, account) for common test scenarios.
pub async fn setup_with_account() -> Result<(DatabaseConnection, entities::account::Model)> {
    let db = setup_test_db().await?;
    let account = create_test_account(&db, "00000000001").await?;
    Ok((db, account))
}

/// Sets up a ledger with one account.
pub async fn setup_ledger_with_account() -> Result<(Ledger, entities::account::Model)> {
    let (db, account) = setup_with_account().await?;
    Ok((Ledger::new(db), account))
}

/// Inserts an open purchase of `cents` through the store, bypassing the ledger.
pub async fn post_test_debit(
    db: &DatabaseConnection,
    account_id: i64,
    cents: i64,
) -> Result<entities::transaction::Model> {
    let amount = Money::from_minor(-cents);
    transaction::create_transaction(db, account_id, PURCHASE, amount, amount).await
}

/// Inserts a transaction with an explicit timestamp.
///
/// Negative amounts are filed as purchases, the rest as payments.
pub async fn insert_transaction_at(
    db: &DatabaseConnection,
    account_id: i64,
    amount: i64,
    balance: i64,
    created_at: DateTime<Utc>,
) -> Result<entities::transaction::Model> {
    let operation_type_id = if amount < 0 { PURCHASE } else { PAYMENT };
    entities::transaction::ActiveModel {
        account_id: Set(account_id),
        operation_type_id: Set(operation_type_id),
        amount: Set(amount),
        balance: Set(balance),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// An account model for feeding `MockDatabase` results.
#[must_use]
pub fn test_account_model(id: i64) -> entities::account::Model {
    entities::account::Model {
        id,
        document_number: format!("doc-{id}"),
        current_balance: 10_000,
        user_id: TEST_USER,
        created_at: Utc::now(),
    }
}
