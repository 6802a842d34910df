//! Ledger workflows - account opening and transaction posting.
//!
//! [`Ledger`] is built once at startup around the database connection and shared by
//! whatever layer handles requests. Posting a transaction runs as one unit of work:
//!
//! 1. validate that the account exists
//! 2. classify the operation type and sign the amount
//! 3. for credits, discharge the account's open debits oldest first
//! 4. write the updated debit balances and the new transaction, then commit
//!
//! Steps 1 to 4 share a single database transaction and hold the account's lock, so a
//! failure anywhere leaves no trace and concurrent credits never discharge the same debt.

use crate::{
    core::{
        account,
        discharge::{self, OpenDebit},
        locks::AccountLocks,
        money::Money,
        operation_type::{self, AmountBehavior},
        transaction,
    },
    entities,
    errors::{EntityKind, Error, Result},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Input for opening an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAccount {
    /// Document number of the account holder
    pub document_number: String,
    /// Informational opening balance, must be positive
    pub current_balance: Money,
    /// Existing user who owns the account
    pub user_id: i64,
}

/// Input for posting a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NewTransaction {
    /// Account to post against
    pub account_id: i64,
    /// Operation type deciding the sign
    pub operation_type_id: i64,
    /// Unsigned amount, must be positive
    pub amount: Money,
}

/// Entry point for all ledger operations.
#[derive(Debug)]
pub struct Ledger {
    db: DatabaseConnection,
    locks: AccountLocks,
}

impl Ledger {
    /// Wraps an initialized database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            locks: AccountLocks::new(),
        }
    }

    /// The underlying connection, for read-only helpers.
    #[must_use]
    pub const fn database(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Opens a new account for an existing user.
    ///
    /// # Errors
    /// - [`Error::ValidationFailed`] for an empty document number or non-positive balance
    /// - [`Error::NotFound`] if the user does not exist
    /// - [`Error::AlreadyExists`] if the document number is taken
    /// - [`Error::Store`] on persistence failure
    #[instrument(skip(self, request), fields(user_id = request.user_id))]
    pub async fn create_account(&self, request: NewAccount) -> Result<entities::AccountModel> {
        let document_number = request.document_number.trim().to_string();
        if document_number.is_empty() {
            return Err(Error::validation("document number cannot be empty"));
        }
        if !request.current_balance.is_positive() {
            return Err(Error::validation(format!(
                "current balance must be greater than zero, got {}",
                request.current_balance
            )));
        }

        let txn = self.db.begin().await?;

        if !account::user_exists(&txn, request.user_id).await? {
            return Err(Error::not_found(EntityKind::User, request.user_id));
        }

        let created = account::create_account(
            &txn,
            document_number,
            request.current_balance,
            request.user_id,
        )
        .await?;
        txn.commit().await?;

        info!(account_id = created.id, "Account created");
        Ok(created)
    }

    /// Posts a transaction, discharging open debt when it is a credit.
    ///
    /// # Errors
    /// - [`Error::ValidationFailed`] for a non-positive amount
    /// - [`Error::NotFound`] if the account or operation type does not exist
    /// - [`Error::Store`] on persistence failure; nothing is written in that case
    #[instrument(
        skip(self, request),
        fields(
            account_id = request.account_id,
            operation_type_id = request.operation_type_id,
        )
    )]
    pub async fn post_transaction(
        &self,
        request: NewTransaction,
    ) -> Result<entities::TransactionModel> {
        if !request.amount.is_positive() {
            return Err(Error::validation(format!(
                "amount must be greater than zero, got {}",
                request.amount
            )));
        }

        let _account_guard = self.locks.acquire(request.account_id).await;
        let txn = self.db.begin().await?;

        debug!("Validating account");
        if !account::account_exists(&txn, request.account_id).await? {
            return Err(Error::not_found(EntityKind::Account, request.account_id));
        }

        debug!("Classifying operation type");
        let behavior = operation_type::get_amount_behavior(&txn, request.operation_type_id).await?;
        let amount = behavior.apply_sign(request.amount);

        let (updates, balance) = match behavior {
            AmountBehavior::Debit => (Vec::new(), amount),
            AmountBehavior::Credit => {
                debug!("Discharging open debits");
                let open: Vec<OpenDebit> = transaction::list_open_debits(&txn, request.account_id)
                    .await?
                    .iter()
                    .map(OpenDebit::from)
                    .collect();
                let outcome = discharge::discharge(amount, &open);
                debug!(
                    open_debits = open.len(),
                    touched = outcome.updates.len(),
                    discharged = %outcome.discharged(amount),
                    "Discharge computed"
                );
                (outcome.updates, outcome.remaining)
            }
        };

        debug!("Persisting");
        transaction::apply_balance_updates(&txn, request.account_id, &updates).await?;
        let created = transaction::create_transaction(
            &txn,
            request.account_id,
            request.operation_type_id,
            amount,
            balance,
        )
        .await?;
        txn.commit().await?;

        info!(
            transaction_id = created.id,
            %amount,
            %balance,
            behavior = %behavior,
            "Transaction posted"
        );
        Ok(created)
    }

    /// Looks up an account.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if there is no such account, or a store error.
    pub async fn get_account(&self, account_id: i64) -> Result<entities::AccountModel> {
        account::get_account_by_id(&self.db, account_id).await
    }

    /// Looks up a transaction.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if there is no such transaction, or a store error.
    pub async fn get_transaction(&self, transaction_id: i64) -> Result<entities::TransactionModel> {
        transaction::get_transaction_by_id(&self.db, transaction_id).await
    }

    /// Lists an account's unsettled debits, oldest first.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if there is no such account, or a store error.
    pub async fn open_debits(&self, account_id: i64) -> Result<Vec<entities::TransactionModel>> {
        if !account::account_exists(&self.db, account_id).await? {
            return Err(Error::not_found(EntityKind::Account, account_id));
        }
        transaction::list_open_debits(&self.db, account_id).await
    }

    /// Lists the operation types transactions can be posted under.
    pub async fn operation_types(&self) -> Result<Vec<entities::OperationTypeModel>> {
        operation_type::list_operation_types(&self.db).await
    }
}
