//! Response shaping for the shell: statuses and the text sent back for each outcome.

use crate::{
    entities::{AccountModel, OperationTypeModel, TransactionModel},
    errors::Error,
};
use std::fmt;
use tracing::error;

/// Outcome category of a command, mirroring the usual request/response statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The command succeeded
    Ok,
    /// A referenced record does not exist
    NotFound,
    /// The request collides with existing data
    Conflict,
    /// The request was malformed
    BadRequest,
    /// Anything else; details are only logged
    Internal,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ok => "OK",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::Internal => "INTERNAL",
        };
        f.write_str(label)
    }
}

/// A status plus the lines to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Outcome category
    pub status: Status,
    /// Body lines
    pub lines: Vec<String>,
}

impl Response {
    /// A successful response.
    #[must_use]
    pub const fn ok(lines: Vec<String>) -> Self {
        Self {
            status: Status::Ok,
            lines,
        }
    }

    /// Maps a ledger error onto a response.
    ///
    /// Store and other infrastructure failures are logged and replaced by a generic
    /// message so internals never reach the caller.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let (status, message) = match err {
            Error::NotFound { .. } => (Status::NotFound, err.to_string()),
            Error::AlreadyExists { .. } => (Status::Conflict, err.to_string()),
            Error::ValidationFailed { message } => (Status::BadRequest, message.clone()),
            _ => {
                error!("Command failed: {err}");
                (Status::Internal, "Something went wrong, please try again.".to_string())
            }
        };
        Self {
            status,
            lines: vec![message],
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        for line in &self.lines {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

/// One-line rendering of an account.
#[must_use]
pub fn describe_account(account: &AccountModel) -> String {
    format!(
        "account id={} document={} current_balance={} user={} created_at={}",
        account.id,
        account.document_number,
        account.current_balance(),
        account.user_id,
        account.created_at.to_rfc3339(),
    )
}

/// One-line rendering of a transaction.
#[must_use]
pub fn describe_transaction(transaction: &TransactionModel) -> String {
    format!(
        "transaction id={} account={} operation_type={} amount={} balance={} created_at={}",
        transaction.id,
        transaction.account_id,
        transaction.operation_type_id,
        transaction.amount(),
        transaction.balance(),
        transaction.created_at.to_rfc3339(),
    )
}

/// One-line rendering of an operation type.
#[must_use]
pub fn describe_operation_type(operation_type: &OperationTypeModel) -> String {
    format!(
        "operation_type id={} description={} behavior={}",
        operation_type.id, operation_type.description, operation_type.amount_behavior
    )
}
