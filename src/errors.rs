//! Unified error types for the ledger.
//!
//! Domain failures (`NotFound`, `AlreadyExists`, `ValidationFailed`) are kept apart from
//! infrastructure failures (`Store`) so the request layer can map each kind to a response.

use std::fmt;
use thiserror::Error;

/// The kind of record a [`Error::NotFound`] or [`Error::AlreadyExists`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A customer account
    Account,
    /// A posted transaction
    Transaction,
    /// Operation type reference data
    OperationType,
    /// An account holder
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Account => "Account",
            Self::Transaction => "Transaction",
            Self::OperationType => "Operation type",
            Self::User => "User",
        };
        f.write_str(name)
    }
}

/// All errors surfaced by the ledger.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Which kind of record was looked up
        entity: EntityKind,
        /// The identifier that was looked up
        id: i64,
    },

    /// A uniqueness constraint was violated
    #[error("{entity} already exists: {key}")]
    AlreadyExists {
        /// Which kind of record collided
        entity: EntityKind,
        /// The conflicting key
        key: String,
    },

    /// Caller input was rejected before reaching the store
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// What was wrong with the input
        message: String,
    },

    /// Underlying persistence failure
    #[error("Store error: {0}")]
    Store(#[from] sea_orm::DbErr),

    /// Configuration or reference data problem
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// I/O failure (config file, stdin)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for building a [`Error::NotFound`].
    #[must_use]
    pub const fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Shorthand for building a [`Error::ValidationFailed`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
