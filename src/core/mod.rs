//! Core business logic - framework-agnostic ledger operations.
//!
//! Stores (`account`, `operation_type`, `transaction`) talk to the database, `discharge`
//! is the pure settlement algorithm, and `ledger` ties them into atomic workflows.

/// Account store
pub mod account;
/// Fixed-point settlement algorithm
pub mod discharge;
/// Atomic account and transaction workflows
pub mod ledger;
/// Per-account write serialization
pub mod locks;
/// Fixed-point money
pub mod money;
/// Operation type classification
pub mod operation_type;
/// Transaction store
pub mod transaction;

pub use ledger::{Ledger, NewAccount, NewTransaction};
pub use money::Money;
