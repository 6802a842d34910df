//! Per-account serialization of ledger writes.
//!
//! Two credits posted to the same account must not discharge from the same snapshot of
//! open debits. [`AccountLocks`] hands out one async mutex per account so those units of
//! work run one after the other, while postings to other accounts proceed untouched.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

/// Keyed async locks, one per account ID.
#[derive(Debug, Default)]
pub struct AccountLocks {
    locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `account_id`.
    ///
    /// The returned guard releases the account when dropped.
    pub async fn acquire(&self, account_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // entries only referenced by the table are idle
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(account_id).or_default())
        };
        trace!(account_id, "Waiting for account lock");
        lock.lock_owned().await
    }

    /// Number of accounts currently tracked, idle or not.
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
