//! Discharge engine - offsets a credit against outstanding debits, oldest first.
//!
//! This is a pure computation: it takes a snapshot of open debits, works on its own sorted
//! copy and reports which balances changed plus how much of the credit was left over.
//! Persisting the result is the caller's job.

use crate::{core::money::Money, entities::transaction};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The part of an open debit the engine needs to know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDebit {
    /// Transaction ID, also the tie-breaker for equal timestamps
    pub id: i64,
    /// Posting time; older debits are discharged first
    pub created_at: DateTime<Utc>,
    /// Current unsettled balance (negative while debt remains)
    pub balance: Money,
}

impl From<&transaction::Model> for OpenDebit {
    fn from(model: &transaction::Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            balance: model.balance(),
        }
    }
}

/// A debit whose balance moved during a discharge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceUpdate {
    /// The debit transaction to update
    pub transaction_id: i64,
    /// Its balance after the discharge
    pub new_balance: Money,
}

/// Result of a discharge run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DischargeOutcome {
    /// Debits that changed, in the order they were discharged
    pub updates: Vec<BalanceUpdate>,
    /// Credit left after all reachable debt was settled
    pub remaining: Money,
}

impl DischargeOutcome {
    /// How much debt the run settled.
    #[must_use]
    pub fn discharged(&self, credit: Money) -> Money {
        credit - self.remaining
    }
}

/// Offsets `credit` against `open_debits`, oldest `created_at` first.
///
/// Debits with a non-negative balance are skipped. A debit is never pushed past zero, and
/// the walk stops as soon as the credit is used up. A non-positive credit settles nothing.
#[must_use]
pub fn discharge(credit: Money, open_debits: &[OpenDebit]) -> DischargeOutcome {
    let mut queue = open_debits.to_vec();
    queue.sort_by_key(|debit| (debit.created_at, debit.id));

    let mut remaining = credit;
    let mut updates = Vec::new();

    for debit in &queue {
        if !remaining.is_positive() {
            break;
        }
        if !debit.balance.is_negative() {
            continue;
        }

        let consumed = (-debit.balance).min(remaining);
        remaining -= consumed;
        updates.push(BalanceUpdate {
            transaction_id: debit.id,
            new_balance: debit.balance + consumed,
        });
    }

    DischargeOutcome { updates, remaining }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Open debits with distinct ids, a handful of shared timestamps and
    /// balances between -0.01 and -10,000.00.
    fn open_debits_strategy() -> impl Strategy<Value = Vec<OpenDebit>> {
        prop::collection::vec((0i64..20, 1i64..=1_000_000), 0..25).prop_map(|rows| {
            let base = DateTime::<Utc>::UNIX_EPOCH;
            rows.into_iter()
                .enumerate()
                .map(|(idx, (minute, cents))| OpenDebit {
                    id: i64::try_from(idx).unwrap_or(i64::MAX) + 1,
                    created_at: base + Duration::minutes(minute),
                    balance: Money::from_minor(-cents),
                })
                .collect()
        })
    }

    fn total_debt(debits: &[OpenDebit]) -> i64 {
        debits.iter().map(|d| d.balance.abs().minor_units()).sum()
    }

    fn apply(debits: &[OpenDebit], outcome: &DischargeOutcome) -> Vec<OpenDebit> {
        let changed: HashMap<i64, Money> = outcome
            .updates
            .iter()
            .map(|u| (u.transaction_id, u.new_balance))
            .collect();
        debits
            .iter()
            .map(|d| OpenDebit {
                balance: changed.get(&d.id).copied().unwrap_or(d.balance),
                ..*d
            })
            .collect()
    }

    proptest! {
        #[test]
        fn conservation(debits in open_debits_strategy(), credit in 1i64..=5_000_000) {
            let credit = Money::from_minor(credit);
            let outcome = discharge(credit, &debits);
            let after = apply(&debits, &outcome);

            prop_assert_eq!(
                total_debt(&debits) - total_debt(&after),
                (credit - outcome.remaining).minor_units()
            );
            prop_assert!(!outcome.remaining.is_negative());
            prop_assert!(outcome.remaining <= credit);
        }

        #[test]
        fn no_overshoot(debits in open_debits_strategy(), credit in 1i64..=5_000_000) {
            let outcome = discharge(Money::from_minor(credit), &debits);
            let before: HashMap<i64, Money> = debits.iter().map(|d| (d.id, d.balance)).collect();

            for update in &outcome.updates {
                let old = before[&update.transaction_id];
                prop_assert!(update.new_balance.abs() < old.abs());
                prop_assert!(update.new_balance.is_negative() || update.new_balance.is_zero());
            }
        }

        #[test]
        fn absorption(debits in open_debits_strategy(), credit in 1i64..=5_000_000) {
            let debt = total_debt(&debits);
            let outcome = discharge(Money::from_minor(credit), &debits);

            if debt >= credit {
                prop_assert_eq!(outcome.remaining, Money::ZERO);
            } else {
                prop_assert_eq!(outcome.remaining, Money::from_minor(credit - debt));
            }
        }

        #[test]
        fn ordering_determinism(
            debits in open_debits_strategy(),
            credit in 1i64..=5_000_000,
            seed in any::<u64>(),
        ) {
            let mut shuffled = debits.clone();
            // deterministic rotation + reverse stands in for an arbitrary permutation
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left(usize::try_from(seed % len as u64).unwrap_or(0));
            }
            if seed % 2 == 0 {
                shuffled.reverse();
            }

            let credit = Money::from_minor(credit);
            prop_assert_eq!(discharge(credit, &debits), discharge(credit, &shuffled));
        }

        #[test]
        fn fifo_prefix(debits in open_debits_strategy(), credit in 1i64..=5_000_000) {
            let outcome = discharge(Money::from_minor(credit), &debits);
            let mut sorted = debits.clone();
            sorted.sort_by_key(|d| (d.created_at, d.id));

            // touched debits are exactly a prefix of the oldest-first order, and every
            // one but the last is fully settled
            for (update, debit) in outcome.updates.iter().zip(&sorted) {
                prop_assert_eq!(update.transaction_id, debit.id);
            }
            if let Some((_, settled)) = outcome.updates.split_last() {
                prop_assert!(settled.iter().all(|u| u.new_balance.is_zero()));
            }
        }
    }
}
