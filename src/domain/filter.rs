//! Notification filtering.
//!
//! Pure functions that decide which synthesized transactions qualify for a
//! user alert. Everything here is side-effect free and takes `now` as an
//! argument so boundary behavior is testable.

use chrono::{DateTime, Duration, Utc};

use crate::domain::thresholds::AlertThresholds;
use crate::domain::types::Transaction;

/// Keep the transactions that clear `thresholds` within `window_secs` of
/// `now`, preserving input order.
///
/// Boundaries: a transaction exactly `window_secs` old is kept; an amount
/// exactly equal to the minimum is kept.
#[must_use]
pub fn filter_transactions(
    transactions: Vec<Transaction>,
    thresholds: &AlertThresholds,
    window_secs: u64,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    let cutoff = now - Duration::seconds(window_secs as i64);

    transactions
        .into_iter()
        .filter(|tx| qualifies(tx, thresholds, cutoff))
        .collect()
}

fn qualifies(tx: &Transaction, thresholds: &AlertThresholds, cutoff: DateTime<Utc>) -> bool {
    if tx.timestamp < cutoff {
        return false;
    }
    if let Some(direction) = thresholds.direction {
        if tx.direction != direction {
            return false;
        }
    }
    tx.amount_usd >= thresholds.min_amount_usd
}
