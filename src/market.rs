//! Market data port.
//!
//! Trait boundary between the bot logic and the concrete provider client so
//! command handlers and the poller can be exercised against a stub.

use async_trait::async_trait;

use crate::domain::{AlertThresholds, PairSnapshot, Transaction};

/// Read-only market data source.
///
/// Implementations never propagate provider failures: errors are logged at
/// the adapter boundary and degrade to `None` / an empty list.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Whether the provider knows at least one trading pair for the token.
    async fn token_exists(&self, token_address: &str) -> bool;

    /// Snapshot of the token's most liquid pair, or `None` when the token is
    /// unknown or the provider call fails.
    async fn get_pair_snapshot(&self, token_address: &str) -> Option<PairSnapshot>;

    /// Recent transactions for the token's most liquid pair, synthesized
    /// from interval statistics and already filtered against `thresholds`
    /// within `window_secs`.
    async fn get_recent_transactions(
        &self,
        token_address: &str,
        thresholds: &AlertThresholds,
        window_secs: u64,
    ) -> Vec<Transaction>;
}
