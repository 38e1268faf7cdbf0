//! Provider-agnostic types and the notification filtering logic.

pub mod filter;
mod thresholds;
mod types;
mod watchlist;

pub use thresholds::AlertThresholds;
pub use types::{IntervalStats, PairSnapshot, TradeDirection, Transaction};
pub use watchlist::{UserId, WatchList};
