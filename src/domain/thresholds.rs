//! Per-user alert thresholds.

use crate::domain::types::TradeDirection;

/// What a user's transactions must clear before they are notified.
///
/// One instance per user with at least one watched token, created with the
/// process defaults on the first `/watch` and mutated only by `/settings`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    /// Minimum USD amount; transactions strictly below it are dropped.
    pub min_amount_usd: f64,
    /// Direction filter; `None` passes both sides.
    pub direction: Option<TradeDirection>,
}

impl AlertThresholds {
    /// Thresholds a new user starts with.
    #[must_use]
    pub fn with_default_min(min_amount_usd: f64) -> Self {
        Self {
            min_amount_usd,
            direction: None,
        }
    }

    /// Human-readable direction label for replies.
    #[must_use]
    pub fn direction_label(&self) -> &'static str {
        match self.direction {
            None => "all",
            Some(TradeDirection::Buy) => "buy",
            Some(TradeDirection::Sell) => "sell",
        }
    }
}
