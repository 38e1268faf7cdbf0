//! Market data domain types.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Trade side relative to the base token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for TradeDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(()),
        }
    }
}

/// A single trade synthesized from a pair's interval statistics.
///
/// DexScreener's public API exposes only aggregate buy/sell counts and
/// volumes per interval, so these records carry no stable identity and are
/// timestamped at the moment they were synthesized. Unchanged interval
/// statistics can therefore produce the same transactions again on the
/// next poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub direction: TradeDirection,
    pub amount_usd: f64,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate buy/sell activity over one reporting interval (m5, h1, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntervalStats {
    pub buys: u64,
    pub sells: u64,
    pub volume_usd: f64,
}

impl IntervalStats {
    /// Total recorded trade count for the interval.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.buys + self.sells
    }
}

/// Snapshot of a token's most liquid trading pair.
///
/// Fetched fresh per query; never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSnapshot {
    pub chain_id: String,
    pub pair_address: String,
    pub url: String,
    pub base_symbol: String,
    pub quote_symbol: String,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    /// Interval label (as reported by the provider) paired with its stats,
    /// in provider order.
    pub intervals: Vec<(String, IntervalStats)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("buy".parse::<TradeDirection>(), Ok(TradeDirection::Buy));
        assert_eq!("SELL".parse::<TradeDirection>(), Ok(TradeDirection::Sell));
        assert!("hold".parse::<TradeDirection>().is_err());
    }

    #[test]
    fn interval_total_sums_both_sides() {
        let stats = IntervalStats {
            buys: 3,
            sells: 2,
            volume_usd: 500.0,
        };
        assert_eq!(stats.total(), 5);
    }
}
