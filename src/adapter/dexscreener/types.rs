//! DexScreener API response DTOs and their pure transformations.
//!
//! Pair selection and transaction synthesis live here, off the network, so
//! the interesting behavior is testable from JSON fixtures.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{IntervalStats, PairSnapshot, TradeDirection, Transaction};

/// Response shape of both `/dex/tokens/{address}` and
/// `/dex/pairs/{chainId}/{pairAddress}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<PairDto>>,
}

impl PairsResponse {
    #[must_use]
    pub fn into_pairs(self) -> Vec<PairDto> {
        self.pairs.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDto {
    pub chain_id: String,
    pub pair_address: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub base_token: TokenDto,
    #[serde(default)]
    pub quote_token: TokenDto,
    /// Reported as a decimal string by the provider.
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub liquidity: Option<LiquidityDto>,
    #[serde(default)]
    pub txns: IntervalCounts,
    #[serde(default)]
    pub volume: IntervalVolumes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenDto {
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LiquidityDto {
    #[serde(default)]
    pub usd: f64,
}

/// Buy/sell counts per reporting interval.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct IntervalCounts {
    pub m5: Option<TxnCounts>,
    pub h1: Option<TxnCounts>,
    pub h6: Option<TxnCounts>,
    pub h24: Option<TxnCounts>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TxnCounts {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
}

/// USD volume per reporting interval.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct IntervalVolumes {
    pub m5: Option<f64>,
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

impl PairDto {
    #[must_use]
    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity.map(|l| l.usd).unwrap_or(0.0)
    }

    fn price_usd(&self) -> f64 {
        self.price_usd
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0.0)
    }

    /// Intervals that carry trade counts, in the provider's reporting order,
    /// with volume defaulting to zero when absent.
    #[must_use]
    pub fn intervals(&self) -> Vec<(String, IntervalStats)> {
        let labeled = [
            ("m5", self.txns.m5, self.volume.m5),
            ("h1", self.txns.h1, self.volume.h1),
            ("h6", self.txns.h6, self.volume.h6),
            ("h24", self.txns.h24, self.volume.h24),
        ];

        labeled
            .into_iter()
            .filter_map(|(label, counts, volume)| {
                counts.map(|c| {
                    (
                        label.to_string(),
                        IntervalStats {
                            buys: c.buys,
                            sells: c.sells,
                            volume_usd: volume.unwrap_or(0.0),
                        },
                    )
                })
            })
            .collect()
    }

    #[must_use]
    pub fn into_snapshot(self) -> PairSnapshot {
        let intervals = self.intervals();
        PairSnapshot {
            price_usd: self.price_usd(),
            liquidity_usd: self.liquidity_usd(),
            chain_id: self.chain_id,
            pair_address: self.pair_address,
            url: self.url,
            base_symbol: self.base_token.symbol,
            quote_symbol: self.quote_token.symbol,
            intervals,
        }
    }
}

/// Pick the pair with the highest USD liquidity; provider order breaks ties.
#[must_use]
pub fn most_liquid(pairs: Vec<PairDto>) -> Option<PairDto> {
    let mut best: Option<PairDto> = None;
    for pair in pairs {
        match &best {
            Some(current) if pair.liquidity_usd() <= current.liquidity_usd() => {}
            _ => best = Some(pair),
        }
    }
    best
}

/// Synthesize one transaction per recorded buy/sell count, dividing each
/// interval's volume evenly across its counts.
///
/// The provider exposes no per-trade feed, so every record is stamped with
/// `now` and carries no identity; identical interval stats synthesize
/// identical transactions again on the next call.
#[must_use]
pub fn synthesize_transactions(pair: &PairDto, now: DateTime<Utc>) -> Vec<Transaction> {
    let mut transactions = Vec::new();

    for (_, stats) in pair.intervals() {
        let total = stats.total();
        if total == 0 {
            continue;
        }
        let amount_usd = stats.volume_usd / total as f64;

        for _ in 0..stats.buys {
            transactions.push(Transaction {
                direction: TradeDirection::Buy,
                amount_usd,
                timestamp: now,
            });
        }
        for _ in 0..stats.sells {
            transactions.push(Transaction {
                direction: TradeDirection::Sell,
                amount_usd,
                timestamp: now,
            });
        }
    }

    transactions
}
