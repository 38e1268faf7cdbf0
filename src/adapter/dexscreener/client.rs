//! DexScreener REST API client.
//!
//! One or two outbound requests per call: the token lookup resolves the most
//! liquid pair, then the pair endpoint returns its detailed statistics.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, warn};

use super::types::{most_liquid, synthesize_transactions, PairDto, PairsResponse};
use crate::domain::filter::filter_transactions;
use crate::domain::{AlertThresholds, PairSnapshot, Transaction};
use crate::error::{Error, Result};
use crate::market::MarketData;

/// HTTP client for the DexScreener REST API.
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    /// Create a new client with the given base URL
    /// (e.g. `https://api.dexscreener.com/latest`).
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn fetch_pairs(&self, url: &str) -> Result<Vec<PairDto>> {
        debug!(url = %url, "Fetching pairs");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let payload: PairsResponse = response.json().await?;
        Ok(payload.into_pairs())
    }

    /// Resolve the token's most liquid pair from the token endpoint.
    async fn resolve_pair(&self, token_address: &str) -> Result<Option<PairDto>> {
        let url = format!("{}/dex/tokens/{}", self.base_url, token_address);
        let pairs = self.fetch_pairs(&url).await?;
        Ok(most_liquid(pairs))
    }

    /// Fetch the detailed view of a resolved pair from the pair endpoint.
    async fn pair_details(&self, pair: &PairDto) -> Result<Option<PairDto>> {
        let url = format!(
            "{}/dex/pairs/{}/{}",
            self.base_url, pair.chain_id, pair.pair_address
        );
        let mut pairs = self.fetch_pairs(&url).await?;
        if pairs.is_empty() {
            return Ok(None);
        }
        Ok(Some(pairs.remove(0)))
    }

    async fn try_snapshot(&self, token_address: &str) -> Result<Option<PairSnapshot>> {
        let Some(pair) = self.resolve_pair(token_address).await? else {
            return Ok(None);
        };
        let Some(details) = self.pair_details(&pair).await? else {
            return Ok(None);
        };
        Ok(Some(details.into_snapshot()))
    }

    async fn try_transactions(&self, token_address: &str) -> Result<Vec<Transaction>> {
        let Some(pair) = self.resolve_pair(token_address).await? else {
            return Ok(Vec::new());
        };
        let Some(details) = self.pair_details(&pair).await? else {
            return Ok(Vec::new());
        };
        Ok(synthesize_transactions(&details, Utc::now()))
    }
}

#[async_trait]
impl MarketData for DexScreenerClient {
    async fn token_exists(&self, token_address: &str) -> bool {
        match self.resolve_pair(token_address).await {
            Ok(pair) => pair.is_some(),
            Err(e) => {
                warn!(token = %token_address, error = %e, "Token lookup failed");
                false
            }
        }
    }

    async fn get_pair_snapshot(&self, token_address: &str) -> Option<PairSnapshot> {
        match self.try_snapshot(token_address).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(token = %token_address, error = %e, "Snapshot fetch failed");
                None
            }
        }
    }

    async fn get_recent_transactions(
        &self,
        token_address: &str,
        thresholds: &AlertThresholds,
        window_secs: u64,
    ) -> Vec<Transaction> {
        let transactions = match self.try_transactions(token_address).await {
            Ok(txs) => txs,
            Err(e) => {
                warn!(token = %token_address, error = %e, "Transaction fetch failed");
                return Vec::new();
            }
        };

        filter_transactions(transactions, thresholds, window_secs, Utc::now())
    }
}
