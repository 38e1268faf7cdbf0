//! End-to-end command handling against a stubbed market data source.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use dexwatch::adapter::telegram::CommandHandler;
use dexwatch::domain::filter::filter_transactions;
use dexwatch::domain::{
    AlertThresholds, IntervalStats, PairSnapshot, TradeDirection, Transaction, WatchList,
};
use dexwatch::market::MarketData;

const USER: i64 = 42;

/// Stub provider: a fixed set of known tokens with one snapshot each.
struct StubMarket {
    known_tokens: Vec<String>,
    transactions: Vec<Transaction>,
}

impl StubMarket {
    fn knowing(tokens: &[&str]) -> Self {
        Self {
            known_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            transactions: Vec::new(),
        }
    }
}

#[async_trait]
impl MarketData for StubMarket {
    async fn token_exists(&self, token_address: &str) -> bool {
        self.known_tokens.iter().any(|t| t == token_address)
    }

    async fn get_pair_snapshot(&self, token_address: &str) -> Option<PairSnapshot> {
        if !self.known_tokens.iter().any(|t| t == token_address) {
            return None;
        }
        Some(PairSnapshot {
            chain_id: "ethereum".into(),
            pair_address: "0xpair".into(),
            url: "https://dexscreener.com/ethereum/0xpair".into(),
            base_symbol: "WETH".into(),
            quote_symbol: "USDC".into(),
            price_usd: 1850.42,
            liquidity_usd: 1_000_000.0,
            intervals: vec![(
                "h1".into(),
                IntervalStats {
                    buys: 3,
                    sells: 2,
                    volume_usd: 500.0,
                },
            )],
        })
    }

    async fn get_recent_transactions(
        &self,
        _token_address: &str,
        thresholds: &AlertThresholds,
        window_secs: u64,
    ) -> Vec<Transaction> {
        filter_transactions(
            self.transactions.clone(),
            thresholds,
            window_secs,
            Utc::now(),
        )
    }
}

fn handler_with(market: StubMarket) -> (CommandHandler, Arc<WatchList>) {
    let watchlist = Arc::new(WatchList::new(1000.0));
    let handler = CommandHandler::new(watchlist.clone(), Arc::new(market));
    (handler, watchlist)
}

#[tokio::test]
async fn list_without_subscriptions_returns_no_tokens_message() {
    let (handler, _) = handler_with(StubMarket::knowing(&[]));

    let reply = handler.handle(USER, "/list").await.unwrap();
    assert_eq!(reply, "You have no watched tokens");
}

#[tokio::test]
async fn watch_unknown_token_is_rejected() {
    let (handler, watchlist) = handler_with(StubMarket::knowing(&[]));

    let reply = handler.handle(USER, "/watch 0xabc").await.unwrap();
    assert!(reply.contains("not found"));
    assert!(watchlist.list_watches(USER).is_empty());
}

#[tokio::test]
async fn watch_then_list_then_unwatch() {
    let (handler, watchlist) = handler_with(StubMarket::knowing(&["0xabc"]));

    let reply = handler.handle(USER, "/watch 0xabc").await.unwrap();
    assert!(reply.contains("Now watching 0xabc"));
    assert!(reply.contains("$1000.00"));
    assert!(reply.contains("all"));

    let reply = handler.handle(USER, "/list").await.unwrap();
    assert!(reply.contains("0xabc"));

    let reply = handler.handle(USER, "/unwatch 0xabc").await.unwrap();
    assert!(reply.contains("Stopped watching"));
    assert!(watchlist.list_watches(USER).is_empty());

    let reply = handler.handle(USER, "/unwatch 0xabc").await.unwrap();
    assert!(reply.contains("not being watched"));
}

#[tokio::test]
async fn duplicate_watch_is_reported() {
    let (handler, _) = handler_with(StubMarket::knowing(&["0xabc"]));

    handler.handle(USER, "/watch 0xabc").await.unwrap();
    let reply = handler.handle(USER, "/watch 0xabc").await.unwrap();
    assert!(reply.contains("already"));
}

#[tokio::test]
async fn settings_rejected_before_first_watch() {
    let (handler, _) = handler_with(StubMarket::knowing(&[]));

    let reply = handler.handle(USER, "/settings").await.unwrap();
    assert!(reply.contains("/watch"));

    let reply = handler.handle(USER, "/settings min 50").await.unwrap();
    assert!(reply.contains("/watch"));
}

#[tokio::test]
async fn settings_min_invalid_value_leaves_thresholds_unchanged() {
    let (handler, watchlist) = handler_with(StubMarket::knowing(&["0xabc"]));
    handler.handle(USER, "/watch 0xabc").await.unwrap();

    let reply = handler.handle(USER, "/settings min abc").await.unwrap();
    assert!(reply.contains("invalid amount"));

    let thresholds = watchlist.thresholds(USER).unwrap();
    assert_eq!(thresholds.min_amount_usd, 1000.0);
}

#[tokio::test]
async fn settings_mutate_thresholds() {
    let (handler, watchlist) = handler_with(StubMarket::knowing(&["0xabc"]));
    handler.handle(USER, "/watch 0xabc").await.unwrap();

    let reply = handler.handle(USER, "/settings min 250").await.unwrap();
    assert!(reply.contains("$250.00"));

    let reply = handler.handle(USER, "/settings type sell").await.unwrap();
    assert!(reply.contains("sell"));

    let thresholds = watchlist.thresholds(USER).unwrap();
    assert_eq!(thresholds.min_amount_usd, 250.0);
    assert_eq!(thresholds.direction, Some(TradeDirection::Sell));

    let reply = handler.handle(USER, "/settings type any").await.unwrap();
    assert!(reply.contains("all"));
    assert!(watchlist.thresholds(USER).unwrap().direction.is_none());
}

#[tokio::test]
async fn settings_type_rejects_unknown_direction() {
    let (handler, watchlist) = handler_with(StubMarket::knowing(&["0xabc"]));
    handler.handle(USER, "/watch 0xabc").await.unwrap();

    let reply = handler.handle(USER, "/settings type hold").await.unwrap();
    assert!(reply.contains("invalid transaction type"));
    assert!(watchlist.thresholds(USER).unwrap().direction.is_none());
}

#[tokio::test]
async fn last_tx_formats_snapshot() {
    let (handler, _) = handler_with(StubMarket::knowing(&["0xabc"]));

    let reply = handler.handle(USER, "/last_tx 0xabc").await.unwrap();
    assert!(reply.contains("WETH/USDC"));
    assert!(reply.contains("h1: 🟢 3 buys, 🔴 2 sells"));
}

#[tokio::test]
async fn last_tx_unknown_token_reports_failure() {
    let (handler, _) = handler_with(StubMarket::knowing(&[]));

    let reply = handler.handle(USER, "/last_tx 0xabc").await.unwrap();
    assert!(reply.contains("Could not fetch"));
}

#[tokio::test]
async fn help_and_start_share_usage_text() {
    let (handler, _) = handler_with(StubMarket::knowing(&[]));

    let start = handler.handle(USER, "/start").await.unwrap();
    let help = handler.handle(USER, "/help").await.unwrap();
    assert_eq!(start, help);
    assert!(help.contains("/watch"));
    assert!(help.contains("/last_tx"));
}

#[tokio::test]
async fn plain_text_gets_no_reply() {
    let (handler, _) = handler_with(StubMarket::knowing(&[]));

    assert!(handler.handle(USER, "gm").await.is_none());
}

#[tokio::test]
async fn unknown_command_gets_a_hint() {
    let (handler, _) = handler_with(StubMarket::knowing(&[]));

    let reply = handler.handle(USER, "/moon").await.unwrap();
    assert!(reply.contains("/help"));
}
