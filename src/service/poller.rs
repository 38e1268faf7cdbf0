//! Periodic transaction polling.
//!
//! One task owns the interval timer: each tick snapshots the current
//! subscriptions, queries the provider per `(user, token)` pair, filters
//! against that user's thresholds, and emits one alert per surviving
//! transaction. Ticks are awaited in sequence, so a slow cycle delays the
//! next one instead of overlapping it.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::WatchList;
use crate::market::MarketData;
use crate::service::notifier::{Event, Notifier};

/// The polling loop.
pub struct Poller {
    watchlist: Arc<WatchList>,
    market: Arc<dyn MarketData>,
    notifier: Arc<dyn Notifier>,
    interval_secs: u64,
}

impl Poller {
    #[must_use]
    pub fn new(
        watchlist: Arc<WatchList>,
        market: Arc<dyn MarketData>,
        notifier: Arc<dyn Notifier>,
        interval_secs: u64,
    ) -> Self {
        Self {
            watchlist,
            market,
            notifier,
            interval_secs,
        }
    }

    /// Run forever. The poll interval doubles as the filter time window.
    pub async fn run(self) {
        let mut ticker = interval(Duration::from_secs(self.interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so a fresh start does not
        // alert before anything is watched.
        ticker.tick().await;

        info!(interval_secs = self.interval_secs, "Poller started");

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// One poll cycle over a snapshot of the current subscriptions.
    pub async fn poll_once(&self) {
        let subscriptions = self.watchlist.subscriptions();
        debug!(subscriptions = subscriptions.len(), "Poll cycle started");

        for (user, token, thresholds) in subscriptions {
            let transactions = self
                .market
                .get_recent_transactions(&token, &thresholds, self.interval_secs)
                .await;

            for transaction in transactions {
                self.notifier.notify(Event::TransactionAlert {
                    user,
                    token: token.clone(),
                    transaction,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;

    use crate::domain::filter::filter_transactions;
    use crate::domain::{AlertThresholds, PairSnapshot, TradeDirection, Transaction};

    /// Market stub that serves a fixed transaction list per token.
    struct FixedMarket {
        transactions: Vec<Transaction>,
    }

    #[async_trait]
    impl MarketData for FixedMarket {
        async fn token_exists(&self, _token: &str) -> bool {
            true
        }

        async fn get_pair_snapshot(&self, _token: &str) -> Option<PairSnapshot> {
            None
        }

        async fn get_recent_transactions(
            &self,
            _token: &str,
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

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<Event>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, event: Event) {
            self.events.lock().push(event);
        }
    }

    fn tx(direction: TradeDirection, amount_usd: f64) -> Transaction {
        Transaction {
            direction,
            amount_usd,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn poll_emits_one_alert_per_qualifying_transaction() {
        let watchlist = Arc::new(WatchList::new(100.0));
        let _ = watchlist.add_watch(7, "0xabc");

        let market = Arc::new(FixedMarket {
            transactions: vec![
                tx(TradeDirection::Buy, 500.0),
                tx(TradeDirection::Sell, 50.0),
                tx(TradeDirection::Sell, 200.0),
            ],
        });
        let notifier = Arc::new(RecordingNotifier::default());

        let poller = Poller::new(watchlist, market, notifier.clone(), 60);
        poller.poll_once().await;

        let events = notifier.events.lock();
        assert_eq!(events.len(), 2);
        for event in events.iter() {
            let Event::TransactionAlert { user, token, .. } = event;
            assert_eq!(*user, 7);
            assert_eq!(token, "0xabc");
        }
    }

    #[tokio::test]
    async fn poll_applies_per_user_thresholds() {
        let watchlist = Arc::new(WatchList::new(100.0));
        let _ = watchlist.add_watch(1, "0xabc");
        let _ = watchlist.add_watch(2, "0xabc");
        watchlist.set_direction(2, Some(TradeDirection::Sell));

        let market = Arc::new(FixedMarket {
            transactions: vec![
                tx(TradeDirection::Buy, 500.0),
                tx(TradeDirection::Sell, 500.0),
            ],
        });
        let notifier = Arc::new(RecordingNotifier::default());

        let poller = Poller::new(watchlist, market, notifier.clone(), 60);
        poller.poll_once().await;

        let events = notifier.events.lock();
        let alerts_for = |target: i64| {
            events
                .iter()
                .filter(|e| matches!(e, Event::TransactionAlert { user, .. } if *user == target))
                .count()
        };
        let user1 = alerts_for(1);
        let user2 = alerts_for(2);
        assert_eq!(user1, 2);
        assert_eq!(user2, 1);
    }

    #[tokio::test]
    async fn poll_with_no_subscriptions_is_quiet() {
        let watchlist = Arc::new(WatchList::new(100.0));
        let market = Arc::new(FixedMarket {
            transactions: vec![tx(TradeDirection::Buy, 500.0)],
        });
        let notifier = Arc::new(RecordingNotifier::default());

        let poller = Poller::new(watchlist, market, notifier.clone(), 60);
        poller.poll_once().await;

        assert!(notifier.events.lock().is_empty());
    }
}
