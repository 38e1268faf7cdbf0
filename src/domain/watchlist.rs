//! In-memory subscription store.
//!
//! Maps each user to their watched token addresses and alert thresholds.
//! Process lifetime only; everything here is lost on restart.

use std::collections::{BTreeSet, HashMap};

use parking_lot::RwLock;

use crate::domain::thresholds::AlertThresholds;
use crate::domain::types::TradeDirection;

/// Numeric Telegram user identifier.
pub type UserId = i64;

#[derive(Debug)]
struct UserEntry {
    tokens: BTreeSet<String>,
    thresholds: AlertThresholds,
}

/// Shared watch list, safe to hand to both the command handlers and the
/// poller behind an `Arc`.
///
/// Invariant: a user has an entry (and therefore thresholds) iff they have
/// watched at least one token since the entry was created.
#[derive(Debug)]
pub struct WatchList {
    users: RwLock<HashMap<UserId, UserEntry>>,
    default_min_amount_usd: f64,
}

impl WatchList {
    #[must_use]
    pub fn new(default_min_amount_usd: f64) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            default_min_amount_usd,
        }
    }

    /// Add `token` to the user's watch set. The first watch initializes the
    /// user's thresholds to the process defaults. Returns the user's
    /// thresholds on insert, `None` if the token was already watched.
    pub fn add_watch(&self, user: UserId, token: &str) -> Option<AlertThresholds> {
        let mut users = self.users.write();
        let entry = users.entry(user).or_insert_with(|| UserEntry {
            tokens: BTreeSet::new(),
            thresholds: AlertThresholds::with_default_min(self.default_min_amount_usd),
        });
        entry.tokens.insert(token.to_string()).then_some(entry.thresholds)
    }

    /// Remove `token` from the user's watch set. Returns `false` when the
    /// token was not being watched.
    pub fn remove_watch(&self, user: UserId, token: &str) -> bool {
        let mut users = self.users.write();
        users
            .get_mut(&user)
            .map(|entry| entry.tokens.remove(token))
            .unwrap_or(false)
    }

    /// The user's watched tokens, sorted for stable display.
    #[must_use]
    pub fn list_watches(&self, user: UserId) -> Vec<String> {
        self.users
            .read()
            .get(&user)
            .map(|entry| entry.tokens.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The user's thresholds, or `None` if they have never watched a token.
    #[must_use]
    pub fn thresholds(&self, user: UserId) -> Option<AlertThresholds> {
        self.users.read().get(&user).map(|entry| entry.thresholds)
    }

    /// Set the user's minimum USD amount. Returns `false` for users with no
    /// thresholds yet (nothing watched).
    pub fn set_min_amount(&self, user: UserId, min_amount_usd: f64) -> bool {
        let mut users = self.users.write();
        match users.get_mut(&user) {
            Some(entry) => {
                entry.thresholds.min_amount_usd = min_amount_usd;
                true
            }
            None => false,
        }
    }

    /// Set or clear the user's direction filter. Returns `false` for users
    /// with no thresholds yet.
    pub fn set_direction(&self, user: UserId, direction: Option<TradeDirection>) -> bool {
        let mut users = self.users.write();
        match users.get_mut(&user) {
            Some(entry) => {
                entry.thresholds.direction = direction;
                true
            }
            None => false,
        }
    }

    /// Snapshot of every `(user, token, thresholds)` subscription for one
    /// poll cycle.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<(UserId, String, AlertThresholds)> {
        let users = self.users.read();
        let mut subs = Vec::new();
        for (user, entry) in users.iter() {
            for token in &entry.tokens {
                subs.push((*user, token.clone(), entry.thresholds));
            }
        }
        subs
    }
}
