//! Command dispatch.
//!
//! Each command is a direct translation into one or two watch-list or market
//! data calls followed by a formatted reply.

use std::sync::Arc;

use crate::domain::{UserId, WatchList};
use crate::market::MarketData;

use super::command::{command_help, parse_command, BotCommand, CommandParseError};
use super::format;

/// Stateless command handler shared by the Telegram listener.
#[derive(Clone)]
pub struct CommandHandler {
    watchlist: Arc<WatchList>,
    market: Arc<dyn MarketData>,
}

impl CommandHandler {
    #[must_use]
    pub fn new(watchlist: Arc<WatchList>, market: Arc<dyn MarketData>) -> Self {
        Self { watchlist, market }
    }

    /// Build a reply for one inbound message, or `None` for plain text that
    /// is not a command.
    pub async fn handle(&self, user: UserId, text: &str) -> Option<String> {
        let command = match parse_command(text) {
            Ok(command) => command,
            Err(CommandParseError::NotACommand) => return None,
            Err(e) => return Some(e.to_string()),
        };

        Some(self.dispatch(user, command).await)
    }

    async fn dispatch(&self, user: UserId, command: BotCommand) -> String {
        match command {
            BotCommand::Start | BotCommand::Help => command_help().to_string(),
            BotCommand::Watch { token } => self.watch(user, &token).await,
            BotCommand::Unwatch { token } => {
                if self.watchlist.remove_watch(user, &token) {
                    format::watch_removed(&token)
                } else {
                    format::TOKEN_NOT_TRACKED.to_string()
                }
            }
            BotCommand::List => self.list(user),
            BotCommand::ShowSettings => match self.watchlist.thresholds(user) {
                Some(thresholds) => format::settings_overview(&thresholds),
                None => format::SETTINGS_BEFORE_WATCH.to_string(),
            },
            BotCommand::SetMinAmount { amount_usd } => {
                if self.watchlist.set_min_amount(user, amount_usd) {
                    format::min_amount_set(amount_usd)
                } else {
                    format::SETTINGS_BEFORE_WATCH.to_string()
                }
            }
            BotCommand::SetDirection { direction } => {
                if self.watchlist.set_direction(user, direction) {
                    let label = self
                        .watchlist
                        .thresholds(user)
                        .map(|t| t.direction_label())
                        .unwrap_or("all");
                    format::direction_set(label)
                } else {
                    format::SETTINGS_BEFORE_WATCH.to_string()
                }
            }
            BotCommand::LastTx { token } => match self.market.get_pair_snapshot(&token).await {
                Some(snapshot) => format::pair_snapshot(&snapshot),
                None => format::PAIR_FETCH_FAILED.to_string(),
            },
        }
    }

    async fn watch(&self, user: UserId, token: &str) -> String {
        if !self.market.token_exists(token).await {
            return format::TOKEN_NOT_FOUND.to_string();
        }

        match self.watchlist.add_watch(user, token) {
            Some(thresholds) => format::watch_added(token, &thresholds),
            None => format::watch_already_present(token),
        }
    }

    fn list(&self, user: UserId) -> String {
        let tokens = self.watchlist.list_watches(user);
        if tokens.is_empty() {
            return format::NO_TOKENS.to_string();
        }
        match self.watchlist.thresholds(user) {
            Some(thresholds) => format::watch_list(&tokens, &thresholds),
            None => format::NO_TOKENS.to_string(),
        }
    }
}
