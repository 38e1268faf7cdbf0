//! Dexwatch - a Telegram bot that watches DexScreener token pairs.
//!
//! Users register token addresses with `/watch`; on a fixed interval the bot
//! polls the DexScreener API for each watched token's most liquid pair,
//! synthesizes recent transactions from the pair's interval statistics,
//! filters them against per-user thresholds, and pushes one alert per
//! qualifying transaction.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with env-var overrides
//! - [`domain`] - Market data types, per-user thresholds, the watch list,
//!   and the notification filter
//! - [`market`] - The market data port (trait boundary for the provider)
//! - [`adapter`] - DexScreener client and the Telegram command interface
//! - [`service`] - Alert delivery and the polling loop
//! - [`error`] - Error types for the crate
//! - [`app`] - Application wiring
//!
//! # Example
//!
//! ```no_run
//! use dexwatch::domain::WatchList;
//!
//! let watchlist = WatchList::new(1000.0);
//! let thresholds = watchlist.add_watch(42, "0xabc").unwrap();
//! assert_eq!(thresholds.min_amount_usd, 1000.0);
//! assert!(thresholds.direction.is_none());
//! ```

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod market;
pub mod service;
