//! Outbound adapters: the market data provider and the chat interface.

pub mod dexscreener;
pub mod telegram;
