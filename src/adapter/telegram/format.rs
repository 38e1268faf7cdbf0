//! Reply and alert message formatting.

use chrono::{DateTime, Utc};

use crate::domain::{AlertThresholds, PairSnapshot, Transaction};

pub const NO_TOKENS: &str = "You have no watched tokens";
pub const TOKEN_NOT_FOUND: &str = "Token not found. Check the address and try again.";
pub const TOKEN_NOT_TRACKED: &str = "That token is not being watched";
pub const SETTINGS_BEFORE_WATCH: &str = "Watch a token first with /watch <token_address>";
pub const PAIR_FETCH_FAILED: &str = "Could not fetch pair information for that token.";

fn thresholds_block(thresholds: &AlertThresholds) -> String {
    format!(
        "Current thresholds:\n\
         Minimum amount: ${:.2}\n\
         Transaction type: {}",
        thresholds.min_amount_usd,
        thresholds.direction_label()
    )
}

pub fn watch_added(token: &str, thresholds: &AlertThresholds) -> String {
    format!(
        "Now watching {token}\n{}",
        thresholds_block(thresholds)
    )
}

pub fn watch_already_present(token: &str) -> String {
    format!("{token} is already on your watch list")
}

pub fn watch_removed(token: &str) -> String {
    format!("Stopped watching {token}")
}

pub fn watch_list(tokens: &[String], thresholds: &AlertThresholds) -> String {
    format!(
        "Watched tokens:\n{}\n\n{}",
        tokens.join("\n"),
        thresholds_block(thresholds)
    )
}

pub fn settings_overview(thresholds: &AlertThresholds) -> String {
    format!(
        "{}\n\n\
         To change them:\n\
         /settings min <amount> - Set minimum USD amount\n\
         /settings type <buy|sell|any> - Filter by transaction type",
        thresholds_block(thresholds)
    )
}

pub fn min_amount_set(amount_usd: f64) -> String {
    format!("Minimum amount set: ${amount_usd:.2}")
}

pub fn direction_set(label: &str) -> String {
    format!("Transaction type set: {label}")
}

/// Alert pushed by the poller for one qualifying transaction.
pub fn transaction_alert(token: &str, tx: &Transaction) -> String {
    format!(
        "🔔 New transaction!\n\
         Token: {token}\n\
         Type: {}\n\
         Amount: ${:.2}\n\
         Time: {}",
        tx.direction,
        tx.amount_usd,
        format_time(tx.timestamp)
    )
}

/// `/last_tx` reply: pair header plus per-interval buy/sell counts.
pub fn pair_snapshot(snapshot: &PairSnapshot) -> String {
    let mut message = format!(
        "💱 Pair: {}/{}\n\
         🔗 Link: {}\n\
         💰 Price: ${:.6}\n\
         💧 Liquidity: ${:.2}\n\n\
         📊 Transaction stats:\n",
        snapshot.base_symbol,
        snapshot.quote_symbol,
        snapshot.url,
        snapshot.price_usd,
        snapshot.liquidity_usd
    );

    for (label, stats) in &snapshot.intervals {
        message.push_str(&format!(
            "{label}: 🟢 {} buys, 🔴 {} sells\n",
            stats.buys, stats.sells
        ));
    }

    message
}

fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}
