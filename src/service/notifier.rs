//! Alert delivery.
//!
//! The poller emits [`Event`]s through a [`Notifier`]; the Telegram
//! implementation queues them onto an unbounded channel and a background
//! worker delivers them one message per event. A failed send (for example a
//! user who blocked the bot) is logged and never affects other events.

use teloxide::prelude::*;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::adapter::telegram::format;
use crate::domain::{Transaction, UserId};

/// An alert destined for one user.
#[derive(Debug, Clone)]
pub enum Event {
    TransactionAlert {
        user: UserId,
        token: String,
        transaction: Transaction,
    },
}

/// Outbound alert sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Event);
}

/// Notifier that only logs events. Used in tests and as a delivery trace.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        let Event::TransactionAlert {
            user,
            token,
            transaction,
        } = event;
        info!(
            user,
            token = %token,
            direction = %transaction.direction,
            amount_usd = transaction.amount_usd,
            "Transaction alert"
        );
    }
}

/// Telegram notifier that sends one chat message per event.
pub struct TelegramNotifier {
    sender: mpsc::UnboundedSender<Event>,
}

impl TelegramNotifier {
    /// Create a new notifier and spawn the delivery worker.
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        tokio::spawn(telegram_worker(bot, receiver));

        Self { sender }
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, event: Event) {
        if self.sender.send(event).is_err() {
            warn!("Telegram notifier channel closed");
        }
    }
}

/// Background worker that delivers queued alerts.
async fn telegram_worker(bot: Bot, mut receiver: mpsc::UnboundedReceiver<Event>) {
    info!("Telegram notifier started");

    while let Some(event) = receiver.recv().await {
        let Event::TransactionAlert {
            user,
            token,
            transaction,
        } = event;

        let text = format::transaction_alert(&token, &transaction);
        if let Err(e) = bot.send_message(ChatId(user), text).await {
            error!(user, error = %e, "Failed to send alert");
        }
    }

    warn!("Telegram notifier worker shutting down");
}
