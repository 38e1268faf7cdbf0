//! Background services: alert delivery and the polling loop.

mod notifier;
mod poller;

pub use notifier::{Event, LogNotifier, Notifier, TelegramNotifier};
pub use poller::Poller;
