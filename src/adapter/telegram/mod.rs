//! Telegram chat interface: command parsing, dispatch, and formatting.

pub mod command;
pub mod format;
mod handler;

pub use handler::CommandHandler;
