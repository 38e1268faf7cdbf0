//! Application wiring.
//!
//! Builds the shared watch list, the provider client, and the alert
//! notifier, spawns the poller, and runs the Telegram command listener on
//! the foreground task.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, warn};

use crate::adapter::dexscreener::DexScreenerClient;
use crate::adapter::telegram::{command::bot_commands, CommandHandler};
use crate::config::Config;
use crate::domain::WatchList;
use crate::error::Result;
use crate::market::MarketData;
use crate::service::{Poller, TelegramNotifier};

/// Main application struct.
pub struct App;

impl App {
    /// Run the bot until the process is stopped.
    pub async fn run(config: Config) -> Result<()> {
        let bot = Bot::new(&config.telegram.bot_token);

        let watchlist = Arc::new(WatchList::new(config.alerts.default_min_amount_usd));
        let market: Arc<dyn MarketData> =
            Arc::new(DexScreenerClient::new(config.network.api_url.clone()));
        let notifier = Arc::new(TelegramNotifier::new(bot.clone()));

        let poller = Poller::new(
            watchlist.clone(),
            market.clone(),
            notifier,
            config.poller.interval_secs,
        );
        tokio::spawn(poller.run());

        if let Err(e) = register_bot_commands(&bot).await {
            warn!(error = %e, "Failed to register bot commands with Telegram");
        }

        info!("Command listener started");

        let handler = CommandHandler::new(watchlist, market);
        teloxide::repl(bot, move |bot: Bot, msg: Message| {
            let handler = handler.clone();
            async move {
                let Some(text) = msg.text() else {
                    return respond(());
                };

                if let Some(reply) = handler.handle(msg.chat.id.0, text).await {
                    if let Err(e) = bot.send_message(msg.chat.id, reply).await {
                        error!(error = %e, "Failed to send command response");
                    }
                }

                respond(())
            }
        })
        .await;

        Ok(())
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<()> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
