//! Telegram command parsing.

use std::str::FromStr;

use crate::domain::TradeDirection;

/// Supported bot commands.
#[derive(Debug, Clone, PartialEq)]
pub enum BotCommand {
    Start,
    Help,
    Watch { token: String },
    Unwatch { token: String },
    List,
    ShowSettings,
    SetMinAmount { amount_usd: f64 },
    /// `None` clears the direction filter (`/settings type any`).
    SetDirection { direction: Option<TradeDirection> },
    LastTx { token: String },
}

/// Parse error for command messages. Rendered straight back to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    MissingArgument(&'static str),
    UnknownSetting(String),
    InvalidAmount(String),
    InvalidDirection(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => {
                write!(f, "unknown command `{cmd}` (see /help)")
            }
            Self::MissingArgument(name) => write!(f, "missing argument `{name}`"),
            Self::UnknownSetting(name) => {
                write!(f, "unknown setting `{name}` (use: min, type)")
            }
            Self::InvalidAmount(value) => write!(f, "invalid amount `{value}`"),
            Self::InvalidDirection(value) => {
                write!(f, "invalid transaction type `{value}` (use: buy, sell, any)")
            }
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
pub fn parse_command(text: &str) -> Result<BotCommand, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(BotCommand::Start),
        "/help" => Ok(BotCommand::Help),
        "/list" => Ok(BotCommand::List),
        "/watch" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("token_address"))?;
            Ok(BotCommand::Watch {
                token: token.to_string(),
            })
        }
        "/unwatch" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("token_address"))?;
            Ok(BotCommand::Unwatch {
                token: token.to_string(),
            })
        }
        "/last_tx" => {
            let token = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("token_address"))?;
            Ok(BotCommand::LastTx {
                token: token.to_string(),
            })
        }
        "/settings" => parse_settings(parts),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_settings<'a, I>(mut parts: I) -> Result<BotCommand, CommandParseError>
where
    I: Iterator<Item = &'a str>,
{
    let Some(setting) = parts.next() else {
        return Ok(BotCommand::ShowSettings);
    };

    match setting.to_ascii_lowercase().as_str() {
        "min" => {
            let raw = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("amount"))?;
            let amount_usd = f64::from_str(raw)
                .ok()
                .filter(|a| a.is_finite() && *a >= 0.0)
                .ok_or_else(|| CommandParseError::InvalidAmount(raw.to_string()))?;
            Ok(BotCommand::SetMinAmount { amount_usd })
        }
        "type" => {
            let raw = parts
                .next()
                .ok_or(CommandParseError::MissingArgument("type"))?;
            let direction = match raw.to_ascii_lowercase().as_str() {
                "any" | "all" => None,
                other => Some(
                    TradeDirection::from_str(other)
                        .map_err(|()| CommandParseError::InvalidDirection(raw.to_string()))?,
                ),
            };
            Ok(BotCommand::SetDirection { direction })
        }
        other => Err(CommandParseError::UnknownSetting(other.to_string())),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "👋 I watch DexScreener pairs and alert you about qualifying trades.\n\n\
     /watch <token_address> - 👁 Start watching a token\n\
     /unwatch <token_address> - 🚫 Stop watching a token\n\
     /list - 📋 Watched tokens and current thresholds\n\
     /settings - ⚙️ Show alert thresholds\n\
     /settings min <amount> - 💵 Set minimum USD amount\n\
     /settings type <buy|sell|any> - 🔄 Filter by transaction type\n\
     /last_tx <token_address> - 📊 Latest pair snapshot\n\
     /help - Show this message"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("watch", "Start watching a token"),
        ("unwatch", "Stop watching a token"),
        ("list", "Watched tokens and thresholds"),
        ("settings", "Show or change alert thresholds"),
        ("last_tx", "Latest pair snapshot for a token"),
        ("help", "Show all commands"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("/start").unwrap(), BotCommand::Start);
        assert_eq!(parse_command("/help").unwrap(), BotCommand::Help);
        assert_eq!(parse_command("/list").unwrap(), BotCommand::List);
    }

    #[test]
    fn parse_watch_with_token() {
        assert_eq!(
            parse_command("/watch 0xabc").unwrap(),
            BotCommand::Watch {
                token: "0xabc".to_string()
            }
        );
    }

    #[test]
    fn parse_watch_without_token() {
        assert_eq!(
            parse_command("/watch"),
            Err(CommandParseError::MissingArgument("token_address"))
        );
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(
            parse_command("/list@dexwatch_bot").unwrap(),
            BotCommand::List
        );
    }

    #[test]
    fn parse_settings_show() {
        assert_eq!(parse_command("/settings").unwrap(), BotCommand::ShowSettings);
    }

    #[test]
    fn parse_settings_min() {
        assert_eq!(
            parse_command("/settings min 250.5").unwrap(),
            BotCommand::SetMinAmount { amount_usd: 250.5 }
        );
    }

    #[test]
    fn parse_settings_min_rejects_non_numeric() {
        assert_eq!(
            parse_command("/settings min abc"),
            Err(CommandParseError::InvalidAmount("abc".to_string()))
        );
    }

    #[test]
    fn parse_settings_min_rejects_negative() {
        assert!(matches!(
            parse_command("/settings min -5"),
            Err(CommandParseError::InvalidAmount(_))
        ));
    }

    #[test]
    fn parse_settings_type() {
        use crate::domain::TradeDirection;

        assert_eq!(
            parse_command("/settings type buy").unwrap(),
            BotCommand::SetDirection {
                direction: Some(TradeDirection::Buy)
            }
        );
        assert_eq!(
            parse_command("/settings type any").unwrap(),
            BotCommand::SetDirection { direction: None }
        );
    }

    #[test]
    fn parse_settings_type_rejects_other_values() {
        assert_eq!(
            parse_command("/settings type hold"),
            Err(CommandParseError::InvalidDirection("hold".to_string()))
        );
    }

    #[test]
    fn parse_settings_unknown_setting() {
        assert!(matches!(
            parse_command("/settings volume 5"),
            Err(CommandParseError::UnknownSetting(_))
        ));
    }

    #[test]
    fn non_command_text_is_ignored() {
        assert_eq!(parse_command("hello"), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command("   "), Err(CommandParseError::NotACommand));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert!(matches!(
            parse_command("/moon"),
            Err(CommandParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn bot_commands_cover_the_surface() {
        let commands = bot_commands();
        for expected in ["watch", "unwatch", "list", "settings", "last_tx", "help"] {
            assert!(commands.iter().any(|(c, _)| *c == expected));
        }
    }
}
