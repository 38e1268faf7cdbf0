//! Application configuration loading and validation.
//!
//! Configuration is read from an optional TOML file with environment variable
//! overrides for the bot token and the knobs the bot historically took from
//! the environment (`CHECK_INTERVAL`, `MIN_TRANSACTION_AMOUNT`). The bot
//! token is never read from the config file.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Base URL for the DexScreener REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

/// Telegram bot credentials.
///
/// The token is loaded from the `TELEGRAM_BOT_TOKEN` env var at runtime,
/// never from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramConfig {
    #[serde(skip)]
    pub bot_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Seconds between poll cycles. Also the time window passed to the
    /// notification filter.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertsConfig {
    /// Minimum USD amount a new user's thresholds start at.
    #[serde(default = "default_min_amount_usd")]
    pub default_min_amount_usd: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_api_url() -> String {
    "https://api.dexscreener.com/latest".to_string()
}

fn default_interval_secs() -> u64 {
    60
}

fn default_min_amount_usd() -> f64 {
    1000.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            default_min_amount_usd: default_min_amount_usd(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, then apply env overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.with_env_overrides()
    }

    /// Load from `path` if the file exists, otherwise start from defaults.
    /// Env overrides and validation apply either way.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Config::default().with_env_overrides()
        }
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = token;
        }
        if let Ok(raw) = std::env::var("CHECK_INTERVAL") {
            self.poller.interval_secs =
                raw.parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "CHECK_INTERVAL",
                        reason: format!("`{raw}` is not a whole number of seconds"),
                    })?;
        }
        if let Ok(raw) = std::env::var("MIN_TRANSACTION_AMOUNT") {
            self.alerts.default_min_amount_usd =
                raw.parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "MIN_TRANSACTION_AMOUNT",
                        reason: format!("`{raw}` is not a number"),
                    })?;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.is_empty() {
            return Err(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN",
            }
            .into());
        }
        if self.network.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if self.poller.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "poll interval must be at least one second".into(),
            }
            .into());
        }
        if self.alerts.default_min_amount_usd < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "default_min_amount_usd",
                reason: "minimum amount cannot be negative".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize tracing from the logging section, with `RUST_LOG` taking
    /// precedence when set.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
