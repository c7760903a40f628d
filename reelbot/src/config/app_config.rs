//! AppConfig: Telegram connection + webhook + HTTP listener + logging. Loaded from env.

use std::env;
use std::net::SocketAddr;

use reelbot_core::{ConfigurationError, WebhookOptions};
use reelbot_runtime::{DEFAULT_DEDUP_TTL_SECS, MAX_WEBHOOK_CONNECTIONS};
use reelbot_telegram::TelegramConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_WEBHOOK_MAX_CONNECTIONS: u8 = 40;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// BOT_TOKEN, TELEGRAM_API_URL, TELEGRAM_TIMEOUT_SECS
    pub telegram: TelegramConfig,
    /// WEBHOOK_URL: public base URL; only the registration operation needs it
    pub webhook_url: Option<String>,
    /// WEBHOOK_SECRET
    pub webhook_secret: Option<String>,
    /// WEBHOOK_MAX_CONNECTIONS, clamped to 1..=100
    pub webhook_max_connections: u8,
    /// BIND_ADDR
    pub bind_addr: String,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
    /// UPDATE_DEDUP_TTL_SECS; 0 disables deduplication
    pub dedup_ttl_secs: u64,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigurationError> {
    match non_empty_var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigurationError::Invalid {
            var: name.to_string(),
            reason: format!("cannot parse {:?}", raw),
        }),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN if provided.
    /// Call validate() after load to fail fast before serving.
    pub fn load(token: Option<String>) -> Result<Self, ConfigurationError> {
        let telegram = TelegramConfig::load(token)?;
        let webhook_max_connections: u32 = parse_var(
            "WEBHOOK_MAX_CONNECTIONS",
            u32::from(DEFAULT_WEBHOOK_MAX_CONNECTIONS),
        )?;
        let webhook_max_connections =
            u8::try_from(webhook_max_connections.clamp(1, u32::from(MAX_WEBHOOK_CONNECTIONS)))
                .unwrap_or(MAX_WEBHOOK_CONNECTIONS);

        Ok(Self {
            telegram,
            webhook_url: non_empty_var("WEBHOOK_URL"),
            webhook_secret: non_empty_var("WEBHOOK_SECRET"),
            webhook_max_connections,
            bind_addr: non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            log_file: non_empty_var("LOG_FILE"),
            dedup_ttl_secs: parse_var("UPDATE_DEDUP_TTL_SECS", DEFAULT_DEDUP_TTL_SECS)?,
        })
    }

    /// Validates the Telegram part and the bind address.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.telegram.validate()?;
        self.bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigurationError::Invalid {
                var: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    pub fn webhook_options(&self) -> WebhookOptions {
        WebhookOptions {
            max_connections: self.webhook_max_connections,
            secret_token: self.webhook_secret.clone(),
        }
    }
}
