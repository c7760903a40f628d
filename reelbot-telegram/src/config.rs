//! Minimal transport config: token, API URL, request timeout.
//! Loaded from BOT_TOKEN (or TELEGRAM_BOT_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL), TELEGRAM_TIMEOUT_SECS.

use std::env;

use reelbot_core::ConfigurationError;

/// Default per-request timeout for Bot API calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Telegram connection config.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl TelegramConfig {
    /// Loads from env. A missing or empty token is a [`ConfigurationError::Missing`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::load(None)
    }

    /// Loads from env; `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self, ConfigurationError> {
        let bot_token = token
            .or_else(|| {
                env::var("BOT_TOKEN")
                    .or_else(|_| env::var("TELEGRAM_BOT_TOKEN"))
                    .ok()
            })
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigurationError::Missing("BOT_TOKEN".to_string()))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let request_timeout_secs = match env::var("TELEGRAM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigurationError::Invalid {
                var: "TELEGRAM_TIMEOUT_SECS".to_string(),
                reason: format!("not a number: {}", raw),
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        Ok(Self {
            bot_token,
            telegram_api_url,
            request_timeout_secs,
        })
    }

    /// Builds a config with the given token and defaults for the rest.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Checks the token is non-empty and the API URL (if set) parses.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigurationError::Missing("BOT_TOKEN".to_string()));
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if let Err(e) = reqwest::Url::parse(url_str) {
                return Err(ConfigurationError::Invalid {
                    var: "TELEGRAM_API_URL".to_string(),
                    reason: e.to_string(),
                });
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigurationError::Invalid {
                var: "TELEGRAM_TIMEOUT_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
