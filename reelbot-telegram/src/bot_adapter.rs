//! Wraps teloxide::Bot and implements [`reelbot_core::RemoteClient`]. Production code talks to the
//! Bot API; tests can substitute another RemoteClient impl or point this one at a mock server.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reelbot_core::{
    BotIdentity, ConfigurationError, RemoteClient, RemoteError, WebhookOptions,
    WebhookRegistration,
};
use teloxide::payloads::setters::*;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use teloxide::RequestError;
use tracing::{debug, info, instrument};

use super::config::TelegramConfig;

/// Maps a teloxide request failure onto the transport-agnostic [`RemoteError`].
pub fn map_request_error(e: RequestError) -> RemoteError {
    match e {
        RequestError::Network(err) if err.is_timeout() => RemoteError::Timeout,
        RequestError::Network(err) => RemoteError::Network(err.to_string()),
        RequestError::Api(err) => RemoteError::Api(err.to_string()),
        other => RemoteError::Api(other.to_string()),
    }
}

/// teloxide-backed remote client. Holds the only Bot handle for the token; `close` drops it.
pub struct TelegramRemoteClient {
    bot: RwLock<Option<teloxide::Bot>>,
}

impl TelegramRemoteClient {
    /// Builds the HTTP client (with the configured timeout) and the Bot, honouring a custom API URL.
    pub fn new(config: &TelegramConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConfigurationError::Invalid {
                var: "TELEGRAM_TIMEOUT_SECS".to_string(),
                reason: e.to_string(),
            })?;
        let mut bot = teloxide::Bot::with_client(config.bot_token.clone(), client);
        if let Some(ref url_str) = config.telegram_api_url {
            let url = reqwest::Url::parse(url_str).map_err(|e| ConfigurationError::Invalid {
                var: "TELEGRAM_API_URL".to_string(),
                reason: e.to_string(),
            })?;
            bot = bot.set_api_url(url);
        }
        Ok(Self::from_bot(bot))
    }

    /// Wraps an existing teloxide Bot.
    pub fn from_bot(bot: teloxide::Bot) -> Self {
        Self {
            bot: RwLock::new(Some(bot)),
        }
    }

    /// True once `close` has run.
    pub fn is_closed(&self) -> bool {
        self.bot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }

    fn bot(&self) -> Result<teloxide::Bot, RemoteError> {
        self.bot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(RemoteError::Closed)
    }
}

#[async_trait]
impl RemoteClient for TelegramRemoteClient {
    #[instrument(skip(self, opts))]
    async fn register_webhook(&self, url: &str, opts: &WebhookOptions) -> Result<(), RemoteError> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| RemoteError::Api(format!("Invalid webhook url {}: {}", url, e)))?;
        let mut request = self
            .bot()?
            .set_webhook(url)
            .max_connections(opts.max_connections);
        if let Some(ref secret) = opts.secret_token {
            request = request.secret_token(secret.clone());
        }
        request.await.map_err(map_request_error)?;
        info!(max_connections = opts.max_connections, "Webhook registered");
        Ok(())
    }

    async fn get_webhook_status(&self) -> Result<WebhookRegistration, RemoteError> {
        let info = self
            .bot()?
            .get_webhook_info()
            .await
            .map_err(map_request_error)?;
        Ok(WebhookRegistration {
            url: info.url.map(|u| u.to_string()).unwrap_or_default(),
            max_connections: info.max_connections.map(u32::from),
            pending_update_count: info.pending_update_count,
            last_error: info.last_error_message,
        })
    }

    async fn get_self_info(&self) -> Result<BotIdentity, RemoteError> {
        let me = self.bot()?.get_me().await.map_err(map_request_error)?;
        Ok(BotIdentity {
            id: me.user.id.0,
            is_bot: me.user.is_bot,
            first_name: me.user.first_name.clone(),
            username: me.user.username.clone(),
        })
    }

    async fn send(&self, chat_id: i64, text: &str) -> Result<(), RemoteError> {
        self.bot()?
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(map_request_error)?;
        debug!(chat_id = chat_id, text_len = text.len(), "Message sent");
        Ok(())
    }

    async fn close(&self) {
        let released = self
            .bot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if released.is_some() {
            info!("Telegram client released");
        }
    }
}
