//! Remote client abstraction for the messaging-platform API.
//!
//! [`RemoteClient`] is transport-agnostic; the teloxide implementation lives in reelbot-telegram.
//! Every call is network I/O and may fail or time out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;

/// Options passed along with a webhook registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOptions {
    /// Upper bound on simultaneous HTTPS connections the platform opens to us.
    pub max_connections: u8,
    /// Echoed back by the platform in the secret-token header of each push.
    pub secret_token: Option<String>,
}

/// Live webhook registration as reported by the platform. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRegistration {
    /// Empty when no webhook is set.
    pub url: String,
    pub max_connections: Option<u32>,
    pub pending_update_count: u32,
    pub last_error: Option<String>,
}

/// The bot account behind the token, as returned by the identity handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    pub id: u64,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

/// Outbound API used to register the webhook and to send replies.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Points the platform's push delivery at `url`.
    async fn register_webhook(&self, url: &str, opts: &WebhookOptions) -> Result<(), RemoteError>;
    /// Fetches the currently configured webhook.
    async fn get_webhook_status(&self) -> Result<WebhookRegistration, RemoteError>;
    /// Confirms the token and returns the bot's identity.
    async fn get_self_info(&self) -> Result<BotIdentity, RemoteError>;
    /// Sends a text message to the given chat.
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), RemoteError>;
    /// Releases the underlying connection resources. Later calls fail with [`RemoteError::Closed`].
    async fn close(&self);
}
