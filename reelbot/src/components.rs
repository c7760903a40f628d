//! Composition root: the production [`ContextFactory`] and the handler registry.

use std::sync::Arc;

use reelbot_core::{BotIdentity, InitializationError, RemoteClient};
use reelbot_router::Router;
use reelbot_runtime::ContextFactory;
use reelbot_telegram::{TelegramConfig, TelegramRemoteClient};
use tracing::{info, instrument};

use crate::handlers::{HelpHandler, LinkHandler, StartHandler, UnknownCommandHandler};

/// Registers /start, /help, the link handler and the unknown-command fallback. Commands addressed
/// to another bot are ignored once our username is known.
pub fn build_router(identity: &BotIdentity) -> Router {
    Router::new()
        .add_command("start", Arc::new(StartHandler::new()))
        .add_command("help", Arc::new(HelpHandler::new()))
        .with_text(Arc::new(LinkHandler::new()))
        .with_unrecognized(Arc::new(UnknownCommandHandler::new()))
        .with_bot_username(identity.username.clone())
}

/// Builds the teloxide-backed client from [`TelegramConfig`].
pub struct TelegramContextFactory {
    config: TelegramConfig,
}

impl TelegramContextFactory {
    pub fn new(config: TelegramConfig) -> Self {
        Self { config }
    }
}

impl ContextFactory for TelegramContextFactory {
    #[instrument(skip(self))]
    fn create_client(&self) -> Result<Arc<dyn RemoteClient>, InitializationError> {
        let client = TelegramRemoteClient::new(&self.config)?;
        info!(
            custom_api_url = self.config.telegram_api_url.is_some(),
            timeout_secs = self.config.request_timeout_secs,
            "Telegram client created"
        );
        Ok(Arc::new(client))
    }

    fn build_router(&self, identity: &BotIdentity) -> Router {
        build_router(identity)
    }
}
