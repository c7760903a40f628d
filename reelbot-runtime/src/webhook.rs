//! Webhook registration: builds the target URL from the public base URL, registers it, and reports
//! the live registration as the platform sees it afterwards.

use reelbot_core::{
    ConfigurationError, LifecycleError, RemoteError, WebhookOptions, WebhookRegistration,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::lifecycle::LifecycleManager;

/// Path the platform pushes updates to, relative to the public base URL.
pub const WEBHOOK_PATH: &str = "/api/webhook";

/// Platform limit for the connection-count hint.
pub const MAX_WEBHOOK_CONNECTIONS: u8 = 100;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Successful registration: the URL we asked for and what the platform now reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookSetup {
    pub webhook_url: String,
    pub webhook_info: WebhookRegistration,
}

/// Trims surrounding whitespace, strips exactly one trailing slash from `base_url` and appends
/// [`WEBHOOK_PATH`].
pub fn webhook_target_url(base_url: Option<&str>) -> Result<String, ConfigurationError> {
    let base = base_url
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ConfigurationError::Missing("WEBHOOK_URL".to_string()))?;
    let base = base.strip_suffix('/').unwrap_or(base);
    Ok(format!("{}{}", base, WEBHOOK_PATH))
}

impl LifecycleManager {
    /// Registers the webhook and re-queries the platform for the live registration. Registering
    /// the same URL twice leaves the same registration in place.
    #[instrument(skip(self, opts))]
    pub async fn register_webhook(
        &self,
        base_url: Option<&str>,
        opts: &WebhookOptions,
    ) -> Result<WebhookSetup, WebhookError> {
        let webhook_url = webhook_target_url(base_url)?;
        let ctx = self.acquire().await?;

        let opts = WebhookOptions {
            max_connections: opts.max_connections.clamp(1, MAX_WEBHOOK_CONNECTIONS),
            secret_token: opts.secret_token.clone(),
        };
        ctx.client().register_webhook(&webhook_url, &opts).await?;
        let webhook_info = ctx.client().get_webhook_status().await?;

        info!(
            webhook_url = %webhook_url,
            reported_url = %webhook_info.url,
            pending_update_count = webhook_info.pending_update_count,
            "Webhook set"
        );
        Ok(WebhookSetup {
            webhook_url,
            webhook_info,
        })
    }

    /// Current registration, fetched fresh.
    pub async fn webhook_status(&self) -> Result<WebhookRegistration, WebhookError> {
        let ctx = self.acquire().await?;
        Ok(ctx.client().get_webhook_status().await?)
    }
}
