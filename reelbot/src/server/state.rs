//! Shared state for the axum handlers.

use std::sync::Arc;

use reelbot_core::WebhookOptions;
use reelbot_runtime::{LifecycleManager, UpdateDeduplicator};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<LifecycleManager>,
    /// `None` when deduplication is disabled.
    pub dedup: Option<Arc<UpdateDeduplicator>>,
    pub webhook_base_url: Option<String>,
    pub webhook_options: WebhookOptions,
}

impl AppState {
    pub fn new(manager: Arc<LifecycleManager>, config: &AppConfig) -> Self {
        let dedup = (config.dedup_ttl_secs > 0)
            .then(|| Arc::new(UpdateDeduplicator::new(config.dedup_ttl_secs)));
        Self {
            manager,
            dedup,
            webhook_base_url: config.webhook_url.clone(),
            webhook_options: config.webhook_options(),
        }
    }

    /// The configured secret, if any, inbound webhook requests must carry.
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_options.secret_token.as_deref()
    }
}
