//! # reelbot-runtime
//!
//! Owns the process-wide [`ApplicationContext`] through [`LifecycleManager`]: lazy one-time
//! construction, dispatch of updates to handlers, webhook registration, health, and shutdown.

mod context;
mod dedup;
mod health;
mod lifecycle;
mod webhook;

pub use context::{ApplicationContext, ContextFactory};
pub use dedup::{UpdateDeduplicator, DEFAULT_DEDUP_TTL_SECS};
pub use health::HealthStatus;
pub use lifecycle::{DispatchOutcome, LifecycleManager, LifecycleState};
pub use webhook::{
    webhook_target_url, WebhookError, WebhookSetup, MAX_WEBHOOK_CONNECTIONS, WEBHOOK_PATH,
};
