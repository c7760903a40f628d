//! Health check: acquire the context, then ask the platform who we are. Never fails; the result
//! always carries an explicit status discriminant.

use reelbot_core::BotIdentity;
use serde::Serialize;
use tracing::warn;

use crate::lifecycle::LifecycleManager;

/// Serializes as `{"status":"ok","bot_info":{...}}` or `{"status":"error","error":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthStatus {
    Ok { bot_info: BotIdentity },
    Error { error: String },
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, HealthStatus::Ok { .. })
    }
}

impl LifecycleManager {
    pub async fn health_check(&self) -> HealthStatus {
        let ctx = match self.acquire().await {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(error = %e, "Health check: context unavailable");
                return HealthStatus::Error {
                    error: e.to_string(),
                };
            }
        };
        match ctx.client().get_self_info().await {
            Ok(bot_info) => HealthStatus::Ok { bot_info },
            Err(e) => {
                warn!(error = %e, "Health check: identity call failed");
                HealthStatus::Error {
                    error: e.to_string(),
                }
            }
        }
    }
}
