//! In-process deduplication of webhook updates by `update_id`.
//!
//! The platform re-delivers an update when our response is slow or lost; within the TTL window a
//! repeated id is acknowledged without being dispatched again.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default TTL of the seen-ids window.
pub const DEFAULT_DEDUP_TTL_SECS: u64 = 600;

/// TTL map of recently seen update ids (single process only).
pub struct UpdateDeduplicator {
    ttl: Duration,
    seen: Mutex<HashMap<i64, Instant>>,
}

impl UpdateDeduplicator {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::from_secs(ttl_secs.max(1)),
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Records `update_id` and returns `true` if it was already seen inside the TTL.
    pub async fn is_duplicate(&self, update_id: i64) -> bool {
        let now = Instant::now();
        let mut seen = self.seen.lock().await;
        seen.retain(|_, at| now.duration_since(*at) < self.ttl);
        match seen.get(&update_id) {
            Some(_) => true,
            None => {
                seen.insert(update_id, now);
                false
            }
        }
    }

    /// Drops `update_id` so a re-delivery after a failed dispatch is processed again.
    pub async fn forget(&self, update_id: i64) {
        self.seen.lock().await.remove(&update_id);
    }

    /// Number of ids currently tracked.
    pub async fn len(&self) -> usize {
        self.seen.lock().await.len()
    }
}

impl Default for UpdateDeduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_TTL_SECS)
    }
}
