//! The shared application context and the factory seam that builds it.

use std::sync::Arc;

use reelbot_core::{BotIdentity, InitializationError, RemoteClient};
use reelbot_router::Router;

/// Builds the pieces of an [`ApplicationContext`]. Called at most once per successful init.
pub trait ContextFactory: Send + Sync {
    /// Creates the remote client binding. No network I/O; the handshake happens afterwards.
    fn create_client(&self) -> Result<Arc<dyn RemoteClient>, InitializationError>;

    /// Registers the handlers once the bot's identity is known.
    fn build_router(&self, identity: &BotIdentity) -> Router;
}

/// Process-wide context: the only remote client for the token, the bot identity from the
/// handshake, and the handler mapping.
pub struct ApplicationContext {
    client: Arc<dyn RemoteClient>,
    identity: BotIdentity,
    router: Router,
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl ApplicationContext {
    pub fn new(client: Arc<dyn RemoteClient>, identity: BotIdentity, router: Router) -> Self {
        Self {
            client,
            identity,
            router,
        }
    }

    pub fn client(&self) -> &Arc<dyn RemoteClient> {
        &self.client
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}
