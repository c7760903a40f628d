//! Fallback for commands nobody registered.

use async_trait::async_trait;
use reelbot_core::{Handler, ReplyContext, Result, UpdateEnvelope};

#[derive(Clone, Default)]
pub struct UnknownCommandHandler;

impl UnknownCommandHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for UnknownCommandHandler {
    async fn handle(&self, update: &UpdateEnvelope, reply: &ReplyContext) -> Result<()> {
        let name = update.command_name().unwrap_or_default();
        reply
            .send(&format!("Unknown command /{}. Try /help.", name))
            .await
    }
}
