//! /start and /help.

use async_trait::async_trait;
use reelbot_core::{Handler, ReplyContext, Result, UpdateEnvelope};

pub const USAGE: &str = "Send me a link to an Instagram post or reel, for example \
https://www.instagram.com/reel/C0dE123/, and I will pick it up.\n\n\
Commands:\n/start - greeting\n/help - this message";

/// Greets the user (by first name when known) and shows usage.
#[derive(Clone, Default)]
pub struct StartHandler;

impl StartHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, update: &UpdateEnvelope, reply: &ReplyContext) -> Result<()> {
        let greeting = match update.user().and_then(|u| u.first_name.as_deref()) {
            Some(name) => format!("Hi, {}!", name),
            None => "Hi!".to_string(),
        };
        reply.send(&format!("{}\n\n{}", greeting, USAGE)).await
    }
}

#[derive(Clone, Default)]
pub struct HelpHandler;

impl HelpHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, _update: &UpdateEnvelope, reply: &ReplyContext) -> Result<()> {
        reply.send(USAGE).await
    }
}
