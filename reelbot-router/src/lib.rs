//! # Router
//!
//! Maps an [`UpdateEnvelope`] to a [`HandlerId`] and resolves that id to a registered handler.
//! The mapping is built once at startup and never changes afterwards, so [`Router::route`] is a
//! pure function of the envelope's kind and command name.
//!
//! Priority: exact command match, then the unrecognized-command fallback for other commands,
//! then the default text handler. `Other` updates and commands addressed to a different bot map
//! to [`HandlerId::Ignore`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use reelbot_core::{Handler, UpdateEnvelope, UpdateKind};
use tracing::debug;

/// Identifier of the handler an update is routed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandlerId {
    /// A registered command handler, keyed by lower-case command name.
    Command(String),
    /// Default handler for plain text.
    Text,
    /// Fallback for commands with no registered handler.
    UnrecognizedCommand,
    /// Explicitly ignored; no handler runs.
    Ignore,
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerId::Command(name) => write!(f, "command:{}", name),
            HandlerId::Text => f.write_str("text"),
            HandlerId::UnrecognizedCommand => f.write_str("unrecognized_command"),
            HandlerId::Ignore => f.write_str("ignore"),
        }
    }
}

/// Command handlers plus the text and unrecognized-command handlers.
#[derive(Clone, Default)]
pub struct Router {
    commands: HashMap<String, Arc<dyn Handler>>,
    text: Option<Arc<dyn Handler>>,
    unrecognized: Option<Arc<dyn Handler>>,
    bot_username: Option<String>,
}

impl Router {
    /// Creates an empty router (no handlers; every update resolves to nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for `/name`. Names are matched case-insensitively.
    pub fn add_command(mut self, name: &str, handler: Arc<dyn Handler>) -> Self {
        self.commands.insert(name.to_ascii_lowercase(), handler);
        self
    }

    /// Sets the default handler for plain text.
    pub fn with_text(mut self, handler: Arc<dyn Handler>) -> Self {
        self.text = Some(handler);
        self
    }

    /// Sets the fallback for commands without a registered handler.
    pub fn with_unrecognized(mut self, handler: Arc<dyn Handler>) -> Self {
        self.unrecognized = Some(handler);
        self
    }

    /// Sets the bot's own username; `/cmd@other_bot` is then ignored.
    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Picks the handler id for an update.
    pub fn route(&self, update: &UpdateEnvelope) -> HandlerId {
        match update.kind() {
            UpdateKind::Other => HandlerId::Ignore,
            UpdateKind::Text => HandlerId::Text,
            UpdateKind::Command { name, target } => {
                if !self.is_addressed_to_us(target.as_deref()) {
                    return HandlerId::Ignore;
                }
                if self.commands.contains_key(name) {
                    HandlerId::Command(name.clone())
                } else {
                    HandlerId::UnrecognizedCommand
                }
            }
        }
    }

    /// Returns the handler for `id`, or `None` if nothing is registered (or the id is `Ignore`).
    pub fn resolve(&self, id: &HandlerId) -> Option<Arc<dyn Handler>> {
        let handler = match id {
            HandlerId::Command(name) => self.commands.get(name).cloned(),
            HandlerId::Text => self.text.clone(),
            HandlerId::UnrecognizedCommand => self.unrecognized.clone(),
            HandlerId::Ignore => None,
        };
        if handler.is_none() {
            debug!(handler = %id, "No handler registered");
        }
        handler
    }

    fn is_addressed_to_us(&self, target: Option<&str>) -> bool {
        match (target, self.bot_username.as_deref()) {
            (Some(target), Some(me)) => target.eq_ignore_ascii_case(me),
            _ => true,
        }
    }
}

// Integration tests live in tests/router_test.rs
