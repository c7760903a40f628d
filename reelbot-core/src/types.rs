//! Core types: user, chat, update envelope, reply capability, and Handler trait.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{HandlerError, Result};
use crate::remote::RemoteClient;

/// Leading marker of a bot command.
pub const COMMAND_MARKER: char = '/';

/// Longest command name the platform accepts.
pub const MAX_COMMAND_LEN: usize = 32;

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// Shape of an update, derived from its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateKind {
    /// `/name` or `/name@bot` as the first token. `name` is lower-cased; `target` is the `@bot` suffix.
    Command { name: String, target: Option<String> },
    /// Any other text, including the empty string.
    Text,
    /// No text at all (photos, stickers, member updates, ...).
    Other,
}

impl UpdateKind {
    /// Classifies a message body. Absent text is `Other`; a valid leading command token is `Command`;
    /// everything else is `Text`.
    pub fn classify(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return UpdateKind::Other;
        };
        match parse_command(text) {
            Some((name, target)) => UpdateKind::Command { name, target },
            None => UpdateKind::Text,
        }
    }
}

/// Parses the first whitespace-delimited token as a command. Returns `(lowercase name, @target)`.
pub fn parse_command(text: &str) -> Option<(String, Option<String>)> {
    let token = text.split_whitespace().next()?;
    if !text.starts_with(COMMAND_MARKER) {
        return None;
    }
    let body = &token[COMMAND_MARKER.len_utf8()..];
    if body.contains(COMMAND_MARKER) {
        return None;
    }
    let (name, target) = match body.split_once('@') {
        Some((name, target)) if !target.is_empty() => (name, Some(target.to_string())),
        Some(_) => return None,
        None => (body, None),
    };
    let valid = !name.is_empty()
        && name.len() <= MAX_COMMAND_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then(|| (name.to_ascii_lowercase(), target))
}

/// One inbound notification, decoded and classified. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateEnvelope {
    update_id: i64,
    kind: UpdateKind,
    text: String,
    chat: Option<Chat>,
    user: Option<User>,
}

impl UpdateEnvelope {
    /// Builds an envelope; `kind` is derived from `text`.
    pub fn new(update_id: i64, text: Option<String>, chat: Option<Chat>, user: Option<User>) -> Self {
        let kind = UpdateKind::classify(text.as_deref());
        Self {
            update_id,
            kind,
            text: text.unwrap_or_default(),
            chat,
            user,
        }
    }

    pub fn update_id(&self) -> i64 {
        self.update_id
    }

    pub fn kind(&self) -> &UpdateKind {
        &self.kind
    }

    /// Command name; present iff the kind is `Command`.
    pub fn command_name(&self) -> Option<&str> {
        match &self.kind {
            UpdateKind::Command { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Raw message body; empty for `Other`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Command arguments: the text after the command token, trimmed.
    pub fn command_args(&self) -> &str {
        match self.kind {
            UpdateKind::Command { .. } => self
                .text
                .trim_start()
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest.trim())
                .unwrap_or(""),
            _ => "",
        }
    }

    pub fn chat(&self) -> Option<&Chat> {
        self.chat.as_ref()
    }

    pub fn chat_id(&self) -> Option<i64> {
        self.chat.as_ref().map(|c| c.id)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Reply capability handed to a handler: sends to the update's chat and counts sends.
pub struct ReplyContext {
    client: Arc<dyn RemoteClient>,
    chat_id: Option<i64>,
    sent: AtomicUsize,
}

impl ReplyContext {
    pub fn new(client: Arc<dyn RemoteClient>, chat_id: Option<i64>) -> Self {
        Self {
            client,
            chat_id,
            sent: AtomicUsize::new(0),
        }
    }

    /// Sends `text` to the chat the update came from.
    pub async fn send(&self, text: &str) -> Result<()> {
        let chat_id = self.chat_id.ok_or(HandlerError::NoChat)?;
        if text.is_empty() {
            return Err(HandlerError::EmptyContent);
        }
        self.client.send(chat_id, text).await?;
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Number of successful sends so far.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

/// A unit of business logic bound to one command or to the default text case.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Processes the update, replying through `reply` zero or more times.
    async fn handle(&self, update: &UpdateEnvelope, reply: &ReplyContext) -> Result<()>;
}
