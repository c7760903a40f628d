//! Decoding of raw Telegram `Update` JSON into [`UpdateEnvelope`].
//! Only the fields routing and replying need are read; unknown fields are ignored.

use reelbot_core::{Chat, UpdateEnvelope, User};
use serde::Deserialize;
use thiserror::Error;

/// The request body is not a Telegram update. Rejected before routing (HTTP 400).
#[derive(Error, Debug)]
#[error("Malformed update: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

#[derive(Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
    edited_message: Option<TelegramMessage>,
    channel_post: Option<TelegramMessage>,
}

#[derive(Deserialize)]
struct TelegramMessage {
    chat: TelegramChat,
    from: Option<TelegramUser>,
    text: Option<String>,
}

#[derive(Deserialize)]
struct TelegramChat {
    id: i64,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Deserialize)]
struct TelegramUser {
    id: i64,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<TelegramUser> for User {
    fn from(u: TelegramUser) -> Self {
        User {
            id: u.id,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

impl From<TelegramUpdate> for UpdateEnvelope {
    fn from(update: TelegramUpdate) -> Self {
        let effective = update
            .message
            .or(update.edited_message)
            .or(update.channel_post);
        match effective {
            Some(msg) => UpdateEnvelope::new(
                update.update_id,
                msg.text,
                Some(Chat {
                    id: msg.chat.id,
                    chat_type: msg.chat.kind,
                }),
                msg.from.map(User::from),
            ),
            None => UpdateEnvelope::new(update.update_id, None, None, None),
        }
    }
}

/// Parses a webhook request body. The effective message is `message`, else `edited_message`,
/// else `channel_post`; an update with none of them decodes to kind `Other`.
pub fn decode_update(body: &[u8]) -> Result<UpdateEnvelope, DecodeError> {
    let update: TelegramUpdate = serde_json::from_slice(body)?;
    Ok(update.into())
}
