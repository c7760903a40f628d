//! # reelbot-telegram
//!
//! Telegram transport layer: update decoding, [`reelbot_core::RemoteClient`] implementation over
//! teloxide, minimal config. No routing, lifecycle, or handler logic.

mod adapters;
mod bot_adapter;
mod config;

pub use adapters::{decode_update, DecodeError};
pub use bot_adapter::{map_request_error, TelegramRemoteClient};
pub use config::{TelegramConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
