//! # reelbot-core
//!
//! Core types and traits for the webhook bot: [`UpdateEnvelope`], [`Handler`], [`RemoteClient`],
//! the error taxonomy, and tracing initialization. Transport-agnostic; used by every other crate.

pub mod error;
pub mod logger;
pub mod remote;
pub mod types;

pub use error::{
    ConfigurationError, DispatchError, HandlerError, InitializationError, LifecycleError,
    RemoteError, Result,
};
pub use logger::init_tracing;
pub use remote::{BotIdentity, RemoteClient, WebhookOptions, WebhookRegistration};
pub use types::{parse_command, Chat, Handler, ReplyContext, UpdateEnvelope, UpdateKind, User};
