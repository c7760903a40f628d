//! Error types for the bot core.
//!
//! Each error kind maps to one recovery policy: configuration errors fail the operation that needs
//! the value, initialization errors are retried on the next `acquire`, dispatch errors are surfaced
//! as a 500 at the boundary, and remote errors are folded into the calling operation's result.

use thiserror::Error;

/// Missing or invalid configuration value. Carries the variable name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{0} is not set")]
    Missing(String),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: String, reason: String },
}

/// Failure of a call into the messaging-platform API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Remote call timed out")]
    Timeout,

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote client is closed")]
    Closed,
}

/// Singleton construction failed. Cloneable so every concurrent waiter sees the same failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Initialization failed: {0}")]
pub struct InitializationError(pub String);

impl From<RemoteError> for InitializationError {
    fn from(e: RemoteError) -> Self {
        Self(e.to_string())
    }
}

impl From<ConfigurationError> for InitializationError {
    fn from(e: ConfigurationError) -> Self {
        Self(e.to_string())
    }
}

/// Errors returned by `acquire`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error("Application context is closed")]
    Closed,
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No chat to reply to")]
    NoChat,

    #[error("Empty content")]
    EmptyContent,

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("{0}")]
    Other(String),
}

/// A single update could not be dispatched. Never fatal for the process.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Context not ready: {0}")]
    NotReady(#[from] LifecycleError),

    #[error("Handler {handler} failed: {source}")]
    Handler {
        handler: String,
        #[source]
        source: HandlerError,
    },
}

/// Result type for handler code; uses [`HandlerError`].
pub type Result<T> = std::result::Result<T, HandlerError>;
