//! # reelbot
//!
//! Telegram webhook bot for Instagram links. Wires the lifecycle manager from reelbot-runtime to an
//! axum HTTP boundary, registers the handlers, and exposes the CLI entry points.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod server;

pub use cli::{Cli, Commands};
pub use components::{build_router, TelegramContextFactory};
pub use config::AppConfig;
pub use runner::{run_health, run_server, run_set_webhook};
pub use server::{build_app, AppState};
