//! Bot configuration, loaded from env (after dotenvy) with CLI overrides.

mod app_config;


pub use app_config::{AppConfig, DEFAULT_BIND_ADDR, DEFAULT_WEBHOOK_MAX_CONNECTIONS};
