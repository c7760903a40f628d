//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reelbot")]
#[command(about = "Telegram webhook bot for Instagram links", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the webhook endpoints (config from env; flags override).
    Serve {
        /// Overrides BOT_TOKEN.
        #[arg(short, long)]
        token: Option<String>,
        /// Overrides BIND_ADDR.
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Register the webhook with Telegram once and print the live registration as JSON.
    SetWebhook {
        #[arg(short, long)]
        token: Option<String>,
        /// Public base URL; overrides WEBHOOK_URL.
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Run the health check once and print the result as JSON.
    Health {
        #[arg(short, long)]
        token: Option<String>,
    },
}
