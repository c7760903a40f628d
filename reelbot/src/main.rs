//! reelbot binary: loads .env, parses the CLI, runs the chosen command.

use anyhow::Result;
use clap::Parser;
use reelbot::{run_health, run_server, run_set_webhook, AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { token, bind } => {
            let mut config = AppConfig::load(token)?;
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            run_server(config).await
        }
        Commands::SetWebhook { token, url } => {
            let mut config = AppConfig::load(token)?;
            if url.is_some() {
                config.webhook_url = url;
            }
            run_set_webhook(config).await
        }
        Commands::Health { token } => run_health(AppConfig::load(token)?).await,
    }
}
