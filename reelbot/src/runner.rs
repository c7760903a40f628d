//! Entry points behind the CLI: serve, one-shot registration, one-shot health check.

use std::sync::Arc;

use anyhow::{Context, Result};
use reelbot_core::init_tracing;
use reelbot_runtime::LifecycleManager;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::components::TelegramContextFactory;
use crate::config::AppConfig;
use crate::server::{build_app, AppState};

fn build_manager(config: &AppConfig) -> Arc<LifecycleManager> {
    let factory = TelegramContextFactory::new(config.telegram.clone());
    Arc::new(LifecycleManager::new(Arc::new(factory)))
}

/// Init logging, validate config, serve until Ctrl-C/SIGTERM, then shut the context down once.
/// The context itself is built lazily by the first request that needs it.
#[instrument(skip(config))]
pub async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file.as_deref())?;

    let manager = build_manager(&config);
    let app = build_app(AppState::new(manager.clone(), &config));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(
        bind_addr = %config.bind_addr,
        webhook_url = ?config.webhook_url,
        secret_configured = config.webhook_secret.is_some(),
        dedup_ttl_secs = config.dedup_ttl_secs,
        "Listening (Ctrl+C/SIGTERM to stop)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    manager.shutdown().await;
    Ok(())
}

/// Registers the webhook once and prints `{webhook_url, webhook_info}`.
pub async fn run_set_webhook(config: AppConfig) -> Result<()> {
    config.telegram.validate()?;
    init_tracing(config.log_file.as_deref())?;

    let manager = build_manager(&config);
    let result = manager
        .register_webhook(config.webhook_url.as_deref(), &config.webhook_options())
        .await;
    manager.shutdown().await;

    let setup = result?;
    println!("{}", serde_json::to_string_pretty(&setup)?);
    Ok(())
}

/// Runs the health check once and prints it; exits non-zero when the status is error.
pub async fn run_health(config: AppConfig) -> Result<()> {
    config.telegram.validate()?;
    init_tracing(config.log_file.as_deref())?;

    let manager = build_manager(&config);
    let status = manager.health_check().await;
    manager.shutdown().await;

    println!("{}", serde_json::to_string_pretty(&status)?);
    if status.is_ok() {
        Ok(())
    } else {
        anyhow::bail!("health check failed")
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
}
