//! # Userbase Server
//!
//! Main entry point: loads configuration, installs logging, builds the
//! application and serves it until a shutdown signal arrives.

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use userbase_config::{AppConfig, ConfigLoader};
use userbase_server::{app, startup};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().context("Failed to load configuration") {
        Ok(loader) => loader.into_inner(),
        Err(e) => {
            init_logging(false);
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(config.observability.json_logs);

    info!("Starting Userbase Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    startup::print_startup_info(&config);

    app::serve(config, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging(json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,userbase=debug,tower_http=debug"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
