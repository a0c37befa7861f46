//! Server startup utilities.

use tracing::info;
use userbase_config::AppConfig;

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Users:     http://{}/users", addr);
    info!("Health:    http://{}/health", addr);
    info!(
        "Store:     {} (table: {})",
        config.store.backend, config.store.table_name
    );
    info!("{}", separator);
}
