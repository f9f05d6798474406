//! Gatekeeper Server: token authentication and session management.
//!
//! Main entry point that loads configuration, wires the crates together,
//! and starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use gatekeeper_core::config::AppConfig;
use gatekeeper_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("GATEKEEPER_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Gatekeeper");

    let server = config.server.clone();
    let state = gatekeeper_api::build_state(config).await?;
    let app = gatekeeper_api::build_app(state);

    gatekeeper_api::serve(app, &server).await?;

    tracing::info!("Gatekeeper stopped");
    Ok(())
}
