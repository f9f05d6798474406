//! Application builder: wires the auth components into `AppState` and the
//! router into a servable Axum app.

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use gatekeeper_auth::{
    AccountRepository, AccountService, AuthGate, CredentialVerifier, MemoryAccountRepository,
    PasswordHasher, PasswordValidator, SessionCache, SessionManager, TokenCodec,
};
use gatekeeper_cache::CacheManager;
use gatekeeper_core::config::{AppConfig, ServerConfig};
use gatekeeper_core::error::AppError;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Constructs every shared component in dependency order.
///
/// The cache is connected and health-checked first so a bad cache
/// configuration fails startup instead of the first login.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    if config.auth.uses_default_secret() {
        warn!("auth.secret_key is the shipped default; set GATEKEEPER__AUTH__SECRET_KEY");
    }

    // ── Step 1: Cache ────────────────────────────────────────────
    info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    // ── Step 2: Credential store ─────────────────────────────────
    let accounts: Arc<dyn AccountRepository> = Arc::new(MemoryAccountRepository::new());

    // ── Step 3: Auth ─────────────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let validator = Arc::new(PasswordValidator::new(&config.auth));
    let codec = Arc::new(TokenCodec::new(&config.auth)?);
    let verifier = Arc::new(CredentialVerifier::new(
        Arc::clone(&accounts),
        Arc::clone(&hasher),
    )?);
    let sessions = Arc::new(SessionCache::new(Arc::clone(&cache)));

    let session_manager = Arc::new(SessionManager::new(
        verifier,
        Arc::clone(&codec),
        sessions,
        Arc::clone(&accounts),
    ));
    let account_service = Arc::new(AccountService::new(
        accounts,
        hasher,
        validator,
        Arc::clone(&session_manager),
    ));
    let gate = Arc::new(AuthGate::from_config(codec, &config.auth));

    Ok(AppState {
        config: Arc::new(config),
        gate,
        session_manager,
        account_service,
    })
}

/// Binds the listener and serves until Ctrl+C.
pub async fn serve(app: Router, server: &ServerConfig) -> Result<(), AppError> {
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "Gatekeeper listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
