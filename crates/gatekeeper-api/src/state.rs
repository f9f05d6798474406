//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use gatekeeper_auth::{AccountService, AuthGate, SessionManager};
use gatekeeper_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Per-request authentication gate
    pub gate: Arc<AuthGate>,
    /// Login, refresh, and logout flows
    pub session_manager: Arc<SessionManager>,
    /// Registration and account updates
    pub account_service: Arc<AccountService>,
}
