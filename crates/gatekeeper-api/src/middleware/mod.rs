//! Axum middleware stack.

pub mod auth;
pub mod cors;
pub mod logging;

pub use auth::AuthContext;
