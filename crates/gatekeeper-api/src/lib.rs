//! # gatekeeper-api
//!
//! HTTP API layer for Gatekeeper built on Axum.
//!
//! Provides the REST endpoints, the authentication gate middleware,
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, serve};
pub use error::ApiError;
pub use state::AppState;
