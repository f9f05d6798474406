//! Cache key builders for all Gatekeeper cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use gatekeeper_core::types::UserId;

/// Cache key holding the most recently issued login token of a user.
pub fn login_token(user_id: UserId) -> String {
    format!("login_token::{user_id}")
}
