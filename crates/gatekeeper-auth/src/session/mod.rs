//! Session records and the login/refresh/logout flows.

pub mod cache;
pub mod manager;

pub use cache::SessionCache;
pub use manager::SessionManager;
