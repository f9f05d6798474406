//! # gatekeeper-entity
//!
//! Domain entities shared between the auth core and the HTTP layer.

pub mod account;

pub use account::{Account, AccountUpdate, NewAccount};
