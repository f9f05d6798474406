//! # gatekeeper-auth
//!
//! Token-based authentication and session management for Gatekeeper.
//!
//! ## Modules
//!
//! - `credential` — Argon2id hashing, password policy, and credential verification
//! - `token` — signed token issuance and verification
//! - `session` — cached session records and the login/refresh/logout flows
//! - `account` — the credential store seam and account registration/updates
//! - `gate` — the per-request authentication state machine
//!
//! ## Revocation model
//!
//! Token validity is purely cryptographic: a token verifies until its
//! embedded expiry regardless of the session cache. Logout removes the
//! cached session record but does not revoke tokens already handed out.

pub mod account;
pub mod credential;
pub mod error;
pub mod gate;
pub mod principal;
pub mod session;
pub mod token;

pub use account::{AccountRepository, AccountService, MemoryAccountRepository};
pub use credential::{CredentialVerifier, PasswordHasher, PasswordValidator};
pub use error::AuthError;
pub use gate::{AuthGate, GateOutcome};
pub use principal::Principal;
pub use session::{SessionCache, SessionManager};
pub use token::{Claims, IssuedToken, TokenCodec};
