//! Password hashing, policy enforcement, and credential verification.

pub mod hasher;
pub mod validator;
pub mod verifier;

pub use hasher::PasswordHasher;
pub use validator::PasswordValidator;
pub use verifier::CredentialVerifier;
