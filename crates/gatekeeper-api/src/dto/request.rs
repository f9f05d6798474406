//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use gatekeeper_entity::account::{AccountUpdate, NewAccount};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Requested username.
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,
    /// Password; the configured policy is applied by the account service.
    pub password: String,
    /// Email.
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

impl From<RegisterRequest> for NewAccount {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            email: req.email,
            phone: req.phone,
            ..NewAccount::default()
        }
    }
}

/// Account update request. Omitted or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    /// New username.
    pub username: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            email: req.email,
            phone: req.phone,
        }
    }
}
