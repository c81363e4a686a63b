//! Request and response types for the accounts API wire contract.

use serde::{Deserialize, Serialize};

use tessera_core::Identity;

/// Request body for login.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Token object in the login response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginTokens {
    pub access: String,
    pub refresh: String,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub user: Identity,
    pub tokens: LoginTokens,
}

/// Request body for register.
#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password2: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<&'a str>,
}

/// Token object in the register response.
/// Note: the key names differ from the login shape; the server contract
/// is not uniform across the two endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct RegisterTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Response from register. `tokens` is absent when the account must be
/// verified before a session can be issued.
#[derive(Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: Identity,
    #[serde(default)]
    pub tokens: Option<RegisterTokens>,
}

/// Request body for logout.
#[derive(Debug, Serialize)]
pub(crate) struct LogoutRequest<'a> {
    pub refresh_token: &'a str,
}

/// Request body for changePassword.
#[derive(Debug, Serialize)]
pub(crate) struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
    pub new_password2: &'a str,
}

/// Request body for refreshToken.
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Error body shapes the accounts API answers with. Some endpoints use
/// `detail`, others `error`; `detail` wins when both are present.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
