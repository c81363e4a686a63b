//! Accounts API trait.

use async_trait::async_trait;
use serde::Deserialize;

use crate::credentials::{Credentials, PasswordChange, RegistrationForm};
use crate::identity::{Identity, ProfileUpdate};
use crate::tokens::{AccessToken, RefreshToken, TokenPair};
use crate::Result;

/// Output from a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    /// The identity of the logged-in user.
    pub identity: Identity,
    /// The issued token pair.
    pub tokens: TokenPair,
}

/// Output from a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterOutput {
    /// The identity record the server created.
    pub identity: Identity,
    /// The issued token pair, absent when the account must be verified
    /// before a session can be issued.
    pub tokens: Option<TokenPair>,
    /// Server-supplied message, when present.
    pub message: Option<String>,
}

/// Payload of a successful token refresh.
///
/// The accounts API answers the refresh endpoint in one of two shapes:
/// the new access token at the top level or nested under `tokens`.
/// Both decode into this type; [`RefreshOutput::into_access_token`]
/// applies the extraction rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshOutput {
    /// Top-level access token field.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Nested token object.
    #[serde(default)]
    pub tokens: Option<RefreshedTokens>,
}

/// The nested variant of the refresh payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshedTokens {
    /// Access token inside the nested object.
    #[serde(default)]
    pub access_token: Option<String>,
}

impl RefreshOutput {
    /// Extracts the refreshed access token, preferring the top-level
    /// field over the nested one. Missing and empty values both count
    /// as no token.
    pub fn into_access_token(self) -> Option<AccessToken> {
        let raw = self
            .access_token
            .or_else(|| self.tokens.and_then(|t| t.access_token))?;
        if raw.is_empty() {
            None
        } else {
            Some(AccessToken::new(raw))
        }
    }
}

/// The remote accounts API, as seen from the client.
///
/// One method per operation of the HTTP contract. Implementations own
/// serialization and status handling; a non-success response surfaces
/// as [`Error::Api`](crate::error::Error::Api) so callers can inspect
/// the status, and transport failures surface as
/// [`Error::Transport`](crate::error::Error::Transport).
///
/// Protected operations take `Option<&AccessToken>`: the bearer header
/// is attached only when a token exists, and a request without one is
/// still sent (the server answers 401, which is what drives the refresh
/// protocol).
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Exchange credentials for an identity and a token pair.
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutput>;

    /// Create a new account.
    async fn register(&self, form: &RegistrationForm) -> Result<RegisterOutput>;

    /// Notify the server of a logout, handing back the refresh token.
    async fn logout(&self, access: Option<&AccessToken>, refresh: &RefreshToken) -> Result<()>;

    /// Fetch the profile of the authenticated user.
    async fn fetch_profile(&self, access: Option<&AccessToken>) -> Result<Identity>;

    /// Update profile fields of the authenticated user.
    async fn update_profile(
        &self,
        access: Option<&AccessToken>,
        update: &ProfileUpdate,
    ) -> Result<Identity>;

    /// Change the password of the authenticated user.
    async fn change_password(
        &self,
        access: Option<&AccessToken>,
        change: &PasswordChange,
    ) -> Result<()>;

    /// Delete the authenticated user's account.
    async fn delete_account(&self, access: Option<&AccessToken>) -> Result<()>;

    /// Exchange the refresh token for a new access token. The request
    /// carries no bearer header.
    async fn refresh_token(&self, refresh: &RefreshToken) -> Result<RefreshOutput>;
}
