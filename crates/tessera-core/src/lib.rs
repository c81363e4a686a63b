//! tessera-core - Session lifecycle types, traits and orchestration.
//!
//! The central piece is [`SessionManager`]: it exchanges credentials for
//! a token pair, caches the user's identity, and revives an expired
//! access token by running the refresh protocol once when the profile
//! read answers 401. Transport and persistence are trait seams
//! ([`AccountsApi`], [`SessionStore`]) supplied at construction, so the
//! manager itself never touches the network or the filesystem.

pub mod api_url;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod identity;
pub mod manager;
pub mod session;
pub mod tokens;
pub mod traits;

pub use api_url::ApiUrl;
pub use credentials::{Credentials, PasswordChange, RegistrationForm};
pub use endpoints::Endpoints;
pub use error::Error;
pub use identity::{Identity, ProfileUpdate};
pub use manager::SessionManager;
pub use session::{Registration, Session};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{AccountsApi, LoginOutput, RefreshOutput, RegisterOutput, SessionStore};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
