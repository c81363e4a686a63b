//! Error types for the tessera libraries.
//!
//! A unified [`Error`] covers every failure a session operation can
//! surface: transport problems, non-success API responses, rejected
//! authentication, an expired session, profile fetch failures and
//! storage faults. Callers match on the variant; the manager decides
//! which low-level failures get promoted to which session-level ones.

use std::fmt;

use thiserror::Error;

/// Fallback reason used when the server rejects a request without
/// supplying any detail text.
pub const GENERIC_REJECTION: &str = "request rejected by server";

/// The unified error type for all tessera operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A transport-level failure (connection, timeout, protocol).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-success status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The server rejected an authenticated or credential-bearing
    /// request; `reason` carries the server's own wording.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The session could not be revived: the profile read answered 401
    /// and the refresh protocol did not produce a usable access token.
    #[error("session expired")]
    SessionExpired,

    /// The profile read failed for a reason other than authentication.
    #[error("profile fetch failed (HTTP {status})")]
    ProfileFetch {
        /// HTTP status code of the failing response.
        status: u16,
    },

    /// The session store failed to read or write a slot.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A caller-supplied value failed validation.
    #[error("invalid input: {0}")]
    InvalidUrl(#[from] InvalidUrlError),
}

/// Transport-level errors, independent of the API contract.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the server at all.
    #[error("connection failed: {message}")]
    Connection {
        /// Description of the connection failure.
        message: String,
    },

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// Any other HTTP-level failure, including undecodable success
    /// bodies.
    #[error("HTTP error: {message}")]
    Http {
        /// Description of the failure.
        message: String,
    },
}

/// A non-success response from the accounts API.
///
/// Carries the HTTP status and the reason text extracted from the
/// response body, when the body had one. Display output is safe to show
/// to end users.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Server-supplied reason text, if any.
    pub reason: Option<String>,
}

impl ApiError {
    /// Create an API error from a status code and optional reason.
    pub fn new(status: u16, reason: Option<String>) -> Self {
        Self { status, reason }
    }

    /// Whether this response means the access token was missing,
    /// invalid or expired.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "HTTP {}: {}", self.status, reason),
            None => write!(f, "HTTP {}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}

/// A rejected login, registration or account operation.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct AuthError {
    /// The server's reason text, verbatim, or [`GENERIC_REJECTION`].
    pub reason: String,
}

impl AuthError {
    /// Create an authentication error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Promote an API rejection, keeping the server's reason text when
    /// present and falling back to [`GENERIC_REJECTION`] otherwise.
    pub fn from_api(error: ApiError) -> Self {
        let reason = match error.reason {
            Some(reason) if !reason.is_empty() => reason,
            _ => GENERIC_REJECTION.to_string(),
        };
        Self { reason }
    }
}

/// Failures inside a session store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage medium could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document exists but does not decode.
    #[error("malformed stored session data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A caller-supplied URL failed validation.
#[derive(Debug, Error)]
#[error("invalid API URL '{value}': {reason}")]
pub struct InvalidUrlError {
    /// The rejected value.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_reason() {
        let err = ApiError::new(403, Some("forbidden".to_string()));
        assert_eq!(err.to_string(), "HTTP 403: forbidden");

        let bare = ApiError::new(500, None);
        assert_eq!(bare.to_string(), "HTTP 500");
    }

    #[test]
    fn only_401_is_an_auth_error() {
        assert!(ApiError::new(401, None).is_auth_error());
        assert!(!ApiError::new(403, None).is_auth_error());
        assert!(!ApiError::new(500, None).is_auth_error());
    }

    #[test]
    fn auth_error_keeps_server_reason() {
        let err = AuthError::from_api(ApiError::new(400, Some("Invalid credentials.".to_string())));
        assert_eq!(err.reason, "Invalid credentials.");
    }

    #[test]
    fn auth_error_falls_back_to_generic_reason() {
        let err = AuthError::from_api(ApiError::new(500, None));
        assert_eq!(err.reason, GENERIC_REJECTION);

        let empty = AuthError::from_api(ApiError::new(400, Some(String::new())));
        assert_eq!(empty.reason, GENERIC_REJECTION);
    }
}
