//! Token types for the session lifecycle.
//!
//! Tokens are opaque strings: nothing in this crate inspects their
//! contents or decodes expiry claims. An access token is good until the
//! server says otherwise by answering 401.

use std::fmt;

/// An access token, attached as a bearer credential to protected
/// requests.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is the empty string. An empty token never
    /// counts as an authenticated session.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token, exchanged for a new access token when the current
/// one has expired.
///
/// The refresh protocol never rotates this value; it lives as long as
/// the session does.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh request bodies.
    ///
    /// # Security
    ///
    /// Use only when constructing token refresh requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The access/refresh pair issued when a session is established.
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Token attached to protected requests.
    pub access: AccessToken,
    /// Token exchanged for a new access token on expiry.
    pub refresh: RefreshToken,
}

impl TokenPair {
    /// Pair up an access and a refresh token.
    pub fn new(access: AccessToken, refresh: RefreshToken) -> Self {
        Self { access, refresh }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("access-token-value-here");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("access-token-value-here"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn refresh_token_hides_value_in_debug() {
        let token = RefreshToken::new("refresh-token-value-here");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("refresh-token-value-here"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn token_pair_hides_both_values_in_debug() {
        let pair = TokenPair::new(AccessToken::new("aaa111"), RefreshToken::new("rrr222"));
        let debug = format!("{:?}", pair);
        assert!(!debug.contains("aaa111"));
        assert!(!debug.contains("rrr222"));
    }

    #[test]
    fn empty_access_token_reports_empty() {
        assert!(AccessToken::new("").is_empty());
        assert!(!AccessToken::new("a").is_empty());
    }
}
