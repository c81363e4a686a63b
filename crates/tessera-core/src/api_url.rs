//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidUrlError};

/// A validated accounts API base URL.
///
/// The base URL must use HTTPS (or HTTP for localhost) and may carry a
/// path prefix when the accounts service is mounted below the root.
/// Endpoint paths from [`Endpoints`](crate::Endpoints) are joined onto
/// it with [`ApiUrl::endpoint_url`].
///
/// # Example
///
/// ```
/// use tessera_core::ApiUrl;
///
/// let api = ApiUrl::new("https://accounts.example.com").unwrap();
/// assert_eq!(
///     api.endpoint_url("auth/login/"),
///     "https://accounts.example.com/auth/login/"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet
    /// requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidUrlError {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full URL for an endpoint path relative to this base.
    pub fn endpoint_url(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths,
        // so trim before joining
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the URL scheme ("https" or "http").
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(InvalidUrlError {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidUrlError {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        // Must have a host
        if url.host_str().is_none() {
            return Err(InvalidUrlError {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://accounts.example.com").unwrap();
        assert_eq!(api.host(), Some("accounts.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://localhost:8000").unwrap();
        assert_eq!(api.host(), Some("localhost"));
    }

    #[test]
    fn valid_loopback_http() {
        let api = ApiUrl::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(api.scheme(), "http");
    }

    #[test]
    fn endpoint_url_construction() {
        let api = ApiUrl::new("https://accounts.example.com").unwrap();
        assert_eq!(
            api.endpoint_url("auth/login/"),
            "https://accounts.example.com/auth/login/"
        );
    }

    #[test]
    fn normalizes_trailing_slash_in_endpoint_url() {
        let api = ApiUrl::new("https://accounts.example.com/").unwrap();
        assert_eq!(
            api.endpoint_url("auth/login/"),
            "https://accounts.example.com/auth/login/"
        );
    }

    #[test]
    fn keeps_path_prefix() {
        let api = ApiUrl::new("https://example.com/api/v1").unwrap();
        assert_eq!(
            api.endpoint_url("auth/login/"),
            "https://example.com/api/v1/auth/login/"
        );
    }

    #[test]
    fn tolerates_leading_slash_in_path() {
        let api = ApiUrl::new("https://example.com").unwrap();
        assert_eq!(
            api.endpoint_url("/auth/login/"),
            "https://example.com/auth/login/"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://accounts.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/auth/login/").is_err());
    }

    #[test]
    fn invalid_file_url() {
        assert!(ApiUrl::new("file:///tmp/accounts").is_err());
    }
}
