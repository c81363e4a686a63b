//! HTTP client for the accounts API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use tessera_core::error::{ApiError, Error, TransportError};
use tessera_core::{AccessToken, ApiUrl};

use crate::endpoints::ErrorBody;

/// Classify a reqwest failure into the transport error taxonomy.
fn transport(err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(kind)
}

/// HTTP client for accounts API requests.
///
/// Knows the base URL and how to attach a bearer token; the endpoint
/// paths and body shapes live with the caller.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl RestClient {
    /// Create a new client for the given API base URL.
    pub(crate) fn new(base: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tessera/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this client is configured for.
    pub(crate) fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Make a GET request expecting a JSON response.
    #[instrument(skip(self, access), fields(base = %self.base))]
    pub(crate) async fn get<R>(&self, path: &str, access: Option<&AccessToken>) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "GET");

        let response = self
            .client
            .get(&url)
            .headers(self.headers(access))
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body, expecting a JSON response.
    #[instrument(skip(self, body, access), fields(base = %self.base))]
    pub(crate) async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        access: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(self.headers(access))
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body, ignoring the response body.
    #[instrument(skip(self, body, access), fields(base = %self.base))]
    pub(crate) async fn post_no_response<B>(
        &self,
        path: &str,
        body: &B,
        access: Option<&AccessToken>,
    ) -> Result<(), Error>
    where
        B: Serialize,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "POST (no response)");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(self.headers(access))
            .send()
            .await
            .map_err(transport)?;

        self.handle_empty_response(response).await
    }

    /// Make a PUT request with a JSON body, expecting a JSON response.
    #[instrument(skip(self, body, access), fields(base = %self.base))]
    pub(crate) async fn put<B, R>(
        &self,
        path: &str,
        body: &B,
        access: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, "PUT");

        let response = self
            .client
            .put(&url)
            .json(body)
            .headers(self.headers(access))
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a DELETE request, ignoring the response body.
    #[instrument(skip(self, access), fields(base = %self.base))]
    pub(crate) async fn delete_no_response(
        &self,
        path: &str,
        access: Option<&AccessToken>,
    ) -> Result<(), Error> {
        let url = self.base.endpoint_url(path);
        debug!(path, "DELETE");

        let response = self
            .client
            .delete(&url)
            .headers(self.headers(access))
            .send()
            .await
            .map_err(transport)?;

        self.handle_empty_response(response).await
    }

    /// Create request headers, attaching the bearer token only when an
    /// access token exists.
    fn headers(&self, access: Option<&AccessToken>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = access {
            let auth_value = format!("Bearer {}", token.as_str());
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value).expect("invalid token characters"),
            );
        }
        headers
    }

    /// Handle a response, parsing the body or the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(transport)?;
            Ok(body)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Api(error))
        }
    }

    /// Handle a response whose body does not matter on success.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            Ok(())
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Api(error))
        }
    }

    /// Parse a non-success response, extracting the server's reason
    /// from the `detail` or `error` field when the body carries one.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::new(status, body.detail.or(body.error)),
            Err(_) => ApiError::new(status, None),
        }
    }
}
