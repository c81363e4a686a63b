//! HTTP-backed accounts API implementation.

use async_trait::async_trait;

use tessera_core::traits::{AccountsApi, LoginOutput, RefreshOutput, RegisterOutput};
use tessera_core::{
    AccessToken, ApiUrl, Credentials, Endpoints, Identity, PasswordChange, ProfileUpdate,
    RefreshToken, RegistrationForm, Result, TokenPair,
};

use crate::client::RestClient;
use crate::endpoints::{
    ChangePasswordRequest, LoginRequest, LoginResponse, LogoutRequest, RefreshRequest,
    RegisterRequest, RegisterResponse,
};

/// The accounts API over HTTP.
///
/// # Example
///
/// ```no_run
/// use tessera_core::{ApiUrl, Credentials, SessionManager};
/// use tessera_rest::RestAccountsApi;
/// use tessera_store::MemoryStore;
///
/// # async fn example() -> tessera_core::Result<()> {
/// let api = RestAccountsApi::new(ApiUrl::new("https://accounts.example.com")?);
/// let manager = SessionManager::new(api, MemoryStore::new());
/// manager.login(&Credentials::new("alice", "hunter2")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestAccountsApi {
    client: RestClient,
    endpoints: Endpoints,
}

impl RestAccountsApi {
    /// Create an API handle for the given base URL with the default
    /// endpoint table.
    pub fn new(base: ApiUrl) -> Self {
        Self::with_endpoints(base, Endpoints::default())
    }

    /// Create an API handle with a custom endpoint table.
    pub fn with_endpoints(base: ApiUrl, endpoints: Endpoints) -> Self {
        Self {
            client: RestClient::new(base),
            endpoints,
        }
    }

    /// Returns the base URL this API talks to.
    pub fn base(&self) -> &ApiUrl {
        self.client.base()
    }
}

#[async_trait]
impl AccountsApi for RestAccountsApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutput> {
        let request = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        let response: LoginResponse = self
            .client
            .post(&self.endpoints.login, &request, None)
            .await?;

        Ok(LoginOutput {
            identity: response.user,
            tokens: TokenPair::new(
                AccessToken::new(response.tokens.access),
                RefreshToken::new(response.tokens.refresh),
            ),
        })
    }

    async fn register(&self, form: &RegistrationForm) -> Result<RegisterOutput> {
        let request = RegisterRequest {
            username: &form.username,
            email: &form.email,
            password: &form.password,
            password2: &form.password_confirm,
            first_name: form.first_name.as_deref(),
            last_name: form.last_name.as_deref(),
        };

        let response: RegisterResponse = self
            .client
            .post(&self.endpoints.register, &request, None)
            .await?;

        let tokens = response.tokens.map(|tokens| {
            TokenPair::new(
                AccessToken::new(tokens.access_token),
                RefreshToken::new(tokens.refresh_token),
            )
        });

        Ok(RegisterOutput {
            identity: response.user,
            tokens,
            message: response.message,
        })
    }

    async fn logout(&self, access: Option<&AccessToken>, refresh: &RefreshToken) -> Result<()> {
        let request = LogoutRequest {
            refresh_token: refresh.as_str(),
        };
        self.client
            .post_no_response(&self.endpoints.logout, &request, access)
            .await
    }

    async fn fetch_profile(&self, access: Option<&AccessToken>) -> Result<Identity> {
        self.client.get(&self.endpoints.profile, access).await
    }

    async fn update_profile(
        &self,
        access: Option<&AccessToken>,
        update: &ProfileUpdate,
    ) -> Result<Identity> {
        self.client.put(&self.endpoints.profile, update, access).await
    }

    async fn change_password(
        &self,
        access: Option<&AccessToken>,
        change: &PasswordChange,
    ) -> Result<()> {
        let request = ChangePasswordRequest {
            old_password: change.old_password(),
            new_password: change.new_password(),
            new_password2: change.new_password_confirm(),
        };
        self.client
            .post_no_response(&self.endpoints.change_password, &request, access)
            .await
    }

    async fn delete_account(&self, access: Option<&AccessToken>) -> Result<()> {
        self.client
            .delete_no_response(&self.endpoints.delete_account, access)
            .await
    }

    async fn refresh_token(&self, refresh: &RefreshToken) -> Result<RefreshOutput> {
        let request = RefreshRequest {
            refresh_token: refresh.as_str(),
        };
        // The refresh request never carries a bearer header; the
        // refresh token in the body is the whole credential.
        self.client
            .post(&self.endpoints.refresh, &request, None)
            .await
    }
}
