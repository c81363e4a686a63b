//! Session lifecycle orchestration.

use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::credentials::{Credentials, PasswordChange, RegistrationForm};
use crate::error::{AuthError, Error};
use crate::identity::{Identity, ProfileUpdate};
use crate::session::{Registration, Session};
use crate::tokens::TokenPair;
use crate::traits::{AccountsApi, SessionStore};

/// Drives the session lifecycle against an accounts API.
///
/// The manager exchanges credentials for a token pair, persists the
/// pair and the identity record through its [`SessionStore`], and
/// revives an expired access token reactively: when the profile read
/// answers 401 it runs the refresh protocol once and retries once.
/// No other operation refreshes, and a second 401 after a successful
/// refresh is [`Error::SessionExpired`], never another attempt.
///
/// There is no global instance. Construct one per composition root with
/// the transport and store it should use; every operation takes
/// `&self`, so a manager can be shared behind an `Arc` when its parts
/// are `Send + Sync`. Sharing does not serialize refreshes: two
/// concurrent profile reads that both hit 401 will both refresh, and
/// the last access-token write wins.
pub struct SessionManager<A, S> {
    api: A,
    store: S,
}

impl<A, S> SessionManager<A, S>
where
    A: AccountsApi,
    S: SessionStore,
{
    /// Create a manager over the given transport and store.
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// Returns the session store this manager writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Exchange credentials for a new session and persist it.
    ///
    /// # Errors
    ///
    /// A rejected login surfaces as [`Error::Auth`] carrying the
    /// server's reason text. Transport and storage failures propagate
    /// unchanged; if the identity cannot be persisted the tokens are
    /// removed again so the store never holds half a session.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        info!("Logging in");

        let output = self.api.login(credentials).await.map_err(reject)?;
        self.persist(&output.tokens, &output.identity)?;

        debug!("Session established");
        Ok(Session {
            tokens: output.tokens,
            identity: output.identity,
        })
    }

    /// Create a new account.
    ///
    /// When the server issues tokens the session is persisted exactly
    /// as for [`login`](Self::login). When it withholds them the
    /// account is pending verification: nothing is persisted and no
    /// session exists.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: &RegistrationForm) -> Result<Registration> {
        info!("Registering account");

        let output = self.api.register(form).await.map_err(reject)?;
        match output.tokens {
            Some(tokens) => {
                self.persist(&tokens, &output.identity)?;
                debug!("Session established");
                Ok(Registration::Active(Session {
                    tokens,
                    identity: output.identity,
                }))
            }
            None => {
                debug!("Registration pending verification, no session established");
                Ok(Registration::PendingVerification {
                    identity: output.identity,
                    message: output.message,
                })
            }
        }
    }

    /// End the session.
    ///
    /// The server notification is best-effort: it is skipped when no
    /// refresh token is stored, and any transport or API failure is
    /// logged and swallowed. The local slots are cleared regardless,
    /// and only a failure of that clear surfaces as an error.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");

        let access = self.store.access_token().ok().flatten();
        if let Some(refresh) = self.store.refresh_token().ok().flatten() {
            if let Err(error) = self.api.logout(access.as_ref(), &refresh).await {
                warn!(%error, "Logout notification failed, clearing local session anyway");
            }
        }

        self.store.clear()?;
        debug!("Session cleared");
        Ok(())
    }

    /// Fetch the authenticated user's profile and refresh the cached
    /// identity.
    ///
    /// This is the one operation that revives an expired access token:
    /// a 401 answer triggers the refresh protocol and a single retry
    /// with the newly stored token.
    ///
    /// # Errors
    ///
    /// [`Error::SessionExpired`] when the refresh protocol fails or the
    /// retry answers 401 again; [`Error::ProfileFetch`] for any other
    /// non-success status; transport and storage failures propagate.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<Identity> {
        let access = self.store.access_token()?;
        match self.api.fetch_profile(access.as_ref()).await {
            Ok(identity) => {
                self.store.set_identity(&identity)?;
                Ok(identity)
            }
            Err(error) if is_unauthorized(&error) => {
                debug!("Profile fetch answered 401, attempting token refresh");
                if !self.try_refresh().await {
                    return Err(Error::SessionExpired);
                }

                let access = self.store.access_token()?;
                match self.api.fetch_profile(access.as_ref()).await {
                    Ok(identity) => {
                        self.store.set_identity(&identity)?;
                        Ok(identity)
                    }
                    Err(error) if is_unauthorized(&error) => Err(Error::SessionExpired),
                    Err(error) => Err(profile_error(error)),
                }
            }
            Err(error) => Err(profile_error(error)),
        }
    }

    /// Update profile fields and refresh the cached identity with the
    /// server's answer.
    ///
    /// Does not participate in the refresh protocol; a 401 here surfaces
    /// as [`Error::Auth`] like any other rejection.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Identity> {
        info!("Updating profile");

        let access = self.store.access_token()?;
        let identity = self
            .api
            .update_profile(access.as_ref(), update)
            .await
            .map_err(reject)?;
        self.store.set_identity(&identity)?;

        debug!("Profile updated");
        Ok(identity)
    }

    /// Change the account password. Stored tokens are left untouched;
    /// the server decides whether existing sessions stay valid.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        info!("Changing password");

        let access = self.store.access_token()?;
        self.api
            .change_password(access.as_ref(), change)
            .await
            .map_err(reject)?;

        debug!("Password changed");
        Ok(())
    }

    /// Delete the account and, on success, the local session with it.
    /// On failure the stored session is left untouched.
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> Result<()> {
        info!("Deleting account");

        let access = self.store.access_token()?;
        self.api
            .delete_account(access.as_ref())
            .await
            .map_err(reject)?;
        self.store.clear()?;

        debug!("Account deleted and session cleared");
        Ok(())
    }

    /// Local, optimistic authentication check: whether a non-empty
    /// access token is stored. Nothing is validated against the server,
    /// and a failing store reads as unauthenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.access_token(), Ok(Some(token)) if !token.is_empty())
    }

    /// The cached identity of the current session.
    ///
    /// Returns `None` when no session exists, even if a stale identity
    /// record is still stored: an identity without tokens is not a
    /// session.
    pub fn current_identity(&self) -> Result<Option<Identity>> {
        if !self.is_authenticated() {
            return Ok(None);
        }
        Ok(self.store.identity()?)
    }

    /// Persist a freshly issued session. Both slots or neither: a
    /// failed identity write removes the tokens again.
    fn persist(&self, tokens: &TokenPair, identity: &Identity) -> Result<()> {
        self.store.set_tokens(&tokens.access, &tokens.refresh)?;
        if let Err(error) = self.store.set_identity(identity) {
            let _ = self.store.clear();
            return Err(error.into());
        }
        Ok(())
    }

    /// The refresh protocol. Reads the refresh token, exchanges it for
    /// a new access token and stores the result; the refresh token
    /// itself is never rotated. Every failure mode reports `false`
    /// without contacting the server more than once (or at all, when no
    /// refresh token is stored).
    async fn try_refresh(&self) -> bool {
        let refresh = match self.store.refresh_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No refresh token stored, nothing to exchange");
                return false;
            }
            Err(error) => {
                warn!(%error, "Could not read refresh token");
                return false;
            }
        };

        let output = match self.api.refresh_token(&refresh).await {
            Ok(output) => output,
            Err(error) => {
                warn!(%error, "Token refresh rejected");
                return false;
            }
        };

        let Some(access) = output.into_access_token() else {
            warn!("Refresh response carried no access token");
            return false;
        };

        // Writing the same refresh token back keeps the pair write
        // atomic.
        match self.store.set_tokens(&access, &refresh) {
            Ok(()) => {
                debug!("Access token refreshed");
                true
            }
            Err(error) => {
                warn!(%error, "Could not persist refreshed access token");
                false
            }
        }
    }
}

/// Map an API rejection to [`Error::Auth`], keeping the server's reason
/// text. Everything else passes through.
fn reject(error: Error) -> Error {
    match error {
        Error::Api(api) => Error::Auth(AuthError::from_api(api)),
        other => other,
    }
}

fn is_unauthorized(error: &Error) -> bool {
    matches!(error, Error::Api(api) if api.is_auth_error())
}

/// Map a non-401 API failure of the profile read to
/// [`Error::ProfileFetch`]. Everything else passes through.
fn profile_error(error: Error) -> Error {
    match error {
        Error::Api(api) => Error::ProfileFetch { status: api.status },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::error::{ApiError, StorageError, TransportError};
    use crate::tokens::{AccessToken, RefreshToken};
    use crate::traits::{LoginOutput, RefreshOutput, RegisterOutput};

    fn identity(username: &str) -> Identity {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": username,
            "email": format!("{username}@example.com"),
            "is_active": true
        }))
        .unwrap()
    }

    #[derive(Default)]
    struct Slots {
        access: Option<String>,
        refresh: Option<String>,
        identity: Option<Identity>,
    }

    /// In-memory store with direct slot access for assertions.
    #[derive(Default)]
    struct MemStore {
        slots: Mutex<Slots>,
        fail_identity_writes: bool,
    }

    impl MemStore {
        fn with_tokens(access: &str, refresh: &str) -> Self {
            let store = Self::default();
            {
                let mut slots = store.slots.lock().unwrap();
                slots.access = Some(access.to_string());
                slots.refresh = Some(refresh.to_string());
            }
            store
        }

        fn access(&self) -> Option<String> {
            self.slots.lock().unwrap().access.clone()
        }

        fn refresh(&self) -> Option<String> {
            self.slots.lock().unwrap().refresh.clone()
        }

        fn cached_identity(&self) -> Option<Identity> {
            self.slots.lock().unwrap().identity.clone()
        }
    }

    impl SessionStore for MemStore {
        fn access_token(&self) -> std::result::Result<Option<AccessToken>, StorageError> {
            Ok(self.access().map(AccessToken::new))
        }

        fn refresh_token(&self) -> std::result::Result<Option<RefreshToken>, StorageError> {
            Ok(self.refresh().map(RefreshToken::new))
        }

        fn set_tokens(
            &self,
            access: &AccessToken,
            refresh: &RefreshToken,
        ) -> std::result::Result<(), StorageError> {
            let mut slots = self.slots.lock().unwrap();
            slots.access = Some(access.as_str().to_string());
            slots.refresh = Some(refresh.as_str().to_string());
            Ok(())
        }

        fn identity(&self) -> std::result::Result<Option<Identity>, StorageError> {
            Ok(self.cached_identity())
        }

        fn set_identity(&self, identity: &Identity) -> std::result::Result<(), StorageError> {
            if self.fail_identity_writes {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.slots.lock().unwrap().identity = Some(identity.clone());
            Ok(())
        }

        fn clear(&self) -> std::result::Result<(), StorageError> {
            *self.slots.lock().unwrap() = Slots::default();
            Ok(())
        }
    }

    #[derive(Default)]
    struct Counters {
        profile_calls: AtomicUsize,
        refresh_calls: AtomicUsize,
        logout_calls: AtomicUsize,
    }

    /// Scriptable accounts API double.
    #[derive(Default)]
    struct StubApi {
        counters: Arc<Counters>,
        login_rejects: bool,
        register_issues_tokens: bool,
        profile_always_unauthorized: bool,
        refresh_access: Option<String>,
        logout_fails: bool,
    }

    #[async_trait]
    impl AccountsApi for StubApi {
        async fn login(&self, _credentials: &Credentials) -> Result<LoginOutput> {
            if self.login_rejects {
                return Err(Error::Api(ApiError::new(
                    400,
                    Some("Invalid credentials.".to_string()),
                )));
            }
            Ok(LoginOutput {
                identity: identity("alice"),
                tokens: TokenPair::new(AccessToken::new("A1"), RefreshToken::new("R1")),
            })
        }

        async fn register(&self, _form: &RegistrationForm) -> Result<RegisterOutput> {
            let tokens = self
                .register_issues_tokens
                .then(|| TokenPair::new(AccessToken::new("A1"), RefreshToken::new("R1")));
            Ok(RegisterOutput {
                identity: identity("newbie"),
                tokens,
                message: Some("Check your inbox.".to_string()),
            })
        }

        async fn logout(
            &self,
            _access: Option<&AccessToken>,
            _refresh: &RefreshToken,
        ) -> Result<()> {
            self.counters.logout_calls.fetch_add(1, Ordering::SeqCst);
            if self.logout_fails {
                return Err(Error::Transport(TransportError::Connection {
                    message: "connection refused".to_string(),
                }));
            }
            Ok(())
        }

        async fn fetch_profile(&self, _access: Option<&AccessToken>) -> Result<Identity> {
            self.counters.profile_calls.fetch_add(1, Ordering::SeqCst);
            if self.profile_always_unauthorized {
                return Err(Error::Api(ApiError::new(401, None)));
            }
            Ok(identity("alice"))
        }

        async fn update_profile(
            &self,
            _access: Option<&AccessToken>,
            _update: &ProfileUpdate,
        ) -> Result<Identity> {
            unimplemented!("not exercised by these tests")
        }

        async fn change_password(
            &self,
            _access: Option<&AccessToken>,
            _change: &PasswordChange,
        ) -> Result<()> {
            unimplemented!("not exercised by these tests")
        }

        async fn delete_account(&self, _access: Option<&AccessToken>) -> Result<()> {
            unimplemented!("not exercised by these tests")
        }

        async fn refresh_token(&self, _refresh: &RefreshToken) -> Result<RefreshOutput> {
            self.counters.refresh_calls.fetch_add(1, Ordering::SeqCst);
            match &self.refresh_access {
                Some(token) => Ok(RefreshOutput {
                    access_token: Some(token.clone()),
                    tokens: None,
                }),
                None => Err(Error::Api(ApiError::new(
                    401,
                    Some("Token is invalid or expired".to_string()),
                ))),
            }
        }
    }

    #[tokio::test]
    async fn login_persists_tokens_and_identity() {
        let manager = SessionManager::new(StubApi::default(), MemStore::default());

        let session = manager
            .login(&Credentials::new("alice", "pw"))
            .await
            .unwrap();

        assert_eq!(session.identity.username, "alice");
        assert_eq!(manager.store().access().as_deref(), Some("A1"));
        assert_eq!(manager.store().refresh().as_deref(), Some("R1"));
        assert_eq!(
            manager.store().cached_identity().unwrap().username,
            "alice"
        );
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_login_surfaces_server_reason() {
        let api = StubApi {
            login_rejects: true,
            ..Default::default()
        };
        let manager = SessionManager::new(api, MemStore::default());

        let error = manager
            .login(&Credentials::new("alice", "wrong"))
            .await
            .unwrap_err();

        match error {
            Error::Auth(auth) => assert_eq!(auth.reason, "Invalid credentials."),
            other => panic!("expected Auth error, got {other:?}"),
        }
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn failed_identity_write_rolls_back_tokens() {
        let store = MemStore {
            fail_identity_writes: true,
            ..Default::default()
        };
        let manager = SessionManager::new(StubApi::default(), store);

        let error = manager
            .login(&Credentials::new("alice", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Storage(_)));
        assert_eq!(manager.store().access(), None);
        assert_eq!(manager.store().refresh(), None);
    }

    #[tokio::test]
    async fn register_with_tokens_establishes_session() {
        let api = StubApi {
            register_issues_tokens: true,
            ..Default::default()
        };
        let manager = SessionManager::new(api, MemStore::default());

        let registration = manager
            .register(&RegistrationForm::new("newbie", "n@example.com", "pw", "pw"))
            .await
            .unwrap();

        assert!(!registration.is_pending());
        assert_eq!(registration.identity().username, "newbie");
        assert!(manager.is_authenticated());
        assert_eq!(manager.store().access().as_deref(), Some("A1"));
    }

    #[tokio::test]
    async fn register_without_tokens_persists_nothing() {
        let manager = SessionManager::new(StubApi::default(), MemStore::default());

        let registration = manager
            .register(&RegistrationForm::new("newbie", "n@example.com", "pw", "pw"))
            .await
            .unwrap();

        match &registration {
            Registration::PendingVerification { message, .. } => {
                assert_eq!(message.as_deref(), Some("Check your inbox."));
            }
            other => panic!("expected pending registration, got {other:?}"),
        }
        assert!(!manager.is_authenticated());
        assert_eq!(manager.store().access(), None);
        assert_eq!(manager.store().cached_identity(), None);
    }

    #[tokio::test]
    async fn logout_clears_session_even_when_server_fails() {
        let api = StubApi {
            logout_fails: true,
            ..Default::default()
        };
        let counters = api.counters.clone();
        let manager = SessionManager::new(api, MemStore::with_tokens("A1", "R1"));

        manager.logout().await.unwrap();

        assert_eq!(counters.logout_calls.load(Ordering::SeqCst), 1);
        assert_eq!(manager.store().access(), None);
        assert_eq!(manager.store().refresh(), None);
    }

    #[tokio::test]
    async fn logout_without_refresh_token_skips_server() {
        let api = StubApi::default();
        let counters = api.counters.clone();
        let manager = SessionManager::new(api, MemStore::default());

        manager.logout().await.unwrap();

        assert_eq!(counters.logout_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn profile_success_caches_identity() {
        let manager = SessionManager::new(StubApi::default(), MemStore::with_tokens("A1", "R1"));

        let fetched = manager.profile().await.unwrap();

        assert_eq!(fetched.username, "alice");
        assert_eq!(
            manager.store().cached_identity().unwrap().username,
            "alice"
        );
    }

    #[tokio::test]
    async fn second_401_after_refresh_expires_without_looping() {
        let api = StubApi {
            profile_always_unauthorized: true,
            refresh_access: Some("A2".to_string()),
            ..Default::default()
        };
        let counters = api.counters.clone();
        let manager = SessionManager::new(api, MemStore::with_tokens("stale", "R1"));

        let error = manager.profile().await.unwrap_err();

        assert!(matches!(error, Error::SessionExpired));
        assert_eq!(counters.profile_calls.load(Ordering::SeqCst), 2);
        assert_eq!(counters.refresh_calls.load(Ordering::SeqCst), 1);
        // The refreshed token was still stored, with the original
        // refresh token alongside it.
        assert_eq!(manager.store().access().as_deref(), Some("A2"));
        assert_eq!(manager.store().refresh().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn missing_refresh_token_expires_without_network_call() {
        let api = StubApi {
            profile_always_unauthorized: true,
            refresh_access: Some("A2".to_string()),
            ..Default::default()
        };
        let counters = api.counters.clone();
        let manager = SessionManager::new(api, MemStore::default());

        let error = manager.profile().await.unwrap_err();

        assert!(matches!(error, Error::SessionExpired));
        assert_eq!(counters.refresh_calls.load(Ordering::SeqCst), 0);
        assert_eq!(counters.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_refresh_expires_session() {
        let api = StubApi {
            profile_always_unauthorized: true,
            refresh_access: None,
            ..Default::default()
        };
        let counters = api.counters.clone();
        let manager = SessionManager::new(api, MemStore::with_tokens("stale", "R1"));

        let error = manager.profile().await.unwrap_err();

        assert!(matches!(error, Error::SessionExpired));
        assert_eq!(counters.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(counters.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn current_identity_requires_tokens() {
        let manager = SessionManager::new(StubApi::default(), MemStore::default());
        manager.store().set_identity(&identity("ghost")).unwrap();

        assert_eq!(manager.current_identity().unwrap(), None);

        let with_session =
            SessionManager::new(StubApi::default(), MemStore::with_tokens("A1", "R1"));
        with_session
            .store()
            .set_identity(&identity("alice"))
            .unwrap();
        assert_eq!(
            with_session.current_identity().unwrap().unwrap().username,
            "alice"
        );
    }

    #[tokio::test]
    async fn empty_access_token_is_not_authenticated() {
        let manager = SessionManager::new(StubApi::default(), MemStore::with_tokens("", "R1"));
        assert!(!manager.is_authenticated());
    }
}
