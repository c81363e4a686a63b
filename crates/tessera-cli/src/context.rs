//! Composition root: API handle, store selection, manager construction.

use anyhow::{Context, Result};
use directories::ProjectDirs;

use tessera_core::error::StorageError;
use tessera_core::{AccessToken, ApiUrl, Identity, RefreshToken, SessionManager, SessionStore};
use tessera_rest::RestAccountsApi;
use tessera_store::{FileStore, NoopStore};

/// The manager type this binary drives.
pub type Manager = SessionManager<RestAccountsApi, CliStore>;

/// Store wrapper for CLI use: durable when a platform data directory
/// exists, discarding otherwise.
#[derive(Debug)]
pub enum CliStore {
    File(FileStore),
    Noop(NoopStore),
}

impl SessionStore for CliStore {
    fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        match self {
            CliStore::File(store) => store.access_token(),
            CliStore::Noop(store) => store.access_token(),
        }
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>, StorageError> {
        match self {
            CliStore::File(store) => store.refresh_token(),
            CliStore::Noop(store) => store.refresh_token(),
        }
    }

    fn set_tokens(
        &self,
        access: &AccessToken,
        refresh: &RefreshToken,
    ) -> Result<(), StorageError> {
        match self {
            CliStore::File(store) => store.set_tokens(access, refresh),
            CliStore::Noop(store) => store.set_tokens(access, refresh),
        }
    }

    fn identity(&self) -> Result<Option<Identity>, StorageError> {
        match self {
            CliStore::File(store) => store.identity(),
            CliStore::Noop(store) => store.identity(),
        }
    }

    fn set_identity(&self, identity: &Identity) -> Result<(), StorageError> {
        match self {
            CliStore::File(store) => store.set_identity(identity),
            CliStore::Noop(store) => store.set_identity(identity),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        match self {
            CliStore::File(store) => store.clear(),
            CliStore::Noop(store) => store.clear(),
        }
    }
}

/// Pick the session store for this environment.
///
/// Falls back to the no-op store when no platform data directory can be
/// determined; the session then lives only for the current process and
/// every command starts unauthenticated.
pub fn select_store() -> CliStore {
    match ProjectDirs::from("", "", "tessera") {
        Some(dirs) => CliStore::File(FileStore::new(dirs.data_dir().join("session"))),
        None => {
            tracing::warn!("No platform data directory found; the session will not persist");
            CliStore::Noop(NoopStore::new())
        }
    }
}

/// Build the session manager for the given API base URL.
pub fn build_manager(api: &str) -> Result<Manager> {
    let base = ApiUrl::new(api).context("Invalid API URL")?;
    Ok(SessionManager::new(RestAccountsApi::new(base), select_store()))
}
