//! Filesystem-backed session store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use tessera_core::error::StorageError;
use tessera_core::{AccessToken, Identity, RefreshToken, SessionStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored token pair document.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTokens {
    access_token: String,
    refresh_token: String,
}

/// A session store rooted at a directory on disk.
///
/// The token pair lives in `tokens.json` as a single document, so both
/// slots always change together, and the cached identity in
/// `identity.json`. Writes go through a temp file and a rename; files
/// are created with `0600` permissions on Unix. The directory itself is
/// created on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tokens_path(&self) -> PathBuf {
        self.root.join("tokens.json")
    }

    fn identity_path(&self) -> PathBuf {
        self.root.join("identity.json")
    }

    fn write_document(&self, path: &Path, json: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&temp_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms)?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    fn read_document(path: &Path) -> Result<Option<String>, StorageError> {
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn remove_document(path: &Path) -> Result<(), StorageError> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn read_tokens(&self) -> Result<Option<StoredTokens>, StorageError> {
        match Self::read_document(&self.tokens_path())? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

impl SessionStore for FileStore {
    fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        Ok(self
            .read_tokens()?
            .map(|tokens| AccessToken::new(tokens.access_token)))
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>, StorageError> {
        Ok(self
            .read_tokens()?
            .map(|tokens| RefreshToken::new(tokens.refresh_token)))
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn set_tokens(
        &self,
        access: &AccessToken,
        refresh: &RefreshToken,
    ) -> Result<(), StorageError> {
        let stored = StoredTokens {
            access_token: access.as_str().to_string(),
            refresh_token: refresh.as_str().to_string(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        self.write_document(&self.tokens_path(), &json)?;
        debug!("Stored token pair");
        Ok(())
    }

    fn identity(&self) -> Result<Option<Identity>, StorageError> {
        match Self::read_document(&self.identity_path())? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn set_identity(&self, identity: &Identity) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(identity)?;
        self.write_document(&self.identity_path(), &json)?;
        debug!("Stored identity");
        Ok(())
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn clear(&self) -> Result<(), StorageError> {
        Self::remove_document(&self.tokens_path())?;
        Self::remove_document(&self.identity_path())?;
        debug!("Cleared session");
        Ok(())
    }
}
