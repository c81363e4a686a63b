//! No-op session store.

use tessera_core::error::StorageError;
use tessera_core::{AccessToken, Identity, RefreshToken, SessionStore};

/// The store for environments with no persistence medium.
///
/// Accepts every write, discards it, and reports every slot absent.
/// Session operations running over this store behave as if the user
/// logs in freshly each process; none of them fail because persistence
/// is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl NoopStore {
    /// Create the store.
    pub fn new() -> Self {
        Self
    }
}

impl SessionStore for NoopStore {
    fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        Ok(None)
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>, StorageError> {
        Ok(None)
    }

    fn set_tokens(
        &self,
        _access: &AccessToken,
        _refresh: &RefreshToken,
    ) -> Result<(), StorageError> {
        Ok(())
    }

    fn identity(&self) -> Result<Option<Identity>, StorageError> {
        Ok(None)
    }

    fn set_identity(&self, _identity: &Identity) -> Result<(), StorageError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_accepted_and_discarded() {
        let store = NoopStore::new();

        store
            .set_tokens(&AccessToken::new("A1"), &RefreshToken::new("R1"))
            .unwrap();

        assert!(store.access_token().unwrap().is_none());
        assert!(store.refresh_token().unwrap().is_none());
        store.clear().unwrap();
    }
}
