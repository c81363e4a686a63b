//! In-memory session store.

use std::sync::RwLock;

use tessera_core::error::StorageError;
use tessera_core::{AccessToken, Identity, RefreshToken, SessionStore};

#[derive(Debug, Default)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
    identity: Option<Identity>,
}

/// An ephemeral store holding the session in process memory.
///
/// Nothing survives the process. Reads and writes never fail, which
/// also makes this the store of choice for exercising a manager in
/// tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<Slots>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        let slots = self.slots.read().unwrap();
        Ok(slots.access.clone().map(AccessToken::new))
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>, StorageError> {
        let slots = self.slots.read().unwrap();
        Ok(slots.refresh.clone().map(RefreshToken::new))
    }

    fn set_tokens(
        &self,
        access: &AccessToken,
        refresh: &RefreshToken,
    ) -> Result<(), StorageError> {
        let mut slots = self.slots.write().unwrap();
        slots.access = Some(access.as_str().to_string());
        slots.refresh = Some(refresh.as_str().to_string());
        Ok(())
    }

    fn identity(&self) -> Result<Option<Identity>, StorageError> {
        let slots = self.slots.read().unwrap();
        Ok(slots.identity.clone())
    }

    fn set_identity(&self, identity: &Identity) -> Result<(), StorageError> {
        let mut slots = self.slots.write().unwrap();
        slots.identity = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slots = self.slots.write().unwrap();
        *slots = Slots::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        serde_json::from_value(serde_json::json!({
            "id": 9,
            "username": "carol"
        }))
        .unwrap()
    }

    #[test]
    fn slots_round_trip() {
        let store = MemoryStore::new();

        store
            .set_tokens(&AccessToken::new("A1"), &RefreshToken::new("R1"))
            .unwrap();
        store.set_identity(&identity()).unwrap();

        assert_eq!(store.access_token().unwrap().unwrap().as_str(), "A1");
        assert_eq!(store.refresh_token().unwrap().unwrap().as_str(), "R1");
        assert_eq!(store.identity().unwrap().unwrap().username, "carol");
    }

    #[test]
    fn clear_empties_all_slots() {
        let store = MemoryStore::new();
        store
            .set_tokens(&AccessToken::new("A1"), &RefreshToken::new("R1"))
            .unwrap();
        store.set_identity(&identity()).unwrap();

        store.clear().unwrap();

        assert!(store.access_token().unwrap().is_none());
        assert!(store.refresh_token().unwrap().is_none());
        assert!(store.identity().unwrap().is_none());
    }
}
