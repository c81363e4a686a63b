//! Session store trait.

use crate::error::StorageError;
use crate::identity::Identity;
use crate::tokens::{AccessToken, RefreshToken};

/// Durable storage for the three session slots: access token, refresh
/// token and cached identity.
///
/// Implementations are synchronous by contract; the manager performs no
/// locking around reads and writes. An environment without a usable
/// persistence medium gets a store that accepts every write and reports
/// every slot absent rather than one that fails.
pub trait SessionStore: Send + Sync {
    /// Returns the stored access token, if any.
    fn access_token(&self) -> Result<Option<AccessToken>, StorageError>;

    /// Returns the stored refresh token, if any.
    fn refresh_token(&self) -> Result<Option<RefreshToken>, StorageError>;

    /// Stores both tokens as one write. A reader never observes one
    /// slot updated without the other.
    fn set_tokens(&self, access: &AccessToken, refresh: &RefreshToken)
    -> Result<(), StorageError>;

    /// Returns the cached identity, if any.
    ///
    /// A stored record that exists but does not decode is a
    /// [`StorageError::Parse`], never a silent `None`.
    fn identity(&self) -> Result<Option<Identity>, StorageError>;

    /// Caches the identity record.
    fn set_identity(&self, identity: &Identity) -> Result<(), StorageError>;

    /// Removes all three slots. Idempotent: clearing an empty store
    /// succeeds.
    fn clear(&self) -> Result<(), StorageError>;
}
