//! Session and registration result types.

use crate::identity::Identity;
use crate::tokens::TokenPair;

/// An established session: the issued token pair and the identity that
/// was cached alongside it.
#[derive(Debug, Clone)]
pub struct Session {
    /// The issued access/refresh pair.
    pub tokens: TokenPair,
    /// The identity record cached when the session was established.
    pub identity: Identity,
}

/// Outcome of a registration request.
///
/// The accounts API withholds tokens when the new account must be
/// verified first; in that case no session exists and nothing was
/// persisted.
#[derive(Debug, Clone)]
pub enum Registration {
    /// Tokens were issued; the session is live and persisted.
    Active(Session),
    /// The account exists but cannot log in until it is verified.
    PendingVerification {
        /// The identity record the server created.
        identity: Identity,
        /// Server-supplied instruction text, when present.
        message: Option<String>,
    },
}

impl Registration {
    /// The identity record created by the server, in either outcome.
    pub fn identity(&self) -> &Identity {
        match self {
            Registration::Active(session) => &session.identity,
            Registration::PendingVerification { identity, .. } => identity,
        }
    }

    /// Whether the account still needs verification before it can be
    /// used.
    pub fn is_pending(&self) -> bool {
        matches!(self, Registration::PendingVerification { .. })
    }
}
