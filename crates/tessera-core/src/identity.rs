//! The cached user identity record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile record of the authenticated user.
///
/// Field names follow the accounts API wire format, so the same type
/// decodes responses and round-trips through the session store. The
/// cached copy is a snapshot: it is refreshed on every successful
/// profile read but may lag behind the server in between.
///
/// Only `id` and `username` are required on the wire; servers routinely
/// omit the rest on sparse responses such as registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Server-assigned numeric user id.
    pub id: u64,
    /// Unique username.
    pub username: String,
    /// Account e-mail address.
    #[serde(default)]
    pub email: String,
    /// Given name, if set.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name, if set.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Whether the account is active.
    #[serde(default)]
    pub is_active: bool,
    /// Whether the account has staff privileges.
    #[serde(default)]
    pub is_staff: bool,
    /// Whether the account has superuser privileges.
    #[serde(default)]
    pub is_superuser: bool,
    /// When the account was created.
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

/// Partial profile fields for an update.
///
/// Only fields that are set get serialized; the server leaves absent
/// fields untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    /// New e-mail address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}
