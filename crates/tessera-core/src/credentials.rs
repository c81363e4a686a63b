//! Credential and account-input types.
//!
//! Everything here is transient request input: consumed by one API call
//! and never persisted by the session store.

use std::fmt;

/// Login credentials for the accounts API.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental
/// logging.
///
/// # Example
///
/// ```
/// use tessera_core::Credentials;
///
/// let creds = Credentials::new("alice", "hunter2");
/// assert_eq!(creds.username(), "alice");
/// ```
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    /// Never log or display this value.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Clone is intentionally implemented to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Input for creating a new account.
///
/// The server enforces that `password` and `password_confirm` match;
/// this type does not duplicate that check.
///
/// # Security
///
/// Both password fields are hidden from Debug output.
#[derive(Clone)]
pub struct RegistrationForm {
    /// Desired username.
    pub username: String,
    /// Account e-mail address.
    pub email: String,
    /// Desired password.
    pub password: String,
    /// Password again, for server-side confirmation.
    pub password_confirm: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

impl RegistrationForm {
    /// Create a registration form with the required fields.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            password_confirm: password_confirm.into(),
            first_name: None,
            last_name: None,
        }
    }

    /// Set the given name.
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Set the family name.
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }
}

// Intentionally hide both password fields in Debug output
impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirm", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Input for changing the account password.
///
/// # Security
///
/// All three fields are hidden from Debug output.
#[derive(Clone)]
pub struct PasswordChange {
    old_password: String,
    new_password: String,
    new_password_confirm: String,
}

impl PasswordChange {
    /// Create a password change request.
    pub fn new(
        old_password: impl Into<String>,
        new_password: impl Into<String>,
        new_password_confirm: impl Into<String>,
    ) -> Self {
        Self {
            old_password: old_password.into(),
            new_password: new_password.into(),
            new_password_confirm: new_password_confirm.into(),
        }
    }

    /// Returns the current password.
    pub fn old_password(&self) -> &str {
        &self.old_password
    }

    /// Returns the replacement password.
    pub fn new_password(&self) -> &str {
        &self.new_password
    }

    /// Returns the replacement password confirmation.
    pub fn new_password_confirm(&self) -> &str {
        &self.new_password_confirm
    }
}

// Intentionally hide all fields in Debug output
impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("old_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .field("new_password_confirm", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_password_in_debug() {
        let creds = Credentials::new("alice", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn registration_form_hides_passwords_in_debug() {
        let form = RegistrationForm::new("bob", "bob@example.com", "pw-one", "pw-one")
            .with_first_name("Bob");
        let debug = format!("{:?}", form);
        assert!(debug.contains("bob@example.com"));
        assert!(debug.contains("Bob"));
        assert!(!debug.contains("pw-one"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn password_change_hides_all_fields_in_debug() {
        let change = PasswordChange::new("old-pw", "new-pw", "new-pw");
        let debug = format!("{:?}", change);
        assert!(!debug.contains("old-pw"));
        assert!(!debug.contains("new-pw"));
        assert!(debug.contains("[REDACTED]"));
    }
}
