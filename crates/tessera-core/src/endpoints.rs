//! Endpoint path table for the accounts API.

/// Endpoint paths, relative to the API base URL.
///
/// The manager and transport never hardcode paths; they resolve every
/// request through this table. `Default` matches the reference accounts
/// service layout, and embedders pointing at a differently-mounted
/// service can override individual entries.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Credential login.
    pub login: String,
    /// Account creation.
    pub register: String,
    /// Server-side logout notification.
    pub logout: String,
    /// Profile read (GET) and update (PUT).
    pub profile: String,
    /// Password change.
    pub change_password: String,
    /// Account deletion.
    pub delete_account: String,
    /// Access token refresh.
    pub refresh: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "auth/login/".to_string(),
            register: "auth/register/".to_string(),
            logout: "auth/logout/".to_string(),
            profile: "auth/profile/".to_string(),
            change_password: "auth/password/change/".to_string(),
            delete_account: "auth/account/delete/".to_string(),
            refresh: "auth/token/refresh/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_are_relative() {
        let endpoints = Endpoints::default();
        for path in [
            &endpoints.login,
            &endpoints.register,
            &endpoints.logout,
            &endpoints.profile,
            &endpoints.change_password,
            &endpoints.delete_account,
            &endpoints.refresh,
        ] {
            assert!(!path.starts_with('/'), "{path} should be relative");
            assert!(!path.is_empty());
        }
    }
}
