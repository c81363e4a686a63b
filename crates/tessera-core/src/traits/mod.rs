//! Core traits for transport and persistence behavior.

mod api;
mod store;

pub use api::{AccountsApi, LoginOutput, RefreshOutput, RefreshedTokens, RegisterOutput};
pub use store::SessionStore;
