//! tessera-rest - HTTP transport for the accounts API.
//!
//! [`RestAccountsApi`] implements
//! [`AccountsApi`](tessera_core::AccountsApi) against a real accounts
//! service: JSON bodies, bearer authentication on protected endpoints,
//! and the `detail`/`error` reason extraction for non-success
//! responses.

mod api;
mod client;
mod endpoints;

pub use api::RestAccountsApi;
