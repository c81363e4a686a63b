//! Command implementations.

pub mod account;
