//! tessera-store - Session persistence backends.
//!
//! Three [`SessionStore`](tessera_core::SessionStore) implementations:
//! [`FileStore`] keeps the session in JSON files on disk, by default the
//! right choice for CLIs and desktop tools; [`MemoryStore`] holds it in
//! process memory for tests and short-lived embedders; [`NoopStore`] is
//! the fallback for environments with no persistence medium at all.

mod file;
mod memory;
mod noop;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use noop::NoopStore;
