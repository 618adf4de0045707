//! boardroom-store: the key-value persistence port for the board core.
//!
//! The core holds all state in memory; durability goes through this port,
//! one JSON document per namespace key. Two implementations:
//!
//! - [`FileBackend`]: one file per key under a root directory (production)
//! - [`MemoryBackend`]: a map behind a lock, with write-failure injection
//!   for quota-exhaustion tests
//!
//! Callers treat writes as fire-and-forget: a failed save is reported via
//! [`StoreError`] but the in-memory state remains the source of truth for
//! the session.

pub mod backend;
mod error;

pub use backend::{FileBackend, MemoryBackend, StateStore};
pub use error::{Result, StoreError};
