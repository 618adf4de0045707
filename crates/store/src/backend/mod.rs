//! Storage backend abstraction for the persistence port.
//!
//! The trait abstracts the underlying storage mechanism, allowing both
//! file-based (production) and in-memory (testing) implementations. The
//! unit of storage is a whole serialized document per key: the port's
//! callers rewrite a namespace in full on every mutation, so there is no
//! partial-update surface here.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use snafu::ensure;

use crate::error::{InvalidKeySnafu, Result};

/// Key-value persistence port.
///
/// Keys are restricted to `[A-Za-z0-9._-]` so the same key is valid for
/// every backend (the file backend maps keys to filenames).
pub trait StateStore: Send + Sync {
    /// Loads the document stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written; callers
    /// fall back to their documented defaults in that case.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the read fails, or
    /// `StoreError::InvalidKey` for a malformed key.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` or `StoreError::QuotaExceeded` if the
    /// write fails, or `StoreError::InvalidKey` for a malformed key.
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the document stored under `key`, if any.
    ///
    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the removal fails, or
    /// `StoreError::InvalidKey` for a malformed key.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Checks a key against the `[A-Za-z0-9._-]` whitelist.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    ensure!(valid, InvalidKeySnafu { key });
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn key_whitelist() {
        assert!(validate_key("nsb3_members").is_ok());
        assert!(validate_key("a.b-c_d9").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("has space").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("slash/key").is_err());
    }
}
