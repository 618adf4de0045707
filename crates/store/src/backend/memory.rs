//! In-memory storage backend for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use snafu::ensure;

use super::{StateStore, validate_key};
use crate::error::{QuotaExceededSnafu, Result};

/// In-memory storage backend for testing.
///
/// All data lives in a map and is lost when the backend is dropped.
/// [`fail_writes`](MemoryBackend::fail_writes) simulates quota exhaustion:
/// while active, every `save` returns [`StoreError::QuotaExceeded`] and
/// leaves the stored documents untouched.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns write-failure injection on or off.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops all stored documents (for test teardown).
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl StateStore for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        ensure!(!self.fail_writes.load(Ordering::SeqCst), QuotaExceededSnafu { key });
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.entries.write().remove(key);
        Ok(())
    }
}
