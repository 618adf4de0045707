//! Error types for the persistence port.

use std::path::PathBuf;

use snafu::Snafu;

/// Result type for store operations.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Errors raised by [`StateStore`](crate::StateStore) implementations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StoreError {
    /// Filesystem operation failed.
    #[snafu(display("I/O error at {}: {source}", path.display()))]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Key contains characters outside `[A-Za-z0-9._-]` or is empty.
    #[snafu(display("invalid store key '{key}'; allowed: [A-Za-z0-9._-]"))]
    InvalidKey {
        /// The rejected key.
        key: String,
    },

    /// Write rejected because the backing store is out of space.
    ///
    /// Raised by [`MemoryBackend`](crate::MemoryBackend) when failure
    /// injection is on; a file backend surfaces the same condition as
    /// [`StoreError::Io`].
    #[snafu(display("write rejected for key '{key}': storage quota exceeded"))]
    QuotaExceeded {
        /// The key whose write was rejected.
        key: String,
    },
}
