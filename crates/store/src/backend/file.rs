//! File-based storage backend.
//!
//! Stores one document per key as `<root>/<key>.json`. Writes go to a
//! temporary sibling first and are renamed into place, so a torn write
//! never corrupts the previously stored document.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use snafu::ResultExt;

use super::{StateStore, validate_key};
use crate::error::{IoSnafu, Result};

/// File-per-key storage backend.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Opens a backend rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        fs::create_dir_all(&root).context(IoSnafu { path: root.clone() })?;
        Ok(Self { root })
    }

    /// Root directory of this backend.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl StateStore for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(IoSnafu { path }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!("{key}.json.tmp"));

        {
            let mut f = fs::File::create(&tmp).context(IoSnafu { path: tmp.clone() })?;
            f.write_all(value.as_bytes()).context(IoSnafu { path: tmp.clone() })?;
            f.sync_all().context(IoSnafu { path: tmp.clone() })?;
        }
        fs::rename(&tmp, &path).context(IoSnafu { path })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(IoSnafu { path }),
        }
    }
}
