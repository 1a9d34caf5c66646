use crate::app::ports::CacheStorePort;
use crate::error::{Result, ThresholdError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Cache store keeping one `<key>.json` file per key under `root`.
///
/// Writes go to a temporary sibling which is then renamed over the
/// target, so a reader never observes a half-written entry.
pub struct FsCacheStore {
    root: PathBuf,
}

impl FsCacheStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ThresholdError::Config(format!(
                "invalid cache key '{}'",
                key
            )));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl CacheStorePort for FsCacheStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root)?;
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        debug!("Wrote cache file {}", path.display());
        Ok(())
    }
}
