use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::backend::backend_trait::StorageBackend;
use crate::error_handling::types::BackendError;

/// Durable backend: one file per key under a base directory, surviving
/// process restarts.
///
/// Keys are arbitrary strings, so the file name is a hex encoding of the key
/// bytes rather than the key itself. This keeps keys containing separators or
/// dots from escaping the base directory.
pub struct FileBackend {
    base_path: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, BackendError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| {
            error!("Failed to create storage dir {}: {}", base_path.display(), e);
            BackendError::WriteFailed(format!("create dir {}: {}", base_path.display(), e))
        })?;
        info!("FileBackend initialized at {}", base_path.display());
        Ok(Self { base_path })
    }

    /// Construct FileBackend using env var IPE_STORAGE_DIR if set, otherwise current directory.
    pub fn new_default() -> Result<Self, BackendError> {
        if let Ok(dir) = std::env::var("IPE_STORAGE_DIR") {
            info!("Using FileBackend from IPE_STORAGE_DIR: {}", dir);
            return Self::new(PathBuf::from(dir));
        }
        let cwd = std::env::current_dir().map_err(|e| {
            error!("Failed to get current dir: {}", e);
            BackendError::ReadFailed(format!("current dir: {}", e))
        })?;
        info!("Using FileBackend at current directory: {}", cwd.display());
        Self::new(cwd)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() * 2);
        for byte in key.as_bytes() {
            name.push_str(&format!("{:02x}", byte));
        }
        self.base_path.join(format!("{}.kv", name))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                debug!("Read {} byte(s) from {}", value.len(), path.display());
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Read failed {}: {}", path.display(), e);
                Err(BackendError::ReadFailed(format!("{}: {}", path.display(), e)))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let path = self.entry_path(key);
        fs::write(&path, value).map_err(|e| {
            error!("Write failed {}: {}", path.display(), e);
            BackendError::WriteFailed(format!("{}: {}", path.display(), e))
        })?;
        debug!("Wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Remove failed {}: {}", path.display(), e);
                Err(BackendError::RemoveFailed(format!("{}: {}", path.display(), e)))
            }
        }
    }
}
