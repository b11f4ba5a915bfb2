use std::collections::HashMap;
use std::sync::Mutex;

use log::debug;

use crate::backend::backend_trait::StorageBackend;
use crate::error_handling::types::BackendError;

/// Session-scoped backend: a plain in-process map that lives exactly as long
/// as the process does.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| BackendError::ReadFailed(format!("lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| BackendError::WriteFailed(format!("lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        debug!("Stored {} byte(s) under key '{}' (session)", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| BackendError::RemoveFailed(format!("lock poisoned: {}", e)))?;
        entries.remove(key);
        debug!("Removed key '{}' (session)", key);
        Ok(())
    }
}
