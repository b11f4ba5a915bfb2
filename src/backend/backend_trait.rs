//! Backend Trait
//!
//! This module defines the `StorageBackend` trait, the uniform key-value
//! capability the bridge delegates all actual storage to.
//!
//! Implementors of this trait are responsible for:
//! - Returning the stored string for a key, or `None` when absent
//! - Writing a string value under a key
//! - Removing a key
//!
//! All methods return a `Result` to handle potential backend errors.

use crate::error_handling::types::BackendError;

/// The `StorageBackend` trait defines the interface for the key-value stores
/// behind the bridge.
///
/// Two instances exist for the process lifetime: the session-scoped store and
/// the durable store. The bridge holds no storage state of its own.
pub trait StorageBackend: Send + Sync {
    /// Returns the raw stored string for `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), BackendError>;
}
