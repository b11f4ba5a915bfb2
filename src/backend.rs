//! Storage backends
//!
//! This module provides the key-value capability the bridge delegates to.
//!
//! Components:
//! - `backend_trait`: the StorageBackend trait defining a uniform API.
//! - `memory_backend`: in-process implementation backing the session store.
//! - `file_backend`: filesystem-backed implementation backing the durable store.

pub mod backend_trait;
pub mod file_backend;
pub mod memory_backend;

pub use backend_trait::StorageBackend;
pub use file_backend::FileBackend;
pub use memory_backend::MemoryBackend;
