//! Storage bridge
//!
//! This module translates structured save/load/remove requests into backend
//! calls and load results.
//!
//! Components:
//! - `types`: wire types for requests, results, and message envelopes.
//! - `bridge_handler`: the Bridge itself, with per-channel dispatch.

pub mod bridge_handler;
pub mod types;

pub use bridge_handler::Bridge;
pub use types::{
    Envelope, LoadRequest, LoadResult, RemoveRequest, SaveRequest, StorageSelector,
    LOAD_FROM_STORAGE, RECEIVE_STORAGE_RESULT, REMOVE_FROM_STORAGE, SAVE_TO_STORAGE,
};
