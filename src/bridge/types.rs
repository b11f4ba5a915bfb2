use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound channel carrying save requests.
pub const SAVE_TO_STORAGE: &str = "saveToStorage";
/// Inbound channel carrying load requests.
pub const LOAD_FROM_STORAGE: &str = "loadFromStorage";
/// Inbound channel carrying remove requests.
pub const REMOVE_FROM_STORAGE: &str = "removeFromStorage";
/// Outbound channel carrying load results.
pub const RECEIVE_STORAGE_RESULT: &str = "receiveStorageResult";

/// Caller-supplied choice of which backend a request targets.
///
/// The wire encoding is `"local"` for the durable store and `"session"` for
/// the session store. Anything else fails validation and is handled as a
/// malformed request rather than silently falling back to the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageSelector {
    #[serde(rename = "local")]
    Durable,
    #[serde(rename = "session")]
    Session,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(rename = "storageType")]
    pub selector: StorageSelector,
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    #[serde(rename = "storageType")]
    pub selector: StorageSelector,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveRequest {
    #[serde(rename = "storageType")]
    pub selector: StorageSelector,
    pub key: String,
}

/// Answer to one load request. `data` is JSON null when the key was absent,
/// the read failed, or the request itself was unreadable. The caller
/// correlates it to its request by the echoed `key` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
    pub key: String,
    pub data: Value,
}

/// One message on the wire: a channel name plus its payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub channel: String,
    pub payload: Value,
}
