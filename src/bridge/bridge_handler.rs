use std::sync::mpsc::Sender;
use std::sync::Arc;

use log::{debug, error};
use serde::Serialize;
use serde_json::Value;

use crate::backend::backend_trait::StorageBackend;
use crate::bridge::types::{
    LoadRequest, LoadResult, RemoveRequest, SaveRequest, StorageSelector, LOAD_FROM_STORAGE,
    REMOVE_FROM_STORAGE, SAVE_TO_STORAGE,
};
use crate::error_handling::types::BridgeError;
use crate::observer::observer_trait::{Observer, Severity};

/// The structure translating storage requests into backend calls
///
/// The bridge owns no storage state: it holds the two process-lifetime
/// backends, the observer for non-fatal reports, and the outbound channel for
/// load results. Each request maps to exactly one backend call, and no
/// failure propagates past the handler that produced it.
///
/// # Fields Overview
///
/// - `session`: backend answering requests with the `session` selector
/// - `durable`: backend answering requests with the `local` selector
/// - `observer`: sink for error and warning reports, never affects control flow
/// - `results`: outbound channel delivering one `LoadResult` per load request
pub struct Bridge {
    session: Arc<dyn StorageBackend>,
    durable: Arc<dyn StorageBackend>,
    observer: Arc<dyn Observer>,
    results: Sender<LoadResult>,
}

impl Bridge {
    pub fn new(
        session: Arc<dyn StorageBackend>,
        durable: Arc<dyn StorageBackend>,
        observer: Arc<dyn Observer>,
        results: Sender<LoadResult>,
    ) -> Self {
        Self {
            session,
            durable,
            observer,
            results,
        }
    }

    fn backend_for(&self, selector: StorageSelector) -> &dyn StorageBackend {
        match selector {
            StorageSelector::Durable => self.durable.as_ref(),
            StorageSelector::Session => self.session.as_ref(),
        }
    }

    /// Routes one inbound message to its handler.
    ///
    /// Payload validation happens here: a payload that does not deserialize
    /// into the channel's request type is reported as a malformed request and
    /// goes no further. A malformed load still answers the caller with a
    /// null-bearing result, echoing whatever key could be salvaged.
    pub fn dispatch(&self, channel: &str, payload: Value) {
        debug!("Dispatching '{}' request", channel);
        match channel {
            SAVE_TO_STORAGE => match serde_json::from_value::<SaveRequest>(payload) {
                Ok(request) => self.save(request),
                Err(e) => self.observer.report(
                    Severity::Error,
                    "Failed to save to storage",
                    &BridgeError::MalformedRequest(e.to_string()),
                ),
            },
            LOAD_FROM_STORAGE => match serde_json::from_value::<LoadRequest>(payload.clone()) {
                Ok(request) => self.load(request),
                Err(e) => {
                    self.observer.report(
                        Severity::Error,
                        "Failed to load from storage",
                        &BridgeError::MalformedRequest(e.to_string()),
                    );
                    let key = payload
                        .get("key")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                        .to_string();
                    self.send_result(LoadResult {
                        key,
                        data: Value::Null,
                    });
                }
            },
            REMOVE_FROM_STORAGE => match serde_json::from_value::<RemoveRequest>(payload) {
                Ok(request) => self.remove(request),
                Err(e) => self.observer.report(
                    Severity::Error,
                    "Failed to remove from storage",
                    &BridgeError::MalformedRequest(e.to_string()),
                ),
            },
            other => self.observer.report(
                Severity::Error,
                "Unhandled channel",
                &BridgeError::MalformedRequest(format!("no handler for channel '{}'", other)),
            ),
        }
    }

    /// Fire-and-forget write. Failures are visible only through the observer.
    pub fn save(&self, request: SaveRequest) {
        self.save_value(request.selector, &request.key, &request.value);
    }

    /// JSON-encodes `value` and writes it under `key` on the selected backend.
    ///
    /// An encode failure produces no backend call at all, so a failed save
    /// leaves whatever was stored before untouched.
    pub fn save_value<T: Serialize>(&self, selector: StorageSelector, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                self.observer.report(
                    Severity::Error,
                    "Failed to save to storage",
                    &BridgeError::Serialization(e.to_string()),
                );
                return;
            }
        };
        if let Err(e) = self.backend_for(selector).set(key, &encoded) {
            self.observer.report(
                Severity::Error,
                "Failed to save to storage",
                &BridgeError::Backend(e),
            );
        }
    }

    /// Answers with exactly one `LoadResult` on the outbound channel.
    ///
    /// An absent key and a failed read both collapse to `data: null`; only
    /// the failed read is reported. A stored string that is not valid JSON is
    /// delivered as-is with a warning.
    pub fn load(&self, request: LoadRequest) {
        let data = match self.backend_for(request.selector).get(&request.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    self.observer.report(
                        Severity::Warning,
                        "Stored data is not valid JSON, treating as string",
                        &BridgeError::Deserialization(e.to_string()),
                    );
                    Value::String(raw)
                }
            },
            Ok(None) => Value::Null,
            Err(e) => {
                self.observer.report(
                    Severity::Error,
                    "Failed to load from storage",
                    &BridgeError::Backend(e),
                );
                Value::Null
            }
        };
        self.send_result(LoadResult {
            key: request.key,
            data,
        });
    }

    /// Fire-and-forget delete. Failures are visible only through the observer.
    pub fn remove(&self, request: RemoveRequest) {
        if let Err(e) = self.backend_for(request.selector).remove(&request.key) {
            self.observer.report(
                Severity::Error,
                "Failed to remove from storage",
                &BridgeError::Backend(e),
            );
        }
    }

    fn send_result(&self, result: LoadResult) {
        if self.results.send(result).is_err() {
            error!("Result channel closed, dropping load result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory_backend::MemoryBackend;
    use crate::error_handling::types::BackendError;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::mpsc::{channel, Receiver};
    use std::sync::Mutex;

    struct RecordingObserver {
        reports: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingObserver {
        fn new() -> Self {
            Self {
                reports: Mutex::new(Vec::new()),
            }
        }

        fn reports(&self) -> Vec<(Severity, String)> {
            self.reports.lock().unwrap().clone()
        }
    }

    impl Observer for RecordingObserver {
        fn report(&self, severity: Severity, message: &str, _cause: &BridgeError) {
            self.reports
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    struct FailingBackend;

    impl StorageBackend for FailingBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, BackendError> {
            Err(BackendError::ReadFailed("storage disabled".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), BackendError> {
            Err(BackendError::WriteFailed("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), BackendError> {
            Err(BackendError::RemoveFailed("storage disabled".into()))
        }
    }

    struct Harness {
        bridge: Bridge,
        session: Arc<MemoryBackend>,
        durable: Arc<MemoryBackend>,
        observer: Arc<RecordingObserver>,
        results: Receiver<LoadResult>,
    }

    fn harness() -> Harness {
        let session = Arc::new(MemoryBackend::new());
        let durable = Arc::new(MemoryBackend::new());
        let observer = Arc::new(RecordingObserver::new());
        let (tx, rx) = channel();
        let bridge = Bridge::new(
            session.clone(),
            durable.clone(),
            observer.clone(),
            tx,
        );
        Harness {
            bridge,
            session,
            durable,
            observer,
            results: rx,
        }
    }

    fn failing_harness() -> (Bridge, Arc<RecordingObserver>, Receiver<LoadResult>) {
        let observer = Arc::new(RecordingObserver::new());
        let (tx, rx) = channel();
        let bridge = Bridge::new(
            Arc::new(FailingBackend),
            Arc::new(FailingBackend),
            observer.clone(),
            tx,
        );
        (bridge, observer, rx)
    }

    #[test]
    fn test_save_then_load_roundtrip_string() {
        let h = harness();
        h.bridge.save_value(StorageSelector::Durable, "theme", &"dark");
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Durable,
            key: "theme".to_string(),
        });
        let result = h.results.recv().unwrap();
        assert_eq!(result.key, "theme");
        assert_eq!(result.data, json!("dark"));
        assert!(h.observer.reports().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_numbers() {
        let h = harness();
        h.bridge.save_value(StorageSelector::Session, "count", &3);
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Session,
            key: "count".to_string(),
        });
        let result = h.results.recv().unwrap();
        assert_eq!(result.data, json!(3));
    }

    #[test]
    fn test_save_then_load_preserves_structure() {
        let h = harness();
        let value = json!({"filters": ["a", "b"], "page": 2, "open": true});
        h.bridge.save(SaveRequest {
            selector: StorageSelector::Durable,
            key: "state".to_string(),
            value: value.clone(),
        });
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Durable,
            key: "state".to_string(),
        });
        assert_eq!(h.results.recv().unwrap().data, value);
    }

    #[test]
    fn test_load_missing_key_is_null_without_report() {
        let h = harness();
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Durable,
            key: "missing".to_string(),
        });
        let result = h.results.recv().unwrap();
        assert_eq!(result.key, "missing");
        assert_eq!(result.data, Value::Null);
        assert!(h.observer.reports().is_empty());
    }

    #[test]
    fn test_remove_then_load_is_null() {
        let h = harness();
        h.bridge.save_value(StorageSelector::Session, "token", &"abc");
        h.bridge.remove(RemoveRequest {
            selector: StorageSelector::Session,
            key: "token".to_string(),
        });
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Session,
            key: "token".to_string(),
        });
        assert_eq!(h.results.recv().unwrap().data, Value::Null);
    }

    #[test]
    fn test_selectors_are_isolated() {
        let h = harness();
        h.bridge.save_value(StorageSelector::Durable, "k", &1);
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Session,
            key: "k".to_string(),
        });
        assert_eq!(h.results.recv().unwrap().data, Value::Null);
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Durable,
            key: "k".to_string(),
        });
        assert_eq!(h.results.recv().unwrap().data, json!(1));
    }

    #[test]
    fn test_unencodable_value_writes_nothing() {
        let h = harness();
        h.bridge.save_value(StorageSelector::Durable, "k", &"before");
        // maps with non-string keys cannot be encoded as JSON objects
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8, 2u8], "x");
        h.bridge.save_value(StorageSelector::Durable, "k", &bad);
        let reports = h.observer.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, Severity::Error);
        // previous value is untouched
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Durable,
            key: "k".to_string(),
        });
        assert_eq!(h.results.recv().unwrap().data, json!("before"));
    }

    #[test]
    fn test_non_json_stored_data_falls_back_to_raw_string() {
        let h = harness();
        // simulate data written by something other than the bridge
        h.durable.set("legacy", "plain text, no quotes").unwrap();
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Durable,
            key: "legacy".to_string(),
        });
        let result = h.results.recv().unwrap();
        assert_eq!(result.data, json!("plain text, no quotes"));
        let reports = h.observer.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, Severity::Warning);
    }

    #[test]
    fn test_backend_read_failure_yields_null_result() {
        let (bridge, observer, results) = failing_harness();
        bridge.load(LoadRequest {
            selector: StorageSelector::Durable,
            key: "k".to_string(),
        });
        let result = results.recv().unwrap();
        assert_eq!(result.key, "k");
        assert_eq!(result.data, Value::Null);
        let reports = observer.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, Severity::Error);
    }

    #[test]
    fn test_backend_write_failure_is_report_only() {
        let (bridge, observer, results) = failing_harness();
        bridge.save_value(StorageSelector::Session, "k", &1);
        assert_eq!(observer.reports().len(), 1);
        // save has no response channel
        assert!(results.try_recv().is_err());
    }

    #[test]
    fn test_backend_remove_failure_is_report_only() {
        let (bridge, observer, results) = failing_harness();
        bridge.remove(RemoveRequest {
            selector: StorageSelector::Session,
            key: "k".to_string(),
        });
        assert_eq!(observer.reports().len(), 1);
        assert!(results.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_save_then_load() {
        let h = harness();
        h.bridge.dispatch(
            SAVE_TO_STORAGE,
            json!({"storageType": "local", "key": "theme", "value": "dark"}),
        );
        h.bridge.dispatch(
            LOAD_FROM_STORAGE,
            json!({"storageType": "local", "key": "theme"}),
        );
        let result = h.results.recv().unwrap();
        assert_eq!(result.key, "theme");
        assert_eq!(result.data, json!("dark"));
    }

    #[test]
    fn test_dispatch_remove() {
        let h = harness();
        h.session.set("token", "\"abc\"").unwrap();
        h.bridge.dispatch(
            REMOVE_FROM_STORAGE,
            json!({"storageType": "session", "key": "token"}),
        );
        assert_eq!(h.session.get("token").unwrap(), None);
    }

    #[test]
    fn test_dispatch_payload_missing_key_is_malformed() {
        let h = harness();
        h.bridge
            .dispatch(SAVE_TO_STORAGE, json!({"storageType": "local"}));
        let reports = h.observer.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, Severity::Error);
    }

    #[test]
    fn test_dispatch_unknown_selector_is_malformed() {
        let h = harness();
        h.bridge.dispatch(
            LOAD_FROM_STORAGE,
            json!({"storageType": "cloud", "key": "theme"}),
        );
        // the caller still gets an answer, with the key salvaged from the payload
        let result = h.results.recv().unwrap();
        assert_eq!(result.key, "theme");
        assert_eq!(result.data, Value::Null);
        assert_eq!(h.observer.reports().len(), 1);
    }

    #[test]
    fn test_dispatch_unreadable_load_answers_with_empty_key() {
        let h = harness();
        h.bridge.dispatch(LOAD_FROM_STORAGE, json!("not an object"));
        let result = h.results.recv().unwrap();
        assert_eq!(result.key, "");
        assert_eq!(result.data, Value::Null);
        assert_eq!(h.observer.reports().len(), 1);
    }

    #[test]
    fn test_dispatch_unknown_channel_is_reported() {
        let h = harness();
        h.bridge.dispatch("clearStorage", json!({}));
        let reports = h.observer.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, Severity::Error);
    }

    #[test]
    fn test_results_arrive_in_dispatch_order() {
        let h = harness();
        h.bridge.save_value(StorageSelector::Session, "k", &1);
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Session,
            key: "k".to_string(),
        });
        h.bridge.save_value(StorageSelector::Session, "k", &2);
        h.bridge.load(LoadRequest {
            selector: StorageSelector::Session,
            key: "k".to_string(),
        });
        assert_eq!(h.results.recv().unwrap().data, json!(1));
        assert_eq!(h.results.recv().unwrap().data, json!(2));
    }
}
