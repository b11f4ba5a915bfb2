use std::env;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::Arc;

use env_logger::Env;
use log::info;
use serde_json::json;

use ipe_storage::backend::file_backend::FileBackend;
use ipe_storage::backend::memory_backend::MemoryBackend;
use ipe_storage::bridge::bridge_handler::Bridge;
use ipe_storage::bridge::types::{LoadRequest, SaveRequest, StorageSelector};
use ipe_storage::observer::log_observer::LogObserver;

fn main() {
    // Initialize logger (RUST_LOG can override; default to info)
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();

    // Durable store location: prefer the environment variable if present
    let durable_dir: PathBuf = env::var("IPE_STORAGE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            env::current_dir()
                .expect("cwd")
                .join("target")
                .join("bridge_demo")
        });
    info!("Durable store rooted at {}", durable_dir.display());

    let durable = FileBackend::new(&durable_dir).expect("create durable backend");
    let session = MemoryBackend::new();

    let (tx, rx) = channel();
    let bridge = Bridge::new(
        Arc::new(session),
        Arc::new(durable),
        Arc::new(LogObserver::new()),
        tx,
    );

    // Save a value under each selector
    bridge.save(SaveRequest {
        selector: StorageSelector::Durable,
        key: "theme".to_string(),
        value: json!("dark"),
    });
    bridge.save(SaveRequest {
        selector: StorageSelector::Session,
        key: "count".to_string(),
        value: json!(3),
    });
    info!("Saved 'theme' (durable) and 'count' (session)");

    // Load them back, plus a key that was never written
    for (selector, key) in [
        (StorageSelector::Durable, "theme"),
        (StorageSelector::Session, "count"),
        (StorageSelector::Durable, "missing"),
    ] {
        bridge.load(LoadRequest {
            selector,
            key: key.to_string(),
        });
    }

    for result in rx.try_iter() {
        info!("Result: key={} data={}", result.key, result.data);
    }

    info!("Demo complete. Inspect files under: {}", durable_dir.display());
}
