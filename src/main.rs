use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::channel;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};

use ipe_storage::backend::file_backend::FileBackend;
use ipe_storage::backend::memory_backend::MemoryBackend;
use ipe_storage::bridge::bridge_handler::Bridge;
use ipe_storage::bridge::types::{Envelope, RECEIVE_STORAGE_RESULT};
use ipe_storage::configuration::config::Config;
use ipe_storage::observer::log_observer::LogObserver;

#[derive(Parser)]
#[command(name = "ipe-storage")]
#[command(version = "0.1.0")]
#[command(about = "Key-value storage bridge speaking line-delimited JSON on stdin/stdout")]
struct Args {
    /// Optional TOML configuration file
    config_file: Option<String>,
}

fn main() {
    // Example how to log
    // https://docs.rs/env_logger/latest/env_logger/
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    let args = Args::parse();

    let config = match &args.config_file {
        Some(path) => match Config::from_file(Path::new(path.as_str())) {
            Ok(config) => config,
            Err(e) => {
                error!("Unable to import configuration from file: {:?}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let durable = match &config.durable_dir {
        Some(dir) => FileBackend::new(dir),
        None => FileBackend::new_default(),
    };
    let durable = match durable {
        Ok(backend) => backend,
        Err(e) => {
            error!("Unable to initialize the durable backend: {:?}", e);
            std::process::exit(1);
        }
    };

    let (tx, rx) = channel();
    let bridge = Bridge::new(
        Arc::new(MemoryBackend::new()),
        Arc::new(durable),
        Arc::new(LogObserver::new()),
        tx,
    );

    info!("Storage bridge ready, reading requests from stdin");

    let stdin = io::stdin();
    let stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Envelope>(&line) {
            Ok(envelope) => bridge.dispatch(&envelope.channel, envelope.payload),
            Err(e) => {
                warn!("Ignoring unreadable message: {}", e);
                continue;
            }
        }

        // each request completes before the next is read, so draining here
        // preserves send order
        let mut out = stdout.lock();
        for result in rx.try_iter() {
            match serde_json::to_value(&result) {
                Ok(payload) => {
                    let envelope = Envelope {
                        channel: RECEIVE_STORAGE_RESULT.to_string(),
                        payload,
                    };
                    match serde_json::to_string(&envelope) {
                        Ok(wire) => {
                            if writeln!(out, "{}", wire).is_err() {
                                error!("Failed to write result to stdout");
                            }
                        }
                        Err(e) => error!("Failed to encode result envelope: {}", e),
                    }
                }
                Err(e) => error!("Failed to encode load result: {}", e),
            }
        }
    }

    info!("Input closed, shutting down");
}
