use log::{error, warn};

use crate::error_handling::types::BridgeError;
use crate::observer::observer_trait::{Observer, Severity};

/// Observer that forwards every report to the `log` facade.
#[derive(Default)]
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LogObserver {
    fn report(&self, severity: Severity, message: &str, cause: &BridgeError) {
        match severity {
            Severity::Error => error!("{}: {}", message, cause),
            Severity::Warning => warn!("{}: {}", message, cause),
        }
    }
}
