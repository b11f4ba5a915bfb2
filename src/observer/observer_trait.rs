use crate::error_handling::types::BridgeError;

/// How serious a report is. `Warning` covers recoverable oddities (stored
/// data that is not valid JSON); `Error` covers failed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// The `Observer` trait is the sink for non-fatal error and warning reports.
///
/// Reports are fire-and-forget: an implementation must never fail or block
/// the bridge, and never affects control flow.
pub trait Observer: Send + Sync {
    fn report(&self, severity: Severity, message: &str, cause: &BridgeError);
}
