pub mod log_observer;
pub mod observer_trait;

pub use log_observer::LogObserver;
pub use observer_trait::{Observer, Severity};
