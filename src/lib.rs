pub mod backend;
pub use backend::*;

pub mod bridge;
pub use bridge::*;

pub mod observer;
pub use observer::*;

pub mod configuration;
pub use configuration::*;

pub mod error_handling;
