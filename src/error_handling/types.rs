use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    NotADirectory(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::NotADirectory(e) => write!(f, "Not a directory: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

/// Raised when a storage backend refuses an operation (disabled store,
/// quota, permission, poisoned lock).
#[derive(Debug)]
pub enum BackendError {
    ReadFailed(String),
    WriteFailed(String),
    RemoveFailed(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ReadFailed(e) => write!(f, "Backend read failed: {}", e),
            BackendError::WriteFailed(e) => write!(f, "Backend write failed: {}", e),
            BackendError::RemoveFailed(e) => write!(f, "Backend remove failed: {}", e),
        }
    }
}

impl std::error::Error for BackendError {}

/// Everything that can go wrong while handling one bridge request.
///
/// None of these terminate the bridge: each is caught at the handler
/// boundary and converted into an observer report.
#[derive(Debug)]
pub enum BridgeError {
    Serialization(String),
    Deserialization(String),
    Backend(BackendError),
    MalformedRequest(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Serialization(e) => write!(f, "Serialization failed: {}", e),
            BridgeError::Deserialization(e) => write!(f, "Deserialization failed: {}", e),
            BridgeError::Backend(e) => write!(f, "Backend error: {}", e),
            BridgeError::MalformedRequest(e) => write!(f, "Malformed request: {}", e),
        }
    }
}

impl std::error::Error for BridgeError {}

impl From<BackendError> for BridgeError {
    fn from(err: BackendError) -> Self {
        BridgeError::Backend(err)
    }
}
