//! Error types for the gearcore adapter

use thiserror::Error;

/// Error category reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorKind {
    /// The ROM could not be loaded
    CouldntLoadRom,
    /// A file could not be opened, read or written
    Io,
    /// The engine failed for a reason opaque to the adapter
    Internal,
}

impl std::fmt::Display for CoreErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CouldntLoadRom => write!(f, "couldn't load rom"),
            Self::Io => write!(f, "io"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Main error type surfaced to the host
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Couldn't load ROM: {0}")]
    RomLoad(String),

    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Internal(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl CoreError {
    /// Wrap an I/O failure with a short description of what was attempted
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Category used by the host's error convention
    pub fn kind(&self) -> CoreErrorKind {
        match self {
            Self::RomLoad(_) => CoreErrorKind::CouldntLoadRom,
            Self::Io { .. } => CoreErrorKind::Io,
            Self::Internal(_) | Self::Config(_) => CoreErrorKind::Internal,
        }
    }
}

/// Errors raised by an emulation engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid ROM: {0}")]
    InvalidRom(String),

    #[error("State serialization failed: {0}")]
    StateSave(String),

    #[error("State deserialization failed: {0}")]
    StateLoad(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::RomLoad("bad header".to_string());
        assert_eq!(format!("{}", err), "Couldn't load ROM: bad header");

        let err = CoreError::io(
            "Failed to open state file",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(format!("{}", err), "Failed to open state file: no such file");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            CoreError::RomLoad(String::new()).kind(),
            CoreErrorKind::CouldntLoadRom
        );
        assert_eq!(
            CoreError::Internal("Failed to save state".into()).kind(),
            CoreErrorKind::Internal
        );
        let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert_eq!(CoreError::io("denied", io).kind(), CoreErrorKind::Io);
    }

    #[test]
    fn test_engine_error_conversion() {
        let io = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
