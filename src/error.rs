//! Error types for devshell-watch.

use std::path::PathBuf;

/// Result type alias for devshell-watch operations.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Errors that can occur in the shell plumbing.
///
/// A watched path that does not exist is never an error; it is skipped.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A modification-time query failed for a reason other than non-existence.
    #[error("Failed to probe {}: {source}", .path.display())]
    Probe {
        /// Path that was being queried
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// A polling interval of zero was requested.
    #[error("Poll interval must be greater than zero")]
    ZeroInterval,

    /// Failed to load shell configuration.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// Failed to deserialize configuration or a response payload.
    #[error("Failed to deserialize: {0}")]
    DeserializationError(String),

    /// Secrets file could not be read.
    #[error("Failed to read secrets file {}: {source}", .path.display())]
    Secrets {
        /// Path of the secrets file
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// No binding is registered under the requested name.
    #[error("Unknown binding: {0}")]
    UnknownBinding(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Shell error: {0}")]
    Other(String),
}

#[cfg(feature = "weather")]
impl From<reqwest::Error> for ShellError {
    fn from(err: reqwest::Error) -> Self {
        ShellError::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_probe_error_names_path() {
        let err = ShellError::Probe {
            path: PathBuf::from("/srv/app/index.html"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/srv/app/index.html"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ShellError = io::Error::other("boom").into();
        assert!(matches!(err, ShellError::IoError(_)));
    }
}
