//! Error types for Confab.

use thiserror::Error;

/// Common error type for Confab.
#[derive(Error, Debug)]
pub enum ConfabError {
    /// Buffer store error.
    ///
    /// A generic storage error that wraps failures from any buffer-store
    /// backend. The dispatcher propagates these unmodified to its caller.
    #[error("store error: {0}")]
    Store(String),

    /// Server connection error.
    ///
    /// Raised by server interfaces and connectors when a protocol action
    /// cannot be carried out.
    #[error("connection error: {0}")]
    Connection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Confab operations.
pub type Result<T> = std::result::Result<T, ConfabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = ConfabError::Store("write failed".to_string());
        assert_eq!(err.to_string(), "store error: write failed");
    }

    #[test]
    fn test_connection_error_display() {
        let err = ConfabError::Connection("connection reset".to_string());
        assert_eq!(err.to_string(), "connection error: connection reset");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = ConfabError::NotFound("buffer 42".to_string());
        assert_eq!(err.to_string(), "buffer 42 not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfabError::Config("bad prefix".to_string());
        assert_eq!(err.to_string(), "configuration error: bad prefix");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConfabError = io_err.into();
        assert!(matches!(err, ConfabError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(ConfabError::Store("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
