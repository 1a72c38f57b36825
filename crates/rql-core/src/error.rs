//! Error types and handling for rql-core operations.
//!
//! All public functions in rql-core return `Result<T, Error>` for consistent
//! error handling. Variants are categorized so the CLI can map them onto
//! semantic exit codes without string matching.

use thiserror::Error;

/// The main error type for rql-core operations.
///
/// `Display` provides user-friendly messages; the full chain is available
/// through `source()` where an underlying error exists.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers writes to the output and error streams as well as terminal
    /// mode changes made by the pager.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized.
    ///
    /// Should not occur for well-formed documents; surfaced to the caller
    /// rather than swallowed when it does.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// An invalid combination of format, style, or page size was requested.
    ///
    /// Raised at strategy-selection time, before any query execution.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The query driver failed while producing results.
    ///
    /// Covers malformed documents on the wire and faults raised
    /// mid-iteration by a cursor.
    #[error("Driver error: {0}")]
    Driver(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// Useful for grouping errors in logs and for exit-code mapping in the
    /// CLI layer.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Encode(_) => "encode",
            Self::Config(_) => "config",
            Self::Driver(_) => "driver",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Encode("bad number".to_string()),
            Error::Config("unknown format".to_string()),
            Error::Driver("cursor fault".to_string()),
            Error::Other("unknown error".to_string()),
        ];

        for error in errors {
            let error_string = error.to_string();
            assert!(!error_string.is_empty());
            match error {
                Error::Encode(msg) => {
                    assert!(error_string.contains("Encoding error"));
                    assert!(error_string.contains(&msg));
                },
                Error::Config(msg) => {
                    assert!(error_string.contains("Configuration error"));
                    assert!(error_string.contains(&msg));
                },
                Error::Driver(msg) => {
                    assert!(error_string.contains("Driver error"));
                    assert!(error_string.contains(&msg));
                },
                Error::Other(msg) => {
                    assert_eq!(error_string, msg);
                },
                Error::Io(_) => {},
            }
        }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::Io(io::Error::other("x")).category(), "io");
        assert_eq!(Error::Encode("x".into()).category(), "encode");
        assert_eq!(Error::Config("x".into()).category(), "config");
        assert_eq!(Error::Driver("x".into()).category(), "driver");
        assert_eq!(Error::Other("x".into()).category(), "other");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let error: Error = io_err.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_error_chain_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        let source = std::error::Error::source(&error);
        assert!(source.is_some());
        assert!(source.unwrap().to_string().contains("access denied"));
    }
}
