//! CLI error handling with semantic exit codes.
//!
//! A successful run exits 0, and so does a user-initiated quit at the
//! pager prompt. Faults map to a small set of categories so shell scripts
//! can tell a bad invocation from a failing query:
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed (or user quit) |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 4 | `Query` | The query or its result stream failed |

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    ///
    /// Matches the exit code clap itself uses for parse failures, so an
    /// unknown `--format` value and a failed strategy selection look the
    /// same to callers.
    Usage = 2,

    /// The query or its result stream failed (exit code 4).
    Query = 4,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::Query => "query error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` so the full context chain survives while the
/// category rides along for the exit code.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Internal, source)
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a query error.
    pub fn query(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Query, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicitly categorized errors win; otherwise core errors map by
/// variant, and anything else is internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core_err) = err.downcast_ref::<rql_core::Error>() {
        return match core_err {
            rql_core::Error::Config(_) => ErrorCategory::Usage,
            rql_core::Error::Driver(_) => ErrorCategory::Query,
            _ => ErrorCategory::Internal,
        }
        .exit_code();
    }

    ErrorCategory::Internal.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCategory::Internal.exit_code(), 1);
        assert_eq!(ErrorCategory::Usage.exit_code(), 2);
        assert_eq!(ErrorCategory::Query.exit_code(), 4);
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(
            CliError::internal(anyhow!("err")).category,
            ErrorCategory::Internal
        );
        assert_eq!(
            CliError::usage(anyhow!("err")).category,
            ErrorCategory::Usage
        );
        assert_eq!(
            CliError::query(anyhow!("err")).category,
            ErrorCategory::Query
        );
    }

    #[test]
    fn test_display_preserves_message() {
        let err = CliError::query(anyhow!("cursor fault at doc 3"));
        assert_eq!(err.to_string(), "cursor fault at doc 3");
    }

    #[test]
    fn test_exit_code_from_cli_error() {
        let err: anyhow::Error = CliError::usage(anyhow!("bad flags")).into();
        assert_eq!(exit_code_from_error(&err), 2);
    }

    #[test]
    fn test_exit_code_from_core_error() {
        let config: anyhow::Error = rql_core::Error::Config("unknown format".into()).into();
        assert_eq!(exit_code_from_error(&config), 2);

        let driver: anyhow::Error = rql_core::Error::Driver("bad document".into()).into();
        assert_eq!(exit_code_from_error(&driver), 4);

        let encode: anyhow::Error = rql_core::Error::Encode("nan".into()).into();
        assert_eq!(exit_code_from_error(&encode), 1);
    }

    #[test]
    fn test_exit_code_from_uncategorized_error() {
        assert_eq!(exit_code_from_error(&anyhow!("something broke")), 1);
    }
}
