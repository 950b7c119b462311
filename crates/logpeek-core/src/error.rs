//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
///
/// The range reconciliation functions never return these: every input to
/// them has a well-defined no-op interpretation. Errors only come from the
/// layers around them (files, settings, user-typed requests).
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    // ─────────────────────────────────────────────────────────────
    // Log File Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Log file not found: {path}")]
    LogFileNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Filter / Request Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid filter pattern '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("Invalid gap id '{0}' (expected up-<line> or down-<line>)")]
    InvalidGapId(String),

    #[error("Invalid expand mode '{0}' (expected all, next-match, prev-match or a line count)")]
    InvalidExpandMode(String),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn log_file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::LogFileNotFound { path: path.into() }
    }

    pub fn invalid_regex(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_gap_id(gap_id: impl Into<String>) -> Self {
        Self::InvalidGapId(gap_id.into())
    }

    pub fn invalid_expand_mode(mode: impl Into<String>) -> Self {
        Self::InvalidExpandMode(mode.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::config("bad value");
        assert_eq!(err.to_string(), "Configuration error: bad value");

        let err = Error::invalid_gap_id("sideways-3");
        assert!(err.to_string().contains("sideways-3"));
        assert!(err.to_string().contains("up-<line>"));
    }

    #[test]
    fn test_logging_error_message() {
        let err = Error::logging("cannot log to /nope");
        assert_eq!(err.to_string(), "Logging setup failed: cannot log to /nope");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_invalid_regex_message_includes_pattern() {
        let err = Error::invalid_regex("[a-", "unclosed character class");
        let msg = err.to_string();
        assert!(msg.contains("[a-"));
        assert!(msg.contains("unclosed character class"));
    }

    #[test]
    fn test_context_passes_error_through() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("reading log").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
