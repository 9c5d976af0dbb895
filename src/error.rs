//! Unified error types for overrustle.
//!
//! This module provides a single [`OverrustleError`] enum covering every
//! failure the library can report.
//!
//! # Error Handling Policy
//!
//! - **Line-level** problems (a line that doesn't match the grammar, a bad
//!   timestamp) never reach the caller: the line matcher turns them into
//!   "no match". [`OverrustleError::MalformedTimestamp`] exists so the
//!   timestamp parser has something typed to return.
//! - **Channel/file-level** problems (unreadable files, failed writes) are
//!   fatal and propagate out of [`Extractor::run`](crate::extract::Extractor::run).
//! - An existing artifact is *not* an error; it is a skipped channel.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for overrustle operations.
///
/// # Example
///
/// ```rust
/// use overrustle::error::Result;
/// use overrustle::ChatRecord;
///
/// fn my_function() -> Result<Vec<ChatRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, OverrustleError>;

/// The error type for all overrustle operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OverrustleError {
    /// An I/O error occurred without a known path.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An I/O error occurred while working on a specific file or directory.
    #[error("IO error on {}: {source}", path.display())]
    IoAt {
        /// The file or directory being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A timestamp did not match `YYYY-MM-DD HH:MM:SS <ZONE>` or was not UTC.
    #[error("Malformed timestamp '{input}': {reason}")]
    MalformedTimestamp {
        /// The offending timestamp text
        input: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// No channels were found to process.
    #[error("No chat log channels found in {}", path.display())]
    EmptyInputSet {
        /// The logs directory that was searched
        path: PathBuf,
    },

    /// The target username cannot be used as an artifact directory name.
    #[error("Invalid username '{username}': {reason}")]
    InvalidUsername {
        /// The rejected username
        username: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// JSON serialization or deserialization of an artifact failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl OverrustleError {
    /// Creates an I/O error tagged with the path that was being accessed.
    pub fn io_at(path: impl Into<PathBuf>, source: io::Error) -> Self {
        OverrustleError::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(input: impl Into<String>, reason: &'static str) -> Self {
        OverrustleError::MalformedTimestamp {
            input: input.into(),
            reason,
        }
    }

    /// Creates an empty input set error.
    pub fn empty_input(path: impl Into<PathBuf>) -> Self {
        OverrustleError::EmptyInputSet { path: path.into() }
    }

    /// Creates an invalid username error.
    pub fn invalid_username(username: impl Into<String>, reason: &'static str) -> Self {
        OverrustleError::InvalidUsername {
            username: username.into(),
            reason,
        }
    }

    /// Returns `true` if this is an I/O error (with or without a path).
    pub fn is_io(&self) -> bool {
        matches!(self, OverrustleError::Io(_) | OverrustleError::IoAt { .. })
    }

    /// Returns `true` if this is a malformed timestamp error.
    pub fn is_malformed_timestamp(&self) -> bool {
        matches!(self, OverrustleError::MalformedTimestamp { .. })
    }

    /// Returns `true` if no channels were found.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, OverrustleError::EmptyInputSet { .. })
    }

    /// Returns `true` if the username was rejected.
    pub fn is_invalid_username(&self) -> bool {
        matches!(self, OverrustleError::InvalidUsername { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = OverrustleError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_io_at_display_includes_path() {
        let err = OverrustleError::io_at(
            "/logs/destiny/2016-04-18.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        );
        let display = err.to_string();
        assert!(display.contains("/logs/destiny/2016-04-18.txt"));
        assert!(display.contains("access denied"));
        assert!(err.is_io());
    }

    #[test]
    fn test_malformed_timestamp_display() {
        let err = OverrustleError::malformed_timestamp("2016-13-01 00:00:00 UTC", "bad date");
        let display = err.to_string();
        assert!(display.contains("2016-13-01 00:00:00 UTC"));
        assert!(display.contains("bad date"));
        assert!(err.is_malformed_timestamp());
        assert!(!err.is_io());
    }

    #[test]
    fn test_empty_input_display() {
        let err = OverrustleError::empty_input("/logs");
        assert!(err.to_string().contains("/logs"));
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_invalid_username_display() {
        let err = OverrustleError::invalid_username("../etc", "contains a path separator");
        assert!(err.to_string().contains("../etc"));
        assert!(err.is_invalid_username());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err = OverrustleError::io_at("x", io::Error::other("boom"));
        assert!(err.source().is_some());

        let err = OverrustleError::empty_input("x");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: OverrustleError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }
}
