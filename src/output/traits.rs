//! Output sink traits and types
//!
//! This module defines the trait interface for output sinks and the
//! errors they can report.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Invalid run key '{0}': must be non-empty and contain no path separators")]
    InvalidRunKey(String),

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for append-only output sinks
///
/// Each run key maps to its own destination. Implementations must be
/// thread-safe: the parallel runner appends from many tasks at once.
pub trait OutputSink: Send + Sync {
    /// Appends one discovered URL to the run's link stream
    ///
    /// # Arguments
    ///
    /// * `run_key` - Identifier of the crawl run
    /// * `url` - The URL to record
    fn append_link(&self, run_key: &str, url: &str) -> OutputResult<()>;

    /// Appends one block of extracted page content to the run's content stream
    ///
    /// # Arguments
    ///
    /// * `run_key` - Identifier of the crawl run
    /// * `text` - The extracted content
    fn append_content(&self, run_key: &str, text: &str) -> OutputResult<()>;
}

/// Checks that a run key is usable as a file stem
pub fn validate_run_key(run_key: &str) -> OutputResult<()> {
    let invalid = run_key.trim().is_empty()
        || run_key.contains('/')
        || run_key.contains('\\')
        || run_key.contains("..")
        || run_key.contains('\0');

    if invalid {
        return Err(OutputError::InvalidRunKey(run_key.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_run_keys() {
        assert!(validate_run_key("docs-site").is_ok());
        assert!(validate_run_key("run_2024-01-01T00-00-00").is_ok());
        assert!(validate_run_key("example.com").is_ok());
    }

    #[test]
    fn test_invalid_run_keys() {
        for key in ["", "   ", "../escape", "a/b", "a\\b", "..", "nul\0byte"] {
            assert!(
                matches!(validate_run_key(key), Err(OutputError::InvalidRunKey(_))),
                "{:?} should be rejected",
                key
            );
        }
    }
}
