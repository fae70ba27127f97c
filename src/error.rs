//! Error types for segrip
//!
//! This module provides error handling for the whole pipeline:
//! - Network failures (request errors, timeouts, non-success statuses)
//! - Manifest parse failure (no usable segment list)
//! - External tool failures (non-zero exit, missing binary)

use thiserror::Error;

/// Result type alias for segrip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for segrip
///
/// Every stage of the pipeline reports failures through this type. The
/// orchestrator catches it once at the top level; nothing panics across
/// stage boundaries.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "referer")
        key: Option<String>,
    },

    /// Network error (connection failure, timeout, malformed response)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("request for {url} failed with status {status}")]
    HttpStatus {
        /// The URL that was requested
        url: String,
        /// The non-success status code returned by the server
        status: reqwest::StatusCode,
    },

    /// The manifest URL could not be parsed as a URL at all
    #[error("invalid manifest URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The manifest contained no segment URLs (missing `files:` marker or
    /// no `https://` lines after it)
    #[error("manifest contained no segment URLs (no 'files:' section found)")]
    EmptyManifest,

    /// External tool exited non-zero; contains the captured stderr
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// External tool binary not found on the execution path
    #[error("'{tool}' not found: install it and make sure it is on your PATH")]
    ToolMissing {
        /// Name of the missing binary (e.g. "ffmpeg")
        tool: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_missing_message_names_the_binary() {
        let err = Error::ToolMissing {
            tool: "ffmpeg".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("PATH"));
    }

    #[test]
    fn http_status_message_includes_url_and_status() {
        let err = Error::HttpStatus {
            url: "https://example.com/manifest".to_string(),
            status: reqwest::StatusCode::FORBIDDEN,
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/manifest"));
        assert!(msg.contains("403"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
