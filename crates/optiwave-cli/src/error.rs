//! Error types for the OptiWave CLI
//!
//! All errors are user-facing; messages say what went wrong and what to try
//! next.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// API server rejected the request or misbehaved
    #[error("Server error: {0}. Ensure the OptiWave server is running and accessible.")]
    Api(String),

    /// No stored session, or the server rejected the token
    #[error("Not signed in: {0}. Run 'optiwave login' (or 'optiwave register') first.")]
    Unauthorized(String),

    /// Requested record does not exist
    #[error("Video {0} was not found. It may have been removed, or the id is wrong.")]
    VideoNotFound(i64),

    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// Input rejected before sending anything to the server
    #[error("Invalid input: {0}")]
    Input(String),

    /// Session file could not be read or written
    #[error("Session error: {0}. Delete the session file and log in again if this persists.")]
    Session(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your connection and the server URL.")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables.")]
    Config(String),
}

impl CliError {
    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
