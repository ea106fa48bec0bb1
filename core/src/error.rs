//! Error types for the portpulse-core library.

use thiserror::Error;

/// Result type alias for portpulse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating input or inspecting processes.
#[derive(Error, Debug)]
pub enum Error {
    /// A port argument was not a number in 1..=65535.
    #[error("invalid port '{0}': expected a number between 1 and 65535")]
    InvalidPort(String),

    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// Failed to parse command output.
    #[error("Failed to parse output: {0}")]
    ParseError(String),
}
