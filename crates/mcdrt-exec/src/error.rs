//! Error types for external operations

/// Errors that can occur while running commands or transfers
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Download request was answered with a non-success status
    #[error("Download of {url} failed with HTTP status {status}")]
    DownloadFailed {
        /// The URL that was requested
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// No destination file name could be derived from the URL
    #[error("Cannot derive a file name from {url}")]
    NoFileName {
        /// The URL with an unusable path
        url: String,
    },

    /// Operator chose to abort after a command failure
    #[error("Aborted by operator after `{command}` failed")]
    Aborted {
        /// Display form of the failed command
        command: String,
    },

    /// Error while prompting the operator
    #[error("Operator prompt failed: {0}")]
    Prompt(String),
}

/// Result type alias for external operations
pub type Result<T> = std::result::Result<T, ExecError>;
