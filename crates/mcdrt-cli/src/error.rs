//! Error types for the mcdrt CLI

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the domain layer
    #[error(transparent)]
    Core(#[from] mcdrt_core::Error),

    /// Error from an external command or download
    #[error(transparent)]
    Exec(#[from] mcdrt_exec::ExecError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
