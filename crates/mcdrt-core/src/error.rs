//! Error types for environment provisioning and packaging

use std::path::PathBuf;

/// Errors that can occur in the domain layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from an external command or download
    #[error(transparent)]
    Exec(#[from] mcdrt_exec::ExecError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a configuration or marker file
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The environment root carries a marker with `initialized = true`
    #[error("Environment at {path} has already been initialized")]
    AlreadyInitialized {
        /// The environment root
        path: PathBuf,
    },

    /// The configured environment root is a regular file
    #[error("Environment path {path} is a file")]
    PathIsFile {
        /// The colliding path
        path: PathBuf,
    },

    /// Operator declined to wipe an existing directory
    #[error("Cancelled by operator")]
    Cancelled,

    /// `test` was invoked against an environment that is not provisioned
    #[error("Environment at {path} has not been initialized, run `mcdrt init <config>` first")]
    NotInitialized {
        /// The environment root
        path: PathBuf,
    },

    /// The plugins directory is missing from a supposedly provisioned root
    #[error("Plugins folder {path} does not exist, the environment may not be fully initialized")]
    PluginsMissing {
        /// The expected plugins directory
        path: PathBuf,
    },

    /// Packaging method string is not one of the three known variants
    #[error("Unknown packaging method `{method}`, expected mcdr_command, single_file or folder")]
    UnknownMethod {
        /// The configured method string
        method: String,
    },

    /// Packaging source does not have the shape the method requires
    #[error("Packaging method `{method}` requires {path} to be a {expected}")]
    BadPackagingSource {
        /// The method that was selected
        method: &'static str,
        /// The configured plugin source path
        path: PathBuf,
        /// "directory" or "regular file"
        expected: &'static str,
    },

    /// Packaging source path has no final component to name the artifact by
    #[error("Cannot derive an artifact name from {path}")]
    NoArtifactName {
        /// The configured plugin source path
        path: PathBuf,
    },

    /// `mcdreforged pack` did not emit its confirmation line
    #[error("`mcdreforged pack` reported no packed artifact; its output format may have changed")]
    PackOutputMismatch,

    /// Functionality that is defined at the interface but not built yet
    #[error("{feature} is not implemented yet")]
    Unimplemented {
        /// What was requested
        feature: &'static str,
    },
}

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, Error>;
