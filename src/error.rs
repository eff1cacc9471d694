//! Error handling for the repackager.
//! Defines the error type and result alias used by every pipeline stage.

use std::io;
use thiserror::Error as ThisError;

/// Errors that can occur while scaffolding a new project.
///
/// Stage-level code reports a failure status and then propagates the error
/// unchanged up to [`default_error_handler`].
#[derive(ThisError, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by libgit2 (clone, init, remotes, tags)
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// Represents errors while walking a directory tree
    #[error("Walk error: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Represents errors that occur during user interaction
    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    /// Represents a manifest that could not be parsed or serialized
    #[error("Manifest error in '{path}': {source}.")]
    ManifestError { path: String, source: serde_json::Error },

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents errors in the runtime configuration
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents a scaffold target that is already present on disk
    #[error("Output directory '{output_dir}' already exists. Use --force to replace it.")]
    OutputDirectoryExistsError { output_dir: String },

    /// Represents a failure to build the substitution worker pool
    #[error("Worker pool error: {0}.")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Prints the error to stderr and exits with status code 1.
///
/// When `pretty` is set the message is styled for a terminal.
pub fn default_error_handler(err: Error, pretty: bool) -> ! {
    if pretty {
        eprintln!("{} {}", console::style("error:").red().bold(), err);
    } else {
        eprintln!("{}", err);
    }
    std::process::exit(1);
}
