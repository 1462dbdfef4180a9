//! Error handling for the daystart application.
//! Defines the error taxonomy and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// All errors a materialization run can produce.
///
/// Parse and lookup failures abort before any directory is touched;
/// render and step failures abort mid-pipeline and leave already-written
/// files on disk (fail fast, no rollback).
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A catalog or profile document failed strict structural decoding.
    /// The underlying decoder error names the offending field and position.
    #[error("cannot parse {document}: {source}")]
    Parse {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    /// A logical resource was found neither at the override path nor in
    /// the bundled resource set.
    #[error("resource '{logical_name}' not found (no override supplied it and it is not bundled)")]
    ResourceNotFound { logical_name: String },

    #[error("language '{language}' not found; use --list to see available languages")]
    UnknownLanguage { language: String },

    #[error("template '{template}' not found for language '{language}'; use --list to see available templates")]
    UnknownTemplate { language: String, template: String },

    /// The numeric-suffix search for a free sibling directory hit its bound.
    #[error("directories '{base}' through '{base}-{limit}' all exist, giving up")]
    AllocationExhausted { base: String, limit: u32 },

    /// Template rendering failed, including any placeholder outside the
    /// fixed context field set.
    #[error("template render error: {0}")]
    Render(#[from] minijinja::Error),

    /// A template file exists but is not valid UTF-8 text.
    #[error("template '{template}' is not valid UTF-8")]
    InvalidEncoding { template: String },

    /// A file destination would escape the project directory.
    #[error("destination '{dest}' is not project-relative")]
    InvalidDestination { dest: String },

    /// An exec post-create step failed to launch or exited non-zero.
    #[error("post-create command '{command}' failed: {reason}")]
    StepFailed { command: String, reason: String },

    /// An exec post-create step rendered to an empty argument list.
    #[error("post-create exec step has no command tokens")]
    EmptyCommand,
}

/// Convenience alias for results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler: prints the error to stderr and exits with
/// status code 1.
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
