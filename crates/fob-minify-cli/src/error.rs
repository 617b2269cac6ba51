//! Error handling for the fob-minify CLI.
//!
//! `CliError` is the top-level error returned by every command path. Library
//! failures arrive as [`fob_minify::Error`] and keep their diagnostic codes
//! when converted to a `miette::Report` for display.
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_minify_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_input(path: &Path) -> Result<Vec<u8>> {
//!     std::fs::read(path).with_path(path)
//! }
//! ```

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The minify run itself failed
    #[error(transparent)]
    Minify(#[from] fob_minify::Error),

    /// Input file or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// No JavaScript file was found among the inputs
    #[error("No JavaScript files found in the given inputs\n\nHint: Inputs may be .js, .mjs or .cjs files or directories containing them")]
    NoInputs,

    /// An output path would land outside the output directory
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// Writing an output failed; nothing was left behind
    #[error("Failed to write output: {0}\n\nHint: Check output directory permissions")]
    WriteFailure(String),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Create fob-minify.json or pass an existing file to --config", .0.display())]
    NotFound(PathBuf),

    /// Layered configuration could not be extracted
    #[error("Invalid configuration: {0}\n\nHint: Check fob-minify.json syntax and FOB_MINIFY_* variables")]
    Invalid(String),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            CliError::Io(io_err) => {
                CliError::Custom(format!("{}: {}", path.as_ref().display(), io_err))
            }
            other => other,
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

/// Convert a CLI error into a miette report for display.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Minify(e) => Report::new(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        other => miette::miette!("{}", other),
    }
}
