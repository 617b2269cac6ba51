//! Error types for the minify transform.
//!
//! Every failure of a run, whether it happens while a file is accepted or
//! while the output is assembled, is one of these variants and travels
//! through the same [`Sink::error`](crate::Sink::error) channel.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while accumulating and minifying files
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The file payload is an open stream instead of buffered contents
    #[error("Streaming not supported: {}", .path.display())]
    #[diagnostic(
        code(fob::minify::streaming_unsupported),
        help("Read the file into memory before handing it to fob-minify")
    )]
    StreamingUnsupported { path: PathBuf },

    /// The compilation engine rejected the accumulated input
    #[error("Compilation failed in {source_name}: {message}")]
    #[diagnostic(code(fob::minify::compilation_failure))]
    CompilationFailure {
        source_name: String,
        message: String,
    },

    /// A requested source map was missing or could not be processed
    #[error("Source map error: {0}")]
    #[diagnostic(code(fob::minify::source_map))]
    SourceMap(String),

    /// Options that cannot be interpreted
    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(fob::minify::invalid_config))]
    InvalidConfig(String),
}

impl Error {
    /// Create a CompilationFailure error
    pub fn compilation_failure(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CompilationFailure {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a SourceMap error
    pub fn source_map(message: impl Into<String>) -> Self {
        Self::SourceMap(message.into())
    }
}

/// Result type for minify operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaming_error_names_the_file() {
        let err = Error::StreamingUnsupported {
            path: PathBuf::from("src/app.js"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Streaming not supported"));
        assert!(msg.contains("src/app.js"));
    }

    #[test]
    fn compilation_failure_names_the_source() {
        let err = Error::compilation_failure("lib/util.js", "Unexpected token");
        assert_eq!(
            err.to_string(),
            "Compilation failed in lib/util.js: Unexpected token"
        );
    }

    #[test]
    fn diagnostics_carry_codes() {
        let err = Error::source_map("missing");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("fob::minify::source_map"));
    }
}
