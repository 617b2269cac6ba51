//! fob-minify CLI library.
//!
//! The binary is a thin wrapper around [`run::execute`]; the modules are
//! public so integration tests can drive each step directly.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod output;
pub mod run;

pub use error::{CliError, ConfigError, Result, ResultExt};
