//! The compilation engine capability.
//!
//! The transform never parses, compresses or prints code itself. It hands
//! the merged [`CompilationUnit`] to a [`CompilationEngine`] and gets text
//! (and optionally a source map) back. [`OxcEngine`] is the production
//! implementation; tests substitute their own.

pub mod oxc;

use std::sync::Arc;

use crate::error::Result;
use crate::options::{CompressOptions, MangleOptions, MinifyOptions, OutputOptions};
use crate::sourcemap::SourceMap;
use crate::unit::CompilationUnit;

pub use self::oxc::OxcEngine;

/// Options for one engine invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Compression settings; `None` skips the pass.
    pub compress: Option<CompressOptions>,
    /// Renaming settings; `None` keeps original identifiers.
    pub mangle: Option<MangleOptions>,
    pub output: OutputOptions,
    /// Map filename to anchor a source map at; `None` produces no map.
    pub source_map: Option<String>,
}

impl CompileOptions {
    /// Derive engine options from transform options and the resolved map
    /// filename.
    pub fn from_options(options: &MinifyOptions, source_map: Option<String>) -> Self {
        Self {
            compress: options.compress.as_enabled().cloned(),
            mangle: options.mangle.as_enabled().cloned(),
            output: options.output.clone(),
            source_map,
        }
    }
}

/// Engine output.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub code: String,
    pub map: Option<SourceMap>,
}

/// Turns a merged unit into rendered code.
///
/// Implementations resolve scopes, compress and mangle according to
/// `options`, print the result and, when `options.source_map` is set,
/// return a map whose `sources` are the unit's source names in order.
pub trait CompilationEngine {
    fn compile(&self, unit: &CompilationUnit, options: &CompileOptions) -> Result<Compiled>;
}

impl<E: CompilationEngine + ?Sized> CompilationEngine for &E {
    fn compile(&self, unit: &CompilationUnit, options: &CompileOptions) -> Result<Compiled> {
        (**self).compile(unit, options)
    }
}

impl<E: CompilationEngine + ?Sized> CompilationEngine for Box<E> {
    fn compile(&self, unit: &CompilationUnit, options: &CompileOptions) -> Result<Compiled> {
        (**self).compile(unit, options)
    }
}

impl<E: CompilationEngine + ?Sized> CompilationEngine for Arc<E> {
    fn compile(&self, unit: &CompilationUnit, options: &CompileOptions) -> Result<Compiled> {
        (**self).compile(unit, options)
    }
}
