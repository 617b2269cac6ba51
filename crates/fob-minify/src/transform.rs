//! The file transform: accepts files one at a time and emits the minified
//! result when input ends.

use std::path::PathBuf;

use tracing::{debug, error};

use crate::accumulator::Accumulator;
use crate::assembler::assemble;
use crate::engine::CompilationEngine;
use crate::error::Error;
use crate::options::MinifyOptions;
use crate::vfile::VirtualFile;

/// Downstream side of a transform.
///
/// `end` is called exactly once, after every `push` and `error`.
pub trait Sink {
    fn push(&mut self, file: VirtualFile);
    fn error(&mut self, error: Error);
    fn end(&mut self);
}

/// One observable event of a run, in emission order.
#[derive(Debug)]
pub enum TransformEvent {
    File(VirtualFile),
    Error(Error),
    End,
}

impl TransformEvent {
    pub fn as_file(&self) -> Option<&VirtualFile> {
        match self {
            TransformEvent::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&Error> {
        match self {
            TransformEvent::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl Sink for Vec<TransformEvent> {
    fn push(&mut self, file: VirtualFile) {
        Vec::push(self, TransformEvent::File(file));
    }

    fn error(&mut self, error: Error) {
        Vec::push(self, TransformEvent::Error(error));
    }

    fn end(&mut self) {
        Vec::push(self, TransformEvent::End);
    }
}

/// Concatenates and minifies every file written to it into one output.
///
/// Consumed by [`end`](Self::end), so a transform finalizes exactly once and
/// cannot accept files afterwards.
pub struct MinifyTransform<E> {
    filename: Option<String>,
    options: MinifyOptions,
    engine: E,
    accumulator: Accumulator,
}

impl<E: CompilationEngine> MinifyTransform<E> {
    /// Create a transform rooted at the process working directory.
    pub fn new(filename: Option<String>, options: MinifyOptions, engine: E) -> Self {
        let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let accumulator = Accumulator::new(filename.clone(), &options, &working_dir);
        Self {
            filename,
            options,
            engine,
            accumulator,
        }
    }

    /// Resolve relative `basePath` values and file `cwd`s against `dir`
    /// instead of the process working directory.
    ///
    /// Call before the first [`write`](Self::write).
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.accumulator = Accumulator::new(self.filename.clone(), &self.options, &dir.into());
        self
    }

    pub fn options(&self) -> &MinifyOptions {
        &self.options
    }

    /// Accept one file. Rejections are reported through `sink`.
    pub fn write(&mut self, file: VirtualFile, sink: &mut impl Sink) {
        if let Err(err) = self.accumulator.accept(file) {
            sink.error(err);
        }
    }

    /// Finish the run: emit the outputs (or the error that prevented them),
    /// then signal the end of the stream.
    pub fn end(self, sink: &mut impl Sink) {
        let Self {
            options,
            engine,
            accumulator,
            ..
        } = self;

        match accumulator.into_prepared() {
            None => debug!("no file carried contents, nothing to emit"),
            Some(prepared) => match assemble(prepared, &options, &engine) {
                Ok(outputs) => {
                    for file in outputs {
                        sink.push(file);
                    }
                }
                Err(err) => {
                    error!(error = %err, "minification failed");
                    sink.error(err);
                }
            },
        }

        sink.end();
    }

    /// Drive a complete run and collect its events.
    pub fn run(mut self, files: impl IntoIterator<Item = VirtualFile>) -> Vec<TransformEvent> {
        let mut events: Vec<TransformEvent> = Vec::new();
        for file in files {
            self.write(file, &mut events);
        }
        self.end(&mut events);
        events
    }
}
