//! Concatenate a stream of virtual files into one minified JavaScript unit.
//!
//! Files are written to a [`MinifyTransform`] one at a time. When input ends
//! the transform merges every file that carried contents, optionally wraps
//! the result as a CommonJS-style module or in a closure, compresses and
//! mangles it with OXC, and emits a single output file plus an optional
//! source map whose sources are the input paths.
//!
//! # Examples
//!
//! ```rust
//! use fob_minify::{MinifyOptions, TransformEvent, VirtualFile};
//!
//! let files = vec![
//!     VirtualFile::new("/project/src/a.js")
//!         .with_cwd("/project")
//!         .with_base("/project/src")
//!         .with_contents("function test1() { var asdf = 3; }"),
//!     VirtualFile::new("/project/src/b.js")
//!         .with_cwd("/project")
//!         .with_base("/project/src")
//!         .with_contents("function test2(qwerty) { return qwerty; }"),
//! ];
//!
//! let events = fob_minify::transform(None, MinifyOptions::default())
//!     .with_working_dir("/project")
//!     .run(files);
//!
//! let output = events[0].as_file().unwrap();
//! assert_eq!(output.relative(), std::path::PathBuf::from("a.js"));
//! assert!(matches!(events[1], TransformEvent::End));
//! ```
//!
//! ## Source maps
//!
//! ```rust
//! use fob_minify::{MinifyOptions, SourceMapTarget, VirtualFile};
//!
//! let options = MinifyOptions::default().with_source_map(SourceMapTarget::Derived);
//! let events = fob_minify::transform(Some("app.min.js".into()), options)
//!     .with_working_dir("/project")
//!     .run([VirtualFile::new("/project/a.js")
//!         .with_cwd("/project")
//!         .with_contents("var a = 1;")]);
//!
//! let code = events[0].as_file().unwrap().contents_str().unwrap();
//! assert!(code.ends_with("\r\n//# sourceMappingURL=app.min.js.map"));
//! let map = events[1].as_file().unwrap();
//! assert!(map.path().ends_with("app.min.js.map"));
//! ```

pub mod accumulator;
pub mod assembler;
pub mod engine;
mod error;
pub mod options;
mod paths;
pub mod sourcemap;
mod transform;
pub mod unit;
mod vfile;
mod wrap;

pub use accumulator::{Accumulator, BaseFile, PreparedUnit};
pub use assembler::assemble;
pub use engine::{CompilationEngine, CompileOptions, Compiled, OxcEngine};
pub use error::{Error, Result};
pub use options::{
    CompressOptions, Enclose, EncloseArg, MangleOptions, MinifyOptions, OutputOptions, Pass,
    SourceMapTarget,
};
pub use sourcemap::{SourceMap, SourceMapBuilder};
pub use transform::{MinifyTransform, Sink, TransformEvent};
pub use unit::{CompilationUnit, RenderedUnit, SourceEntry};
pub use vfile::{Contents, VirtualFile};
pub use wrap::top_level_bindings;

/// Create a transform backed by [`OxcEngine`].
///
/// `filename` names the output; without it the first file with contents
/// lends its relative path.
pub fn transform(filename: Option<String>, options: MinifyOptions) -> MinifyTransform<OxcEngine> {
    MinifyTransform::new(filename, options, OxcEngine)
}
