//! Shared test utilities for fob-minify tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use fob_minify::{
    CompilationEngine, CompilationUnit, CompileOptions, Compiled, Result, SourceMap,
    SourceMapBuilder, TransformEvent, VirtualFile,
};

pub const CWD: &str = "/project";
pub const BASE: &str = "/project/test";

/// Deterministic engine: returns the rendered unit unchanged and a map that
/// lists the unit's sources. Every call is recorded.
#[derive(Clone, Default)]
pub struct ConcatEngine {
    pub calls: Rc<RefCell<Vec<(Vec<String>, CompileOptions)>>>,
}

impl ConcatEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last_sources(&self) -> Vec<String> {
        self.calls
            .borrow()
            .last()
            .map(|(sources, _)| sources.clone())
            .unwrap_or_default()
    }
}

impl CompilationEngine for ConcatEngine {
    fn compile(&self, unit: &CompilationUnit, options: &CompileOptions) -> Result<Compiled> {
        let sources: Vec<String> = unit.sources().iter().map(|s| s.name().to_string()).collect();
        self.calls
            .borrow_mut()
            .push((sources, options.clone()));

        let map = options.source_map.as_ref().map(|file| {
            let mut builder = SourceMapBuilder::default();
            builder.set_file(file);
            for source in unit.sources() {
                builder.set_source_and_content(source.name(), source.text());
            }
            builder.into_sourcemap()
        });
        Ok(Compiled {
            code: unit.render().text().to_string(),
            map,
        })
    }
}

/// A buffered file under the fixture base, e.g. `fixture("file1.js", ..)`.
pub fn fixture(name: &str, text: &str) -> VirtualFile {
    VirtualFile::new(format!("{BASE}/{name}"))
        .with_cwd(CWD)
        .with_base(BASE)
        .with_contents(text)
}

pub fn files(events: &[TransformEvent]) -> Vec<&VirtualFile> {
    events.iter().filter_map(TransformEvent::as_file).collect()
}

pub fn errors(events: &[TransformEvent]) -> Vec<&fob_minify::Error> {
    events.iter().filter_map(TransformEvent::as_error).collect()
}

pub fn text(file: &VirtualFile) -> String {
    file.contents_str()
        .expect("output has buffered contents")
        .into_owned()
}

/// Parse a map output back into a source map.
pub fn parse_map(file: &VirtualFile) -> SourceMap {
    SourceMap::from_json_string(&text(file)).expect("output is a valid source map")
}

pub fn map_sources(map: &SourceMap) -> Vec<String> {
    map.get_sources().map(|s| s.to_string()).collect()
}

pub fn map_file(map: &SourceMap) -> Option<String> {
    map.get_file().map(|f| f.to_string())
}
