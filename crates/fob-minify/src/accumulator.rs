//! Per-file accumulation.
//!
//! The accumulator owns all state of one run: the base file that anchors the
//! output, the resolved output and map filenames, and the merged unit. It
//! turns into a [`PreparedUnit`] once input ends, and only when at least one
//! file carried a payload.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::options::{MinifyOptions, SourceMapTarget};
use crate::paths;
use crate::unit::CompilationUnit;
use crate::vfile::{Contents, VirtualFile};

/// Location anchor taken from the first file with a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFile {
    pub cwd: PathBuf,
    pub base: PathBuf,
    pub relative: PathBuf,
}

/// Everything the assembler needs, produced once accumulation ends.
#[derive(Debug, Clone)]
pub struct PreparedUnit {
    pub base_file: BaseFile,
    /// Output filename, relative to the base file's `base`.
    pub filename: String,
    /// Map filename when a source map was requested.
    pub map_filename: Option<String>,
    pub unit: CompilationUnit,
}

#[derive(Debug)]
pub struct Accumulator {
    configured_filename: Option<String>,
    map_target: SourceMapTarget,
    source_root: PathBuf,
    working_dir: PathBuf,
    anchor: Option<(BaseFile, String, Option<String>)>,
    unit: CompilationUnit,
}

impl Accumulator {
    /// Create an accumulator.
    ///
    /// `filename` overrides the output name; otherwise the first accepted
    /// file's relative path is used. Source names are made relative to
    /// `options.base_path`, resolved against `working_dir`.
    pub fn new(filename: Option<String>, options: &MinifyOptions, working_dir: &Path) -> Self {
        let source_root = match &options.base_path {
            Some(base_path) => paths::resolve(working_dir, base_path),
            None => paths::resolve(working_dir, Path::new(".")),
        };

        Self {
            configured_filename: filename.filter(|f| !f.is_empty()),
            map_target: options.out_source_map.clone(),
            source_root,
            working_dir: working_dir.to_path_buf(),
            anchor: None,
            unit: CompilationUnit::new(),
        }
    }

    /// Accept one file.
    ///
    /// Files without a payload are skipped. Streams are rejected without
    /// touching any state, so later files are still accepted.
    pub fn accept(&mut self, file: VirtualFile) -> Result<()> {
        match file.contents() {
            Contents::Null => {
                debug!(path = %file.path().display(), "skipping file without contents");
                return Ok(());
            }
            Contents::Stream(_) => {
                warn!(path = %file.path().display(), "streaming contents are not supported");
                return Err(Error::StreamingUnsupported {
                    path: file.path().to_path_buf(),
                });
            }
            Contents::Buffer(_) => {}
        }

        if self.anchor.is_none() {
            self.anchor = Some(self.anchor_on(&file));
        }

        let absolute = paths::resolve(&paths::resolve(&self.working_dir, file.cwd()), file.path());
        let name = paths::display(&paths::relative(&self.source_root, &absolute));
        let text = file.contents_str().unwrap_or_default().into_owned();

        debug!(source = %name, bytes = text.len(), "accepted file");
        self.unit.push_source(name, text);
        Ok(())
    }

    /// Whether a file with a payload has been accepted.
    pub fn has_base_file(&self) -> bool {
        self.anchor.is_some()
    }

    /// End accumulation.
    pub fn into_prepared(self) -> Option<PreparedUnit> {
        let (base_file, filename, map_filename) = self.anchor?;
        Some(PreparedUnit {
            base_file,
            filename,
            map_filename,
            unit: self.unit,
        })
    }

    fn anchor_on(&self, file: &VirtualFile) -> (BaseFile, String, Option<String>) {
        let base_file = BaseFile {
            cwd: file.cwd().to_path_buf(),
            base: file.base().to_path_buf(),
            relative: file.relative(),
        };
        let filename = self
            .configured_filename
            .clone()
            .unwrap_or_else(|| paths::display(&base_file.relative));
        let map_filename = self.map_target.resolve(&filename);

        debug!(
            filename = %filename,
            map = map_filename.as_deref().unwrap_or("-"),
            "recorded base file"
        );
        (base_file, filename, map_filename)
    }
}
