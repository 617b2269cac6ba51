//! Input discovery: turns file and directory arguments into virtual files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fob_minify::VirtualFile;
use path_clean::PathClean;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{CliError, Result, ResultExt};

const EXTENSIONS: [&str; 3] = ["js", "mjs", "cjs"];

/// Read every input into a buffered [`VirtualFile`], in argument order.
///
/// Directories are walked recursively in file-name order and contribute
/// their JavaScript files. A file's base is `base` when given, otherwise the
/// directory argument it was found under, or its parent for file arguments.
pub fn collect_inputs(inputs: &[PathBuf], cwd: &Path, base: Option<&Path>) -> Result<Vec<VirtualFile>> {
    let base = base.map(|b| cwd.join(b).clean());
    let mut files = Vec::new();

    for input in inputs {
        let path = cwd.join(input).clean();
        if !path.exists() {
            return Err(CliError::FileNotFound(input.clone()));
        }

        if path.is_dir() {
            let dir_base = base.clone().unwrap_or_else(|| path.clone());
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = entry
                    .map_err(io::Error::from)
                    .context(format!("Failed to read {}", input.display()))?;
                if entry.file_type().is_file() && is_javascript(entry.path()) {
                    files.push(read_file(entry.path(), cwd, &dir_base)?);
                }
            }
        } else {
            let file_base = base
                .clone()
                .or_else(|| path.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| cwd.to_path_buf());
            files.push(read_file(&path, cwd, &file_base)?);
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInputs);
    }
    Ok(files)
}

fn is_javascript(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.contains(&e))
}

fn read_file(path: &Path, cwd: &Path, base: &Path) -> Result<VirtualFile> {
    let contents = fs::read(path).with_path(path)?;
    debug!(path = %path.display(), bytes = contents.len(), "read input");
    Ok(VirtualFile::new(path)
        .with_cwd(cwd)
        .with_base(base)
        .with_contents(contents))
}
