//! Writing transform outputs to disk.
//!
//! Every output lands under the output directory at its path relative to its
//! base. Paths are normalized with `path_clean` and rejected if they would
//! escape the directory. Files are written to temporaries first and renamed
//! into place once all of them succeeded; on failure the temporaries are
//! removed.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use fob_minify::VirtualFile;
use path_clean::PathClean;
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Write `files` under `out_dir` (resolved against `cwd`), returning the
/// written paths in order.
pub fn write_outputs(files: &[VirtualFile], out_dir: &Path, cwd: &Path) -> Result<Vec<PathBuf>> {
    let dir = normalize_dir(out_dir, cwd);

    let mut operations = Vec::with_capacity(files.len());
    for file in files {
        let contents = file.contents().as_bytes().ok_or_else(|| {
            CliError::WriteFailure(format!("{} has no buffered contents", file.path().display()))
        })?;
        let target = validate_output_path(&dir, &file.relative())?;
        operations.push((target, contents));
    }

    write_files_atomic(&operations)?;

    let written: Vec<PathBuf> = operations.into_iter().map(|(path, _)| path).collect();
    for path in &written {
        info!(path = %path.display(), "wrote output");
    }
    Ok(written)
}

fn normalize_dir(dir: &Path, cwd: &Path) -> PathBuf {
    let cleaned = dir.clean();
    if cleaned.is_absolute() {
        cleaned
    } else {
        cwd.join(cleaned).clean()
    }
}

/// Join `relative` onto `base_dir`, refusing anything that resolves outside.
fn validate_output_path(base_dir: &Path, relative: &Path) -> Result<PathBuf> {
    if relative.as_os_str().is_empty() {
        return Err(CliError::InvalidOutputPath("empty output path".to_string()));
    }

    let full_path = base_dir.join(relative.clean()).clean();
    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(CliError::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            relative.display(),
            base_dir.display(),
            full_path.display()
        )));
    }
    Ok(full_path)
}

fn temp_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Two-phase write: every file goes to `<name>.tmp`, then all are renamed.
fn write_files_atomic(operations: &[(PathBuf, &[u8])]) -> Result<()> {
    let mut temp_files = Vec::with_capacity(operations.len());

    for (target, content) in operations {
        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                cleanup_temp_files(&temp_files);
                return Err(CliError::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                )));
            }
        }

        let temp = temp_path(target);
        if let Err(e) = fs::write(&temp, content) {
            cleanup_temp_files(&temp_files);
            return Err(CliError::WriteFailure(format!(
                "Failed to write '{}': {}",
                temp.display(),
                e
            )));
        }
        temp_files.push(temp);
    }

    for (temp, (target, _)) in temp_files.iter().zip(operations) {
        if let Err(e) = fs::rename(temp, target) {
            cleanup_temp_files(&temp_files);
            return Err(CliError::WriteFailure(format!(
                "Failed to move '{}' into place: {}",
                target.display(),
                e
            )));
        }
        debug!(path = %target.display(), "committed output");
    }

    Ok(())
}

fn cleanup_temp_files(temp_files: &[PathBuf]) {
    for temp in temp_files {
        let _ = fs::remove_file(temp);
    }
}
