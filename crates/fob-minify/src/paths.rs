//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: paths are joined and cleaned the way
//! `path-clean` does it, so virtual files that never existed on disk resolve
//! the same way real ones do.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Resolve `path` against `cwd` when it is relative, then clean it.
pub(crate) fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        cwd.join(path).clean()
    }
}

/// Compute `to` relative to `from`.
///
/// Both paths are cleaned first. When one is absolute and the other is not
/// there is no common root, so the cleaned `to` is returned unchanged.
pub(crate) fn relative(from: &Path, to: &Path) -> PathBuf {
    let from = from.clean();
    let to = to.clean();

    if from.is_absolute() != to.is_absolute() {
        return to;
    }

    let from: Vec<Component<'_>> = from
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component<'_>> = to
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &to[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Render a path as a string for embedding in a source map or file name.
pub(crate) fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
