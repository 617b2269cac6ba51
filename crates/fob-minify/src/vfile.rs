//! In-memory files flowing through the transform.
//!
//! A [`VirtualFile`] is the unit of exchange on both sides of the transform:
//! upstream producers hand them in, the assembler hands new ones out. A file
//! is assembled with the `with_*` builders and is not mutated afterwards.

use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::paths;

/// Payload of a virtual file.
pub enum Contents {
    /// No payload at all (directories, placeholders).
    Null,
    /// Fully materialized bytes.
    Buffer(Vec<u8>),
    /// An open stream that has not been read. Not supported by the transform.
    Stream(Box<dyn Read + Send>),
}

impl Contents {
    /// Bytes of a buffered payload.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Contents::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contents::Null => f.write_str("Null"),
            Contents::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
            Contents::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Vec<u8>> for Contents {
    fn from(bytes: Vec<u8>) -> Self {
        Contents::Buffer(bytes)
    }
}

impl From<&[u8]> for Contents {
    fn from(bytes: &[u8]) -> Self {
        Contents::Buffer(bytes.to_vec())
    }
}

impl From<String> for Contents {
    fn from(text: String) -> Self {
        Contents::Buffer(text.into_bytes())
    }
}

impl From<&str> for Contents {
    fn from(text: &str) -> Self {
        Contents::Buffer(text.as_bytes().to_vec())
    }
}

/// A file path plus payload, detached from the real filesystem.
///
/// # Example
///
/// ```
/// use fob_minify::VirtualFile;
/// use std::path::Path;
///
/// let file = VirtualFile::new("/project/src/app.js")
///     .with_cwd("/project")
///     .with_base("/project/src")
///     .with_contents("let a = 1;");
///
/// assert_eq!(file.relative(), Path::new("app.js"));
/// ```
#[derive(Debug)]
pub struct VirtualFile {
    cwd: PathBuf,
    base: Option<PathBuf>,
    path: PathBuf,
    contents: Contents,
}

impl VirtualFile {
    /// Create a file without payload. `cwd` defaults to `.` and `base` to `cwd`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            cwd: PathBuf::from("."),
            base: None,
            path: path.into(),
            contents: Contents::Null,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_contents(mut self, contents: impl Into<Contents>) -> Self {
        self.contents = contents.into();
        self
    }

    /// Attach an unread stream as payload.
    pub fn with_stream(mut self, reader: impl Read + Send + 'static) -> Self {
        self.contents = Contents::Stream(Box::new(reader));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn base(&self) -> &Path {
        self.base.as_deref().unwrap_or(&self.cwd)
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    /// Path relative to [`base`](Self::base), both resolved against `cwd`.
    pub fn relative(&self) -> PathBuf {
        let base = paths::resolve(&self.cwd, self.base());
        let path = paths::resolve(&self.cwd, &self.path);
        paths::relative(&base, &path)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.contents, Contents::Null)
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self.contents, Contents::Buffer(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.contents, Contents::Stream(_))
    }

    /// Buffered payload decoded as UTF-8, replacing invalid sequences.
    pub fn contents_str(&self) -> Option<Cow<'_, str>> {
        self.contents.as_bytes().map(String::from_utf8_lossy)
    }

    /// Give up the file, keeping only its payload.
    pub fn into_contents(self) -> Contents {
        self.contents
    }
}
