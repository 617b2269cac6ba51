//! The merged compilation unit.
//!
//! Every accepted file becomes a [`SourceEntry`] in acceptance order. Wrap
//! and enclose transforms stack wrappers around the whole unit. Rendering
//! produces the program text handed to the engine together with a line
//! table, so positions in the rendered text can be traced back to the entry
//! they came from.

/// One source file inside the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    name: String,
    text: String,
}

impl SourceEntry {
    /// Path of the source relative to the configured base path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Wrapper {
    open: String,
    close: String,
}

/// Sources plus wrappers, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    sources: Vec<SourceEntry>,
    wrappers: Vec<Wrapper>,
}

impl CompilationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source. Later sources render after earlier ones.
    pub fn push_source(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.sources.push(SourceEntry {
            name: name.into(),
            text: text.into(),
        });
    }

    pub fn sources(&self) -> &[SourceEntry] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn is_wrapped(&self) -> bool {
        !self.wrappers.is_empty()
    }

    /// Surround everything added so far (sources and earlier wrappers).
    ///
    /// `open` must end with a line break so the first source starts a line.
    pub(crate) fn push_wrapper(&mut self, open: String, close: String) {
        debug_assert!(open.ends_with('\n'));
        self.wrappers.push(Wrapper { open, close });
    }

    /// Concatenate wrappers and sources into one program text.
    ///
    /// Each source starts on a fresh line. Consecutive sources are separated
    /// by a line holding a lone `;`, so a file that ends without a statement
    /// terminator cannot fuse with the next file.
    pub fn render(&self) -> RenderedUnit {
        let mut text = String::new();
        let mut spans = Vec::with_capacity(self.sources.len());

        for wrapper in self.wrappers.iter().rev() {
            text.push_str(&wrapper.open);
        }

        for (index, source) in self.sources.iter().enumerate() {
            if index > 0 {
                text.push_str(";\n");
            }
            let start = text.len();
            text.push_str(&source.text);
            if !source.text.is_empty() && !ends_with_line_break(&source.text) {
                text.push('\n');
            }
            spans.push((start, text.len()));
        }

        for wrapper in &self.wrappers {
            text.push_str(&wrapper.close);
        }

        let line_starts = line_starts(&text);
        let regions = spans
            .into_iter()
            .enumerate()
            .map(|(source, (start, end))| Region {
                source,
                start_line: line_of(&line_starts, start),
                end_line: if end == start {
                    line_of(&line_starts, start)
                } else {
                    line_of(&line_starts, end - 1) + 1
                },
            })
            .collect();

        RenderedUnit { text, regions }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    source: usize,
    start_line: u32,
    end_line: u32,
}

/// Program text plus the line ranges each source occupies in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    text: String,
    regions: Vec<Region>,
}

impl RenderedUnit {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map a zero-based line of the rendered text to `(source index, line
    /// within that source)`. Wrapper and separator lines map to `None`.
    pub fn locate(&self, line: u32) -> Option<(usize, u32)> {
        let idx = self.regions.partition_point(|r| r.end_line <= line);
        let region = self.regions.get(idx)?;
        (region.start_line <= line && line < region.end_line)
            .then(|| (region.source, line - region.start_line))
    }
}

fn ends_with_line_break(text: &str) -> bool {
    text.ends_with(['\n', '\r', '\u{2028}', '\u{2029}'])
}

/// Byte offsets at which each line starts, using ECMAScript line terminators.
pub(crate) fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\r' => {
                if let Some(&(j, '\n')) = chars.peek() {
                    chars.next();
                    starts.push(j + 1);
                } else {
                    starts.push(i + 1);
                }
            }
            '\n' => starts.push(i + 1),
            '\u{2028}' | '\u{2029}' => starts.push(i + c.len_utf8()),
            _ => {}
        }
    }
    starts
}

fn line_of(line_starts: &[usize], offset: usize) -> u32 {
    let line = line_starts.partition_point(|&start| start <= offset);
    line.saturating_sub(1) as u32
}
