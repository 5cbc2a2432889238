use std::fmt;
use std::path::PathBuf;

/// Marker that opens a line comment.
pub const LINE_COMMENT: &str = "//";

/// One physical line read from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    /// Zero-based index of the line within its file.
    pub index: usize,
    /// Raw text, including the line terminator when present.
    pub original: String,
    /// Text with surrounding whitespace removed.
    pub stripped: String,
    /// The stripped text starts with a line comment marker.
    pub is_comment: bool,
    /// The stripped text is empty.
    pub is_blank: bool,
}

impl LineInfo {
    /// Classifies a raw line read at `index`.
    pub fn new(index: usize, original: impl Into<String>) -> Self {
        let original = original.into();
        let stripped = original.trim().to_string();
        Self {
            index,
            is_comment: stripped.starts_with(LINE_COMMENT),
            is_blank: stripped.is_empty(),
            original,
            stripped,
        }
    }

    pub fn is_blank_or_comment(&self) -> bool {
        self.is_blank || self.is_comment
    }
}

/// Whether a file is a primary source file or a header reached through a
/// local include. Only headers carry an include guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Source,
    Header,
}

impl FileKind {
    pub fn is_header(self) -> bool {
        matches!(self, FileKind::Header)
    }
}

/// A source or header file taking part in a packing run.
///
/// The prefix fields are filled in by [`crate::prefix::read_prefix`]; the
/// descriptor is then kept until the emitter copies its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packer {
    /// Path of the file relative to the packing root.
    pub path: PathBuf,
    pub kind: FileKind,
    /// Targets of `#include <...>` directives found in the prefix.
    pub system_includes: Vec<String>,
    /// Targets of `#include "..."` directives found in the prefix.
    pub local_includes: Vec<String>,
    /// Index of the first body line. `None` means the file has no body.
    pub body_start: Option<usize>,
    /// Include guard macro, only ever set for headers.
    pub header_guard: Option<String>,
}

impl Packer {
    /// Creates an unparsed descriptor for the file at `path`.
    pub fn new(path: impl Into<PathBuf>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            kind,
            system_includes: Vec::new(),
            local_includes: Vec::new(),
            body_start: None,
            header_guard: None,
        }
    }

    pub fn has_body(&self) -> bool {
        self.body_start.is_some()
    }
}

impl fmt::Display for Packer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} system include(s) and {} local include(s))",
            self.path.display(),
            self.system_includes.len(),
            self.local_includes.len()
        )
    }
}
