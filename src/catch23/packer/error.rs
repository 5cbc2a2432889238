use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, PackError>;

/// Error type covering the different failure cases that can occur when the
/// packer scans a library, parses file prefixes, or writes the single header.
#[derive(Debug, Error)]
pub enum PackError {
    /// Wrapper for IO failures such as creating directories or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when an input file cannot be opened or is not valid UTF-8 text.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when an `#ifndef` guard is not immediately followed by a `#define`.
    #[error("expected header guard define ({guard}) at {path}:{line}")]
    MissingGuardDefine {
        path: PathBuf,
        line: usize,
        guard: String,
    },

    /// Raised when a guarded header never closes its guard.
    #[error("expected closing header guard ({guard}) in {path}")]
    MissingClosingGuard { path: PathBuf, guard: String },

    /// Raised when a library's source directory does not exist.
    #[error("source directory not found: {0}")]
    SourceDirNotFound(PathBuf),

    /// Errors bubbled up while walking a source tree.
    #[error("failed to scan source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Raised when a library manifest cannot be parsed.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Raised when the CLI asks for a library that is not configured.
    #[error("no library named {0:?} is configured")]
    UnknownLibrary(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl PackError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackError::Read {
            path: path.into(),
            source,
        }
    }
}
