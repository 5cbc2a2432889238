use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catch23::packer::error::{PackError, Result};

/// Macro that enables the implementation section of a packed header.
pub const DEFAULT_IMPL_MACRO: &str = "CATCHKIT_IMPL";
/// License file read when nothing else is configured.
pub const DEFAULT_LICENSE: &str = "LICENSE";

/// Describes one library to pack into a single header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibraryConfig {
    /// Display name written into the banner.
    pub name: String,
    /// Directory searched recursively for source files.
    pub source_dir: PathBuf,
    /// Path of the generated header.
    pub output: PathBuf,
    /// Outer include guard of the generated header.
    pub guard: String,
    #[serde(default = "default_impl_macro")]
    pub impl_macro: String,
    /// File extensions treated as source files.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl LibraryConfig {
    pub fn new(
        name: impl Into<String>,
        source_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        guard: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_dir: source_dir.into(),
            output: output.into(),
            guard: guard.into(),
            impl_macro: default_impl_macro(),
            extensions: default_extensions(),
        }
    }
}

fn default_impl_macro() -> String {
    DEFAULT_IMPL_MACRO.to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["cpp".to_string()]
}

/// The two libraries shipped from this repository, in packing order.
pub fn builtin_libraries() -> Vec<LibraryConfig> {
    vec![
        LibraryConfig::new(
            "CatchKit",
            "catchkit/src",
            "catchkit/single_include/catchkit.h",
            "CATCHKIT_PACKED_H_INCLUDED",
        ),
        LibraryConfig::new(
            "Catch23",
            "catch23/src",
            "catch23/single_include/catch23.h",
            "CATCH23_PACKED_H_INCLUDED",
        ),
    ]
}

/// JSON manifest listing libraries to pack.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub license: Option<PathBuf>,
    pub libraries: Vec<LibraryConfig>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            license: None,
            libraries: builtin_libraries(),
        }
    }
}

impl Manifest {
    /// Loads a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|err| PackError::read(path, err))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Keeps only the libraries named in `names` (case-insensitive), in
    /// manifest order. An empty filter keeps everything.
    pub fn select(&self, names: &[String]) -> Result<Vec<LibraryConfig>> {
        if let Some(unknown) = names.iter().find(|name| {
            !self
                .libraries
                .iter()
                .any(|lib| lib.name.eq_ignore_ascii_case(name))
        }) {
            return Err(PackError::UnknownLibrary(unknown.clone()));
        }

        Ok(self
            .libraries
            .iter()
            .filter(|lib| {
                names.is_empty() || names.iter().any(|name| lib.name.eq_ignore_ascii_case(name))
            })
            .cloned()
            .collect())
    }
}

/// Settings shared by every run of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    /// Directory every relative path is resolved against.
    pub root: PathBuf,
    /// License file, relative to `root` unless absolute.
    pub license: PathBuf,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            license: PathBuf::from(DEFAULT_LICENSE),
        }
    }
}
