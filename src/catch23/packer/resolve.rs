use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use crate::catch23::packer::error::{PackError, Result};
use crate::catch23::packer::model::{FileKind, Packer};
use crate::catch23::packer::prefix::read_prefix;

/// Maps a local include target to the path of the file it names.
///
/// * `"name.h"` resolves next to the including file.
/// * `"project/name.h"` resolves to `project/include/project/name.h`.
/// * Anything else is taken verbatim.
pub fn resolve_include(including: &Path, target: &str) -> PathBuf {
    let segments: Vec<&str> = target.split('/').collect();
    match segments.as_slice() {
        [name] => including.parent().unwrap_or(Path::new("")).join(name),
        [project, name] => Path::new(project).join("include").join(project).join(name),
        _ => PathBuf::from(target),
    }
}

/// Counts describing a finished dependency scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    pub sources: usize,
    pub headers: usize,
    pub system_includes: usize,
}

/// Accumulates everything one library contributes to its packed header.
///
/// Paths held by the descriptors are relative to `root`. Every local include
/// is parsed at most once; the first reference wins.
#[derive(Debug, Default)]
pub struct LibPacker {
    root: PathBuf,
    src_system_includes: BTreeSet<String>,
    header_system_includes: BTreeSet<String>,
    local_includes_seen: HashSet<PathBuf>,
    src_packers: Vec<Packer>,
    include_packers: Vec<Packer>,
}

impl LibPacker {
    /// Creates an empty aggregate resolving paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source descriptors in path order.
    pub fn sources(&self) -> &[Packer] {
        &self.src_packers
    }

    /// Header descriptors, each placed after the headers it includes.
    pub fn headers(&self) -> &[Packer] {
        &self.include_packers
    }

    pub fn header_system_includes(&self) -> &BTreeSet<String> {
        &self.header_system_includes
    }

    pub fn source_system_includes(&self) -> &BTreeSet<String> {
        &self.src_system_includes
    }

    pub fn summary(&self) -> PackSummary {
        PackSummary {
            sources: self.src_packers.len(),
            headers: self.include_packers.len(),
            system_includes: self.header_system_includes.len(),
        }
    }

    /// Parses every source file under `from_dir` whose extension is listed in
    /// `extensions`, then every header reachable from them.
    #[instrument(level = "debug", skip(self, extensions), fields(root = %self.root.display(), from_dir = %from_dir.display()))]
    pub fn parse_prefixes(&mut self, from_dir: &Path, extensions: &[String]) -> Result<()> {
        for path in self.find_sources(from_dir, extensions)? {
            let mut packer = Packer::new(path, FileKind::Source);
            self.parse_prefix(&mut packer)?;
            self.src_packers.push(packer);
        }
        debug!(summary = ?self.summary(), "dependency scan finished");
        Ok(())
    }

    fn find_sources(&self, from_dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
        let search_root = self.root.join(from_dir);
        if !search_root.is_dir() {
            return Err(PackError::SourceDirNotFound(from_dir.to_path_buf()));
        }

        let mut sources = Vec::new();
        for entry in WalkDir::new(&search_root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext));
            if matches {
                let relative = entry
                    .path()
                    .strip_prefix(&self.root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                sources.push(relative);
            }
        }
        sources.sort();
        Ok(sources)
    }

    fn parse_prefix(&mut self, packer: &mut Packer) -> Result<()> {
        read_prefix(packer, &self.root)?;

        let includes = match packer.kind {
            FileKind::Header => &mut self.header_system_includes,
            FileKind::Source => &mut self.src_system_includes,
        };
        includes.extend(packer.system_includes.iter().cloned());

        for target in &packer.local_includes {
            let include_path = resolve_include(&packer.path, target);
            if !self.local_includes_seen.insert(include_path.clone()) {
                trace!(include = %include_path.display(), "already seen");
                continue;
            }
            let mut include_packer = Packer::new(include_path, FileKind::Header);
            self.parse_prefix(&mut include_packer)?;
            self.include_packers.push(include_packer);
        }
        Ok(())
    }
}
