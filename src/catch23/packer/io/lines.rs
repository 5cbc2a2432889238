use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::catch23::packer::error::{PackError, Result};
use crate::catch23::packer::model::LineInfo;

/// Lazily yields the lines of a text file as [`LineInfo`] records.
///
/// Every call to [`read_lines`] opens the file afresh; the handle is closed as
/// soon as the reader is dropped, including when a caller stops early.
pub struct LineReader<R> {
    path: PathBuf,
    source: R,
    next_index: usize,
}

/// Opens `path`, resolved against `root`, for line-by-line reading.
///
/// Errors name the file by `path` as given, not by the joined location.
pub fn read_lines(root: &Path, path: &Path) -> Result<LineReader<BufReader<File>>> {
    let file = File::open(root.join(path)).map_err(|err| PackError::read(path, err))?;
    Ok(LineReader::new(path, BufReader::new(file)))
}

impl<R: BufRead> LineReader<R> {
    /// Wraps an already open buffered source. `path` is only used in errors.
    pub fn new(path: impl Into<PathBuf>, source: R) -> Self {
        Self {
            path: path.into(),
            source,
            next_index: 0,
        }
    }

    /// Reads the next line, returning `None` at end of file.
    pub fn next_line(&mut self) -> Result<Option<LineInfo>> {
        let mut buffer = String::new();
        let read = self
            .source
            .read_line(&mut buffer)
            .map_err(|err| PackError::read(&self.path, err))?;
        if read == 0 {
            return Ok(None);
        }
        let line = LineInfo::new(self.next_index, buffer);
        self.next_index += 1;
        Ok(Some(line))
    }

    /// Advances past blank and comment lines, starting with `current` when the
    /// caller already holds a line, and returns the first substantive one.
    ///
    /// Returns `None` when the file ends before such a line is found.
    pub fn skip_blanks_and_comments(
        &mut self,
        current: Option<LineInfo>,
    ) -> Result<Option<LineInfo>> {
        let mut line = match current {
            Some(line) => line,
            None => match self.next_line()? {
                Some(line) => line,
                None => return Ok(None),
            },
        };
        loop {
            if !line.is_blank_or_comment() {
                return Ok(Some(line));
            }
            line = match self.next_line()? {
                Some(next) => next,
                None => return Ok(None),
            };
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<LineInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
