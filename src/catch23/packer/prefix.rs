//! Separates a file's prefix (banner comment, optional include guard and the
//! run of `#include` directives) from its body.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::catch23::packer::error::{PackError, Result};
use crate::catch23::packer::grammar::LineKind;
use crate::catch23::packer::io::lines::{LineReader, read_lines};
use crate::catch23::packer::model::Packer;

/// Parses the prefix of the file described by `packer`, which is located
/// relative to `root`.
///
/// Fills in the include lists, the body start and, for headers, the guard
/// name. A file that ends before any body line leaves `body_start` unset.
pub fn read_prefix(packer: &mut Packer, root: &Path) -> Result<()> {
    let mut reader = read_lines(root, &packer.path)?;
    parse_prefix(packer, &mut reader)?;
    debug!(file = %packer, body_start = ?packer.body_start, "parsed prefix");
    Ok(())
}

/// Runs the prefix scan over an already opened reader.
pub fn parse_prefix<R: BufRead>(packer: &mut Packer, reader: &mut LineReader<R>) -> Result<()> {
    // Banner comment block.
    let Some(mut line) = reader.skip_blanks_and_comments(None)? else {
        return Ok(());
    };

    if packer.kind.is_header() {
        if let LineKind::GuardOpen(guard) = LineKind::classify(&line.stripped) {
            match reader.next_line()? {
                Some(next) if LineKind::classify(&next.stripped) == LineKind::GuardDefine => {}
                next => {
                    let missing_at = next.map_or(line.index + 1, |next| next.index);
                    return Err(PackError::MissingGuardDefine {
                        path: packer.path.clone(),
                        line: missing_at + 1,
                        guard,
                    });
                }
            }
            packer.header_guard = Some(guard);
            line = match reader.skip_blanks_and_comments(None)? {
                Some(line) => line,
                None => return Ok(()),
            };
        }
    }

    loop {
        if !line.is_blank_or_comment() {
            match LineKind::classify(&line.stripped) {
                LineKind::SystemInclude(target) => packer.system_includes.push(target),
                LineKind::LocalInclude(target) => packer.local_includes.push(target),
                _ => {
                    packer.body_start = Some(line.index);
                    return Ok(());
                }
            }
        }
        line = match reader.next_line()? {
            Some(next) => next,
            None => return Ok(()),
        };
    }
}
