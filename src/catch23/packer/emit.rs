//! Writes the single-include header for a scanned library.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{debug, info, instrument, warn};

use crate::catch23::packer::error::{PackError, Result};
use crate::catch23::packer::grammar::{GuardCloser, match_guard_closer};
use crate::catch23::packer::io::lines::read_lines;
use crate::catch23::packer::model::Packer;
use crate::catch23::packer::resolve::LibPacker;

/// Format used for the generation timestamp in the banner.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Everything the generated file needs besides the scanned library itself.
#[derive(Debug, Clone)]
pub struct Banner {
    /// Display name printed at the top of the banner.
    pub lib_name: String,
    /// Outer include guard macro.
    pub guard: String,
    /// Macro that enables the implementation section.
    pub impl_macro: String,
    pub generated_at: DateTime<Local>,
    /// License text, one entry per line without terminators.
    pub license_lines: Vec<String>,
}

/// Reads the license file at `path`, relative to `root`, verbatim and line by
/// line.
pub fn read_license(root: &Path, path: &Path) -> Result<Vec<String>> {
    read_lines(root, path)?
        .map(|line| {
            line.map(|line| {
                line.original
                    .trim_end_matches(['\r', '\n'])
                    .to_string()
            })
        })
        .collect()
}

/// Creates the parent directories of `path` and writes the packed header to it.
#[instrument(level = "info", skip_all, fields(output = %path.display(), lib = %banner.lib_name))]
pub fn write_packed_file(lib: &LibPacker, path: &Path, banner: &Banner) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(path)?);
    write_packed_header(lib, &mut out, banner)?;
    out.flush()?;

    info!(summary = ?lib.summary(), "packed header written");
    Ok(())
}

/// Writes the banner, the header bodies and the guarded implementation section.
pub fn write_packed_header<W: Write>(lib: &LibPacker, out: &mut W, banner: &Banner) -> Result<()> {
    writeln!(out, "/*")?;
    writeln!(out, " * {}", banner.lib_name)?;
    writeln!(
        out,
        " * Single header - Generated: {}",
        banner.generated_at.format(TIMESTAMP_FORMAT)
    )?;
    writeln!(out, " * ----------------------------------------------------------")?;
    writeln!(
        out,
        " * This file has been generated by merging together multiple source files."
    )?;
    writeln!(out, " * Please don't edit it directly.")?;
    writeln!(out, " *")?;
    writeln!(
        out,
        " * Distributed under the MIT license. See text reproduced, below:"
    )?;
    writeln!(out, " *")?;
    for line in &banner.license_lines {
        writeln!(out, " * {line}")?;
    }
    writeln!(out, " */")?;

    writeln!(out, "#ifndef {}", banner.guard)?;
    writeln!(out, "#define {}\n", banner.guard)?;
    writeln!(out, "// Packed header\n")?;

    writeln!(out, "// System includes (for headers):")?;
    write_system_includes(lib, out)?;

    writeln!(out, "// From header files:")?;
    for packer in lib.headers() {
        copy_body(packer, lib.root(), out)?;
    }

    writeln!(out, "// From source files:")?;
    writeln!(out, "#ifdef {}\n", banner.impl_macro)?;

    // Implementation builds re-declare the header tier.
    writeln!(out, "// System includes (for impl):")?;
    write_system_includes(lib, out)?;

    for packer in lib.sources() {
        copy_body(packer, lib.root(), out)?;
    }

    writeln!(out, "#endif // {}", banner.impl_macro)?;
    writeln!(out, "\n#endif // {}", banner.guard)?;
    Ok(())
}

fn write_system_includes<W: Write>(lib: &LibPacker, out: &mut W) -> Result<()> {
    for include in lib.header_system_includes() {
        writeln!(out, "#include <{include}>")?;
    }
    writeln!(out)?;
    Ok(())
}

/// Copies the body of `packer` to `out`, stopping at the closing guard of a
/// guarded header. Files without a body contribute nothing.
pub fn copy_body<W: Write>(packer: &Packer, root: &Path, out: &mut W) -> Result<()> {
    let Some(body_start) = packer.body_start else {
        debug!(file = %packer.path.display(), "no body, skipping");
        return Ok(());
    };

    writeln!(out, "\n// Packed from {}", packer.path.display())?;
    let mut reader = read_lines(root, &packer.path)?;

    // TODO: record the body byte offset in read_prefix and seek to it here.
    for _ in 0..body_start {
        if reader.next_line()?.is_none() {
            break;
        }
    }

    let mut guard_seen = false;
    let mut ends_with_newline = true;
    for line in reader {
        let line = line?;
        if let Some(guard) = &packer.header_guard {
            if let Some(closer) = match_guard_closer(&line.stripped, guard) {
                if closer == GuardCloser::MissingSpace {
                    warn!(
                        path = %packer.path.display(),
                        line = line.index + 1,
                        "closing guard name is missing a space"
                    );
                }
                guard_seen = true;
                break;
            }
        }
        out.write_all(line.original.as_bytes())?;
        ends_with_newline = line.original.ends_with('\n');
    }
    if !ends_with_newline {
        writeln!(out)?;
    }

    match &packer.header_guard {
        Some(guard) if !guard_seen => Err(PackError::MissingClosingGuard {
            path: packer.path.clone(),
            guard: guard.clone(),
        }),
        _ => Ok(()),
    }
}
