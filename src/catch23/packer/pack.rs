use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{info, instrument};

use crate::catch23::packer::config::{LibraryConfig, PackOptions};
use crate::catch23::packer::emit::{Banner, read_license, write_packed_file};
use crate::catch23::packer::error::Result;
use crate::catch23::packer::resolve::{LibPacker, PackSummary};

/// Location the packed header of `library` is written to.
pub fn output_path(library: &LibraryConfig, options: &PackOptions) -> PathBuf {
    options.root.join(&library.output)
}

/// Packs one library into its single-include header, stamped with the
/// current time.
pub fn pack_library(library: &LibraryConfig, options: &PackOptions) -> Result<PackSummary> {
    pack_library_at(library, options, Local::now())
}

/// Packs one library into its single-include header using a fixed
/// generation time.
///
/// Each call scans the library from scratch, so nothing carries over between
/// runs.
#[instrument(
    level = "info",
    skip_all,
    fields(
        lib = %library.name,
        source_dir = %library.source_dir.display(),
        output = %library.output.display()
    )
)]
pub fn pack_library_at(
    library: &LibraryConfig,
    options: &PackOptions,
    generated_at: DateTime<Local>,
) -> Result<PackSummary> {
    let mut lib = LibPacker::new(&options.root);
    lib.parse_prefixes(&library.source_dir, &library.extensions)?;
    let summary = lib.summary();
    info!(
        sources = summary.sources,
        headers = summary.headers,
        header_system_includes = summary.system_includes,
        source_system_includes = lib.source_system_includes().len(),
        "resolved library files"
    );

    let banner = Banner {
        lib_name: library.name.clone(),
        guard: library.guard.clone(),
        impl_macro: library.impl_macro.clone(),
        generated_at,
        license_lines: read_license(&options.root, &options.license)?,
    };
    write_packed_file(&lib, &output_path(library, options), &banner)?;
    Ok(summary)
}
