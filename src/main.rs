use std::path::PathBuf;

use catch23_packer::config::{LibraryConfig, Manifest, PackOptions};
use catch23_packer::pack::{output_path, pack_library};
use catch23_packer::{PackError, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose)?;

    let manifest = match &cli.manifest {
        Some(path) => Manifest::load(path)?,
        None => Manifest::default(),
    };
    let libraries = manifest.select(&cli.only)?;

    if cli.list {
        list_libraries(&libraries);
        return Ok(());
    }

    let mut options = PackOptions::default();
    if let Some(root) = cli.root {
        options.root = root;
    }
    if let Some(license) = cli.license.or(manifest.license) {
        options.license = license;
    }

    for library in &libraries {
        pack_library(library, &options)?;
        println!("Written: {}", output_path(library, &options).display());
    }
    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| PackError::Logging(err.to_string()))
}

fn list_libraries(libraries: &[LibraryConfig]) {
    for library in libraries {
        println!(
            "{}: {} -> {} ({})",
            library.name,
            library.source_dir.display(),
            library.output.display(),
            library.guard
        );
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Pack a multi-file C++ library into a single-include header."
)]
struct Cli {
    /// Directory that source, output and license paths are relative to.
    #[arg(long)]
    root: Option<PathBuf>,

    /// License file reproduced in the generated banner.
    #[arg(long)]
    license: Option<PathBuf>,

    /// JSON manifest describing the libraries to pack.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Only pack the named libraries.
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// Print the configured libraries and exit.
    #[arg(long)]
    list: bool,

    /// Increase log verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}
