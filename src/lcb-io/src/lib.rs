//! External collaborators the core block-finding engine explicitly excludes from its scope
//! (§1): parsing the upstream junctions binary and companion FASTA into
//! [`junction_graph::JunctionStorage`] inputs, creating the output directory, and emitting the
//! three result files (§6.3).

pub mod error;
pub mod read;
pub mod write;

pub use error::IoError;
pub use read::{read_chromosomes, read_junctions};
pub use write::{write_blocks_coords, write_blocks_sequences, write_coverage_report};

use std::fs;
use std::path::Path;

use located_error::prelude::*;

/// Create the output directory (and any missing parents) if it does not already exist (§6.3).
///
/// # Errors
/// Returns [`IoError::CreateOutdir`] if the directory cannot be created.
pub fn ensure_outdir(outdir: impl AsRef<Path>) -> Result<()> {
    let outdir = outdir.as_ref();
    fs::create_dir_all(outdir)
        .map_err(|_| error::IoError::CreateOutdir(outdir.display().to_string()))
        .loc("While creating the output directory")
}
