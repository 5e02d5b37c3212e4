use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;
use serde::Serialize;

mod error;
pub use error::ParserError;

/// `lcb-finder`: construction of locally-collinear blocks from a compacted de Bruijn graph of
/// complete genomes (§6.2).
#[derive(Parser, Debug, Serialize)]
#[clap(name = "lcb-finder", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the verbosity level (-v -vv -vvv -vvvv)
    ///
    /// -v: Info | -vv: Debug | -vvv..: Trace {n}
    /// The program still emits warnings by default even without this flag; use --quiet to
    /// silence them.
    #[clap(short = 'v', long, parse(from_occurrences), global = true)]
    pub verbose: u8,

    /// Disable warnings; only errors are printed.
    #[clap(short = 'q', long, global = true)]
    pub quiet: bool,

    /// k-mer size the junctions file was built with. Must be odd.
    #[clap(short = 'k', long = "k", default_value_t = 25)]
    pub k: usize,

    /// Max branch size (bp): local bubbles up to this size are tolerated as divergence.
    #[clap(short = 'b', long = "branch-size", default_value_t = 200)]
    pub max_branch_size: i64,

    /// Min block size (bp): blocks shorter than this are never emitted.
    #[clap(short = 'm', long = "min-block-size", default_value_t = 50)]
    pub min_block_size: i64,

    /// DFS looking depth for both search passes.
    #[clap(long = "depth", default_value_t = 8)]
    pub depth: u32,

    /// Worker threads for the seed-extension pass. Use 1 for deterministic output (§5, §8).
    #[clap(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,

    /// Max occurrences of a single vertex before it is filtered out as non-existent (§4.1).
    #[clap(long = "abundance", default_value_t = 150)]
    pub abundance: usize,

    /// Binary stream of `(chr_id, position, vertex_id)` junction records, sorted by
    /// `(chr_id, position)` (§6.1).
    #[clap(long = "infile")]
    pub infile: PathBuf,

    /// FASTA of the same chromosomes the junctions file was built from, in the same chromosome
    /// id order (§6.1).
    #[clap(long = "gfile")]
    pub gfile: PathBuf,

    /// Output directory for `coverage_report.txt`, `blocks_coords.txt`, `blocks_sequences.fasta`.
    #[clap(short = 'o', long = "outdir", default_value = "out")]
    pub outdir: PathBuf,
}

impl Cli {
    /// Cross-field and file-existence validation beyond what clap's own parsing enforces
    /// (§7 kind 1). Called once, before any construction work begins.
    ///
    /// # Errors
    /// Returns the first [`ParserError`] encountered; this function deliberately does not
    /// accumulate multiple violations; see §7 ("reported to stderr, exit 1, no partial output").
    pub fn validate(&self) -> Result<(), ParserError> {
        if self.k % 2 == 0 {
            return Err(ParserError::EvenK(self.k));
        }
        if self.max_branch_size <= 0 {
            return Err(ParserError::NonPositiveBranchSize(self.max_branch_size));
        }
        if self.min_block_size <= 0 {
            return Err(ParserError::NonPositiveBlockSize(self.min_block_size));
        }
        if self.depth == 0 {
            return Err(ParserError::NonPositiveDepth(self.depth));
        }
        if self.threads == 0 {
            return Err(ParserError::NonPositiveThreads(self.threads));
        }
        if self.abundance == 0 {
            return Err(ParserError::NonPositiveAbundance(self.abundance));
        }
        if !self.infile.exists() {
            return Err(ParserError::MissingInfile(self.infile.display().to_string()));
        }
        if !self.gfile.exists() {
            return Err(ParserError::MissingGfile(self.gfile.display().to_string()));
        }
        Ok(())
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Log the fully-resolved argument set at debug level, mirroring the `serde_yaml` dump the
    /// teacher CLI front-end uses for reproducibility (§7 "deterministic given inputs").
    pub fn log_args(&self) {
        match serde_yaml::to_string(self) {
            Ok(serialized) => debug!("\n---- Command line args ----\n{serialized}\n---"),
            Err(e) => debug!("failed to serialize command line args: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_even_k() {
        let mut cli = Cli::parse_from(["lcb-finder", "--infile", "in.bin", "--gfile", "in.fasta"]);
        cli.k = 24;
        assert!(matches!(cli.validate(), Err(ParserError::EvenK(24))));
    }

    #[test]
    fn rejects_nonpositive_branch_size() {
        let mut cli = Cli::parse_from(["lcb-finder", "--infile", "in.bin", "--gfile", "in.fasta"]);
        cli.max_branch_size = 0;
        assert!(matches!(cli.validate(), Err(ParserError::NonPositiveBranchSize(0))));
    }

    #[test]
    fn defaults_match_spec_table() {
        let cli = Cli::parse_from(["lcb-finder", "--infile", "in.bin", "--gfile", "in.fasta"]);
        assert_eq!(cli.k, 25);
        assert_eq!(cli.max_branch_size, 200);
        assert_eq!(cli.min_block_size, 50);
        assert_eq!(cli.depth, 8);
        assert_eq!(cli.threads, 1);
        assert_eq!(cli.abundance, 150);
        assert_eq!(cli.outdir, PathBuf::from("out"));
    }
}
