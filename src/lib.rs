//! Wires the external collaborators (`lcb-parser`, `lcb-io`) to the core block-finding engine
//! (`junction-graph`, `block-engine`, `blocks-finder`): parse inputs, build the
//! [`junction_graph::JunctionStorage`], run [`blocks_finder::BlocksFinder`], emit the three
//! output files.

use std::time::Instant;

use blocks_finder::{BlocksFinder, Config};
use junction_graph::JunctionStorage;
use lcb_parser::Cli;
use located_error::prelude::*;
use log::info;

/// Run one end-to-end `lcb-finder` invocation: parse `cli.infile`/`cli.gfile`, build the
/// junction graph, search for blocks, and write `coverage_report.txt`, `blocks_coords.txt`,
/// `blocks_sequences.fasta` under `cli.outdir` (§6.3).
///
/// # Errors
/// Propagates any [`lcb_io::IoError`] or [`junction_graph::JunctionGraphError`] encountered while
/// parsing inputs or assembling the graph (§7 kinds 1-2).
pub fn run(cli: &Cli) -> Result<()> {
    lcb_io::ensure_outdir(&cli.outdir)?;

    info!("reading companion FASTA {}", cli.gfile.display());
    let chromosomes = lcb_io::read_chromosomes(&cli.gfile)?;
    info!("reading junctions stream {}", cli.infile.display());
    let raw_junctions = lcb_io::read_junctions(&cli.infile)?;

    info!("building junction graph (k={}, {} chromosomes, {} raw junctions)", cli.k, chromosomes.len(), raw_junctions.len());
    let storage = JunctionStorage::build(chromosomes, raw_junctions, cli.k, cli.abundance).loc("While assembling the junction graph")?;
    info!("graph ready: {} max |vertex-id| after abundance filtering", storage.max_abs_vertex_id());

    let config = Config::new(cli.max_branch_size, cli.min_block_size, cli.depth, cli.threads);
    let finder = BlocksFinder::new(&storage, config);

    let start = Instant::now();
    let blocks = finder.run();
    info!("found {} block instances in {:.2?}", blocks.len(), start.elapsed());

    lcb_io::write_coverage_report(&cli.outdir, storage.chromosomes(), &blocks)?;
    lcb_io::write_blocks_coords(&cli.outdir, storage.chromosomes(), &blocks)?;
    lcb_io::write_blocks_sequences(&cli.outdir, storage.chromosomes(), &blocks)?;

    Ok(())
}
