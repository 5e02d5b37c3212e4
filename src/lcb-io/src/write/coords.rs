use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use blocks_finder::BlockInstance;
use junction_graph::Chromosome;
use located_error::prelude::*;

use crate::error::IoError;

/// Write `blocks_coords.txt`: one header line per block id, then one line per instance
/// `(chr_description, strand, start, end, length)` in 1-based conventional coordinates (§6.3).
///
/// With no committed blocks this still produces a well-formed, header-only file (§8 scenario
/// S5).
///
/// # Errors
/// Returns [`IoError::CreateOutfile`] if the file cannot be created.
pub fn write_blocks_coords(outdir: impl AsRef<Path>, chromosomes: &[Chromosome], blocks: &[BlockInstance]) -> Result<()> {
    let path = outdir.as_ref().join("blocks_coords.txt");
    let file = File::create(&path).map_err(|_| IoError::CreateOutfile(path.display().to_string())).loc("While creating blocks_coords.txt")?;
    let mut w = BufWriter::new(file);

    writeln!(w, "Block_id\tSeq_id\tDescription\tStrand\tStart\tEnd\tLength").loc("While writing blocks_coords.txt header")?;

    let mut by_block: BTreeMap<i32, Vec<&BlockInstance>> = BTreeMap::new();
    for b in blocks {
        by_block.entry(b.block_id()).or_default().push(b);
    }

    for (block_id, instances) in by_block {
        writeln!(w, "--- Block {block_id}, {} instances ---", instances.len()).loc("While writing a block header in blocks_coords.txt")?;
        for inst in instances {
            let strand = if inst.direction_is_positive() { '+' } else { '-' };
            let description = chromosomes[inst.chr_id() as usize].description();
            writeln!(w, "{block_id}\t{}\t{description}\t{strand}\t{}\t{}\t{}", inst.chr_id(), inst.conventional_start(), inst.conventional_end(), inst.length())
                .loc("While writing a block instance row in blocks_coords.txt")?;
        }
    }

    w.flush().loc("While flushing blocks_coords.txt")
}
