use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bio::alphabets::dna::revcomp;
use blocks_finder::BlockInstance;
use junction_graph::Chromosome;
use located_error::prelude::*;

use crate::error::IoError;

const WRAP_WIDTH: usize = 80;

/// Write `blocks_sequences.fasta`: one record per instance, header
/// `>Seq="<chr>",Strand='±',Block_id=N,Start=s,End=e`, body the chromosome slice
/// (reverse-complemented on the minus strand), wrapped at 80 columns (§6.3).
///
/// # Errors
/// Returns [`IoError::CreateOutfile`] if the file cannot be created.
pub fn write_blocks_sequences(outdir: impl AsRef<Path>, chromosomes: &[Chromosome], blocks: &[BlockInstance]) -> Result<()> {
    let path = outdir.as_ref().join("blocks_sequences.fasta");
    let file = File::create(&path).map_err(|_| IoError::CreateOutfile(path.display().to_string())).loc("While creating blocks_sequences.fasta")?;
    let mut w = BufWriter::new(file);

    for inst in blocks {
        let chr = &chromosomes[inst.chr_id() as usize];
        let strand = if inst.direction_is_positive() { '+' } else { '-' };
        let (start, end) = (inst.conventional_start(), inst.conventional_end());

        writeln!(w, ">Seq=\"{}\",Strand='{strand}',Block_id={},Start={start},End={end}", chr.description(), inst.block_id())
            .loc("While writing a blocks_sequences.fasta header")?;

        let slice = &chr.sequence()[(start - 1) as usize..end as usize];
        let body = if inst.direction_is_positive() { slice.to_vec() } else { revcomp(slice) };
        for line in body.chunks(WRAP_WIDTH) {
            w.write_all(line).loc("While writing a blocks_sequences.fasta body line")?;
            writeln!(w).loc("While writing a blocks_sequences.fasta body line")?;
        }
    }

    w.flush().loc("While flushing blocks_sequences.fasta")
}
