use thiserror::Error;

/// Integrity errors raised while assembling a [`crate::JunctionStorage`] (§4.1 / §7 kind 2).
///
/// These are distinct from the I/O errors of `lcb-io`: by the time a caller reaches
/// [`crate::JunctionStorage::build`], the binary junctions file and FASTA have already been
/// parsed into plain records. This enum covers everything that can still be wrong about the
/// *content* of those records.
#[derive(Error, Debug)]
pub enum JunctionGraphError {
    #[error("junction record references unknown chromosome id {0}")]
    UnknownChromosome(u32),

    #[error("junction records for chromosome {0} are not sorted by position (record {1} at pos {2} precedes record at pos {3})")]
    UnsortedRecords(u32, usize, u64, u64),

    #[error("derived edge length is non-positive ({length}bp) between positions {start_pos} and {end_pos} on chromosome {chr}: check that k={k} is consistent with the junctions file")]
    NonPositiveEdgeLength { chr: u32, start_pos: u64, end_pos: u64, length: i64, k: usize },

    #[error("junction position {0} + k ({1}) overruns chromosome {2} of length {3}")]
    PositionOverrun(u64, usize, u32, usize),

    #[error("k-mer size k={0} must be odd")]
    EvenK(usize),
}
