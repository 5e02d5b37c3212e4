pub mod fasta;
pub mod junctions;

pub use fasta::read_chromosomes;
pub use junctions::read_junctions;
