pub mod coords;
pub mod coverage;
pub mod sequences;

pub use coords::write_blocks_coords;
pub use coverage::write_coverage_report;
pub use sequences::write_blocks_sequences;
