use thiserror::Error;

/// I/O-level failures reading the junctions stream, the companion FASTA, or writing the output
/// files (§7 kind 2 for the input side, plain I/O for the output side — both surface as
/// `error: <message>` on stderr with exit code 1, §6.2).
#[derive(Error, Debug)]
pub enum IoError {
    #[error("failed to open junctions file {0}")]
    OpenInfile(String),

    #[error("junctions file {path} is truncated: record {index} starts at byte offset {offset} but only {remaining} bytes remain (need 20)")]
    TruncatedRecord { path: String, index: usize, offset: u64, remaining: u64 },

    #[error("failed to open FASTA file {0}")]
    OpenGfile(String),

    #[error("failed to parse FASTA record {0} in {1}")]
    InvalidFastaRecord(usize, String),

    #[error("failed to create output directory {0}")]
    CreateOutdir(String),

    #[error("failed to create output file {0}")]
    CreateOutfile(String),
}
