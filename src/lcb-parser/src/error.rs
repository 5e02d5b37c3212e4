use thiserror::Error;

/// Input-validation failures (§7 kind 1): reported to stderr as `error: <message>`, exit code 1,
/// no partial output.
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("-k must be odd (got {0})")]
    EvenK(usize),

    #[error("-b (max branch size) must be positive (got {0})")]
    NonPositiveBranchSize(i64),

    #[error("-m (min block size) must be positive (got {0})")]
    NonPositiveBlockSize(i64),

    #[error("--depth must be positive (got {0})")]
    NonPositiveDepth(u32),

    #[error("-t must be positive (got {0})")]
    NonPositiveThreads(usize),

    #[error("--abundance must be positive (got {0})")]
    NonPositiveAbundance(usize),

    #[error("--infile {0} does not exist")]
    MissingInfile(String),

    #[error("--gfile {0} does not exist")]
    MissingGfile(String),
}
