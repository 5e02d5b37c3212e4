use std::path::Path;

use bio::io::fasta;
use junction_graph::Chromosome;
use located_error::prelude::*;

use crate::error::IoError;

/// Read the companion FASTA of §6.1: one [`Chromosome`] per record, 0-indexed in file order,
/// descriptions preserved verbatim.
///
/// # Errors
/// Returns [`IoError::OpenGfile`] if the file cannot be opened, or
/// [`IoError::InvalidFastaRecord`] if a record fails to parse.
pub fn read_chromosomes(path: impl AsRef<Path>) -> Result<Vec<Chromosome>> {
    let path = path.as_ref();
    let reader = fasta::Reader::from_file(path)
        .map_err(|_| IoError::OpenGfile(path.display().to_string()))
        .loc("While opening the companion FASTA")?;

    let mut chromosomes = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|_| IoError::InvalidFastaRecord(idx, path.display().to_string()))
            .loc("While parsing a FASTA record")?;

        let description = match record.desc() {
            Some(desc) => format!("{} {desc}", record.id()),
            None => record.id().to_string(),
        };
        chromosomes.push(Chromosome::new(idx as u32, description, record.seq().to_ascii_uppercase()));
    }

    Ok(chromosomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_records_in_file_order_with_descriptions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">chr0 first chromosome\nACGTacgt\n>chr1\nTTTT").unwrap();

        let chromosomes = read_chromosomes(file.path()).unwrap();
        assert_eq!(chromosomes.len(), 2);
        assert_eq!(chromosomes[0].id(), 0);
        assert_eq!(chromosomes[0].description(), "chr0 first chromosome");
        assert_eq!(chromosomes[0].sequence(), b"ACGTACGT");
        assert_eq!(chromosomes[1].description(), "chr1");
    }
}
