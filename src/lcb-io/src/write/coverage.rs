use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use blocks_finder::BlockInstance;
use junction_graph::Chromosome;
use located_error::prelude::*;

use crate::error::IoError;

/// Length thresholds the coverage report buckets blocks into (§6.3 "for each configured
/// threshold"). The spec's CLI surface (§6.2) never exposes this list as a flag, so it is fixed
/// here at the same log-scale ladder the original Sibelia report uses.
pub const COVERAGE_THRESHOLDS: &[u64] = &[100, 500, 1_000, 5_000, 15_000, 50_000, 100_000];

/// Write `coverage_report.txt`: a row per chromosome, a column per threshold in
/// [`COVERAGE_THRESHOLDS`], each cell the fraction of that chromosome's bases covered by blocks
/// whose (single-instance) length is at least that threshold (§6.3).
///
/// # Errors
/// Returns [`IoError::CreateOutfile`] if the file cannot be created.
pub fn write_coverage_report(outdir: impl AsRef<Path>, chromosomes: &[Chromosome], blocks: &[BlockInstance]) -> Result<()> {
    let path = outdir.as_ref().join("coverage_report.txt");
    let file = File::create(&path).map_err(|_| IoError::CreateOutfile(path.display().to_string())).loc("While creating coverage_report.txt")?;
    let mut w = BufWriter::new(file);

    write!(w, "chromosome\tlength").loc("While writing coverage_report.txt header")?;
    for threshold in COVERAGE_THRESHOLDS {
        write!(w, "\t>={threshold}bp").loc("While writing coverage_report.txt header")?;
    }
    writeln!(w).loc("While writing coverage_report.txt header")?;

    for chr in chromosomes {
        write!(w, "{}\t{}", chr.description(), chr.len()).loc("While writing a coverage_report.txt row")?;
        for &threshold in COVERAGE_THRESHOLDS {
            let intervals: Vec<(u64, u64)> =
                blocks.iter().filter(|b| b.chr_id() == chr.id() && b.length() >= threshold).map(|b| (b.conventional_start(), b.conventional_end())).collect();
            let covered = covered_bases(intervals);
            let fraction = if chr.is_empty() { 0.0 } else { covered as f64 / chr.len() as f64 };
            write!(w, "\t{fraction:.6}").loc("While writing a coverage_report.txt row")?;
        }
        writeln!(w).loc("While writing a coverage_report.txt row")?;
    }

    w.flush().loc("While flushing coverage_report.txt")
}

/// Total bases spanned by the union of `intervals` (inclusive `(start, end)` pairs): sort by
/// start, then merge runs that overlap or touch so overlapping/adjacent block instances are not
/// double-counted.
fn covered_bases(mut intervals: Vec<(u64, u64)>) -> u64 {
    if intervals.is_empty() {
        return 0;
    }
    intervals.sort_unstable();

    let mut total = 0u64;
    let (mut cur_start, mut cur_end) = intervals[0];
    for &(start, end) in &intervals[1..] {
        if start <= cur_end + 1 {
            cur_end = cur_end.max(end);
        } else {
            total += cur_end - cur_start + 1;
            cur_start = start;
            cur_end = end;
        }
    }
    total += cur_end - cur_start + 1;
    total
}

#[cfg(test)]
mod tests {
    use super::covered_bases;

    #[test]
    fn overlapping_intervals_are_not_double_counted() {
        // [1,10] and [5,15] overlap; union is [1,15], 15 bases, not 10+11=21.
        assert_eq!(covered_bases(vec![(1, 10), (5, 15)]), 15);
    }

    #[test]
    fn adjacent_intervals_merge() {
        assert_eq!(covered_bases(vec![(1, 5), (6, 10)]), 10);
    }

    #[test]
    fn disjoint_intervals_sum_independently() {
        assert_eq!(covered_bases(vec![(1, 5), (20, 25)]), 5 + 6);
    }

    #[test]
    fn empty_input_covers_nothing() {
        assert_eq!(covered_bases(vec![]), 0);
    }
}
