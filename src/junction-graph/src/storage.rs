use std::sync::atomic::{AtomicBool, Ordering};
use ahash::AHashMap;

use crate::chromosome::Chromosome;
use crate::edge::{Edge, EdgeStorage};
use crate::error::JunctionGraphError;
use crate::junction::JunctionIterator;

/// A single `(chr_id, position, vertex_id)` record as read off the upstream binary junctions
/// stream (§6.1), before any abundance filtering or edge construction has happened.
#[derive(Debug, Clone, Copy)]
pub struct RawJunction {
    pub chr: u32,
    pub position: u64,
    pub vertex_id: i64,
}

#[derive(Debug)]
pub(crate) struct JunctionRecord {
    pub position: u64,
    pub vertex_id: i64,
    pub fwd_char: Option<u8>,
    pub rev_char: Option<u8>,
    used: AtomicBool,
}

impl JunctionRecord {
    fn new(position: u64, vertex_id: i64, fwd_char: Option<u8>, rev_char: Option<u8>) -> Self {
        Self { position, vertex_id, fwd_char, rev_char, used: AtomicBool::new(false) }
    }
}

/// Read-only (except for the per-junction "used" bit) index over the compacted de Bruijn graph
/// plus original letters (§4.1). Constructed once from already-parsed chromosome sequences and
/// junction records — all file-format parsing lives in `lcb-io`, which calls
/// [`JunctionStorage::build`].
pub struct JunctionStorage {
    k: usize,
    abundance_threshold: usize,
    chromosomes: Vec<Chromosome>,
    records: Vec<Vec<JunctionRecord>>,
    occurrences: AHashMap<i64, Vec<(u32, u32)>>,
    ordinal: AHashMap<(u32, u32), usize>,
    edges: EdgeStorage,
    max_abs_vertex_id: i64,
}

impl JunctionStorage {
    /// Assemble a [`JunctionStorage`] from chromosome sequences and (chr,position)-sorted raw
    /// junction records.
    ///
    /// # Errors
    /// Returns [`JunctionGraphError`] on any of the integrity failures of §4.1/§7 kind 2: `k`
    /// even, a record referencing an unknown chromosome, unsorted records, or a derived edge
    /// length that is not strictly positive.
    pub fn build(
        chromosomes: Vec<Chromosome>,
        raw: Vec<RawJunction>,
        k: usize,
        abundance_threshold: usize,
    ) -> Result<Self, JunctionGraphError> {
        if k % 2 == 0 {
            return Err(JunctionGraphError::EvenK(k));
        }

        let mut per_chr: Vec<Vec<RawJunction>> = vec![Vec::new(); chromosomes.len()];
        for (i, rec) in raw.iter().enumerate() {
            let chr = usize::try_from(rec.chr).unwrap_or(usize::MAX);
            let bucket = per_chr.get_mut(chr).ok_or(JunctionGraphError::UnknownChromosome(rec.chr))?;
            if let Some(prev) = bucket.last() {
                if prev.position > rec.position {
                    return Err(JunctionGraphError::UnsortedRecords(rec.chr, i, prev.position, rec.position));
                }
            }
            bucket.push(*rec);
        }

        // Abundance filter: drop every record whose absolute vertex-id occurs more than
        // `abundance_threshold` times across the whole genome set (§4.1 "treated as non-existent
        // (filtered out at load)").
        let mut abundance: AHashMap<i64, usize> = AHashMap::new();
        for rec in &raw {
            *abundance.entry(rec.vertex_id.unsigned_abs() as i64).or_insert(0) += 1;
        }
        let banned: ahash::AHashSet<i64> = abundance
            .into_iter()
            .filter(|&(_, count)| count > abundance_threshold)
            .map(|(vid, _)| vid)
            .collect();

        let mut records: Vec<Vec<JunctionRecord>> = Vec::with_capacity(chromosomes.len());
        let mut max_abs_vertex_id = 0i64;
        for (chr_idx, chr) in chromosomes.iter().enumerate() {
            let mut chr_records = Vec::new();
            for rec in &per_chr[chr_idx] {
                if banned.contains(&rec.vertex_id.unsigned_abs().try_into().unwrap_or(i64::MAX)) {
                    continue;
                }

                let fwd_char = chr.base_at(rec.position + k as u64);
                let rev_char = if rec.position == 0 {
                    None
                } else {
                    chr.base_at(rec.position - 1).map(complement)
                };
                max_abs_vertex_id = max_abs_vertex_id.max(rec.vertex_id.unsigned_abs() as i64);
                chr_records.push(JunctionRecord::new(rec.position, rec.vertex_id, fwd_char, rev_char));
            }
            records.push(chr_records);
        }

        let mut occurrences: AHashMap<i64, Vec<(u32, u32)>> = AHashMap::new();
        let mut ordinal: AHashMap<(u32, u32), usize> = AHashMap::new();
        for (chr_idx, chr_records) in records.iter().enumerate() {
            for (rec_idx, rec) in chr_records.iter().enumerate() {
                let bucket = occurrences.entry(rec.vertex_id.unsigned_abs() as i64).or_default();
                ordinal.insert((chr_idx as u32, rec_idx as u32), bucket.len());
                bucket.push((chr_idx as u32, rec_idx as u32));
            }
        }

        let mut edges = EdgeStorage::new();
        for (chr_idx, chr_records) in records.iter().enumerate() {
            for pair in chr_records.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                let length = next.position as i64 - prev.position as i64;
                if length <= 0 {
                    return Err(JunctionGraphError::NonPositiveEdgeLength {
                        chr: chr_idx as u32,
                        start_pos: prev.position,
                        end_pos: next.position,
                        length,
                        k,
                    });
                }

                let ch = prev.fwd_char.ok_or(JunctionGraphError::PositionOverrun(prev.position, k, chr_idx as u32, chromosomes[chr_idx].len()))?;
                let rev_ch = next.rev_char.unwrap_or(b'N');
                edges.add_edge(Edge::new(prev.vertex_id, next.vertex_id, ch, rev_ch, length));
            }
        }

        Ok(Self { k, abundance_threshold, chromosomes, records, occurrences, ordinal, edges, max_abs_vertex_id })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn abundance_threshold(&self) -> usize {
        self.abundance_threshold
    }

    pub fn chr_number(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn chromosome(&self, chr: u32) -> &Chromosome {
        &self.chromosomes[chr as usize]
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn chr_junction_count(&self, chr: u32) -> usize {
        self.records.get(chr as usize).map_or(0, Vec::len)
    }

    /// Greatest absolute vertex-id observed after abundance filtering; vertex ids range over
    /// `[-max_abs_vertex_id, max_abs_vertex_id]`.
    pub fn max_abs_vertex_id(&self) -> i64 {
        self.max_abs_vertex_id
    }

    pub(crate) fn record(&self, chr: u32, index: i64) -> &JunctionRecord {
        &self.records[chr as usize][index as usize]
    }

    pub fn is_used(&self, chr: u32, index: i64) -> bool {
        self.records[chr as usize][index as usize].used.load(Ordering::Acquire)
    }

    pub fn set_used(&self, chr: u32, index: i64) {
        self.records[chr as usize][index as usize].used.store(true, Ordering::Release);
    }

    pub fn begin(&self, chr: u32) -> JunctionIterator {
        JunctionIterator::new(chr, 0, true)
    }

    pub fn end(&self, chr: u32) -> JunctionIterator {
        JunctionIterator::new(chr, self.chr_junction_count(chr) as i64, true)
    }

    /// Number of occurrences (forward + mirrored-reverse) of the absolute vertex `v` (§4.1).
    pub fn instances_count(&self, v: i64) -> usize {
        self.occurrences.get(&v.unsigned_abs().try_into().unwrap_or(i64::MAX)).map_or(0, Vec::len)
    }

    /// The `idx`-th occurrence of signed vertex `v`, oriented so that
    /// `junction_instance(v, idx).vertex_id(self) == v`.
    pub fn junction_instance(&self, v: i64, idx: usize) -> Option<JunctionIterator> {
        let abs_v: i64 = v.unsigned_abs().try_into().unwrap_or(i64::MAX);
        let (chr, ordinal) = *self.occurrences.get(&abs_v)?.get(idx)?;
        let record = self.record(chr, ordinal as i64);
        let positive = record.vertex_id == v;
        Some(JunctionIterator::new(chr, ordinal as i64, positive))
    }

    /// The junction further back (toward smaller coordinates on the instance's strand) from `it`
    /// that carries vertex-id `vertex`, skipping over intermediate junctions that belong to this
    /// instance's own private divergence (a bubble/indel not shared by the path) as long as the
    /// genomic gap to reach it stays within `max_branch_size` — the lookahead `PointPushFront`
    /// needs to decide whether an instance can be extended left (§4.4 `PointPushBack` step 2).
    pub fn instance_extension_backward(&self, it: JunctionIterator, vertex: i64, max_branch_size: i64) -> JunctionIterator {
        let origin = it.position(self) as i64;
        let mut candidate = it.retreat();
        loop {
            if !candidate.valid(self) {
                return JunctionIterator::invalid();
            }
            if (candidate.position(self) as i64 - origin).abs() > max_branch_size {
                return JunctionIterator::invalid();
            }
            if candidate.vertex_id(self) == vertex {
                return candidate;
            }
            candidate = candidate.retreat();
        }
    }

    /// The forward-extension counterpart of [`Self::instance_extension_backward`], used by
    /// `PointPushBack`.
    pub fn instance_extension_forward(&self, it: JunctionIterator, vertex: i64, max_branch_size: i64) -> JunctionIterator {
        let origin = it.position(self) as i64;
        let mut candidate = it.advance();
        loop {
            if !candidate.valid(self) {
                return JunctionIterator::invalid();
            }
            if (candidate.position(self) as i64 - origin).abs() > max_branch_size {
                return JunctionIterator::invalid();
            }
            if candidate.vertex_id(self) == vertex {
                return candidate;
            }
            candidate = candidate.advance();
        }
    }

    /// This junction's position within its vertex's occurrence list, the O(1) counterpart of the
    /// original implementation's `JunctionIterator::GetItIndex` — used by `block-engine` to mark
    /// an occurrence "claimed this round" without re-scanning the whole occurrence list.
    pub fn occurrence_ordinal(&self, it: JunctionIterator) -> usize {
        self.ordinal[&(it.chr_id(), it.index() as u32)]
    }

    pub fn outgoing_edges_number(&self, v: i64) -> usize {
        self.edges.outgoing_edges_number(v)
    }

    pub fn ingoing_edges_number(&self, v: i64) -> usize {
        self.edges.ingoing_edges_number(v)
    }

    pub fn outgoing_edge(&self, v: i64, idx: usize) -> Option<Edge> {
        self.edges.outgoing_edge(v, idx)
    }

    pub fn ingoing_edge(&self, v: i64, idx: usize) -> Option<Edge> {
        self.edges.ingoing_edge(v, idx)
    }

    pub fn outgoing_edges(&self, v: i64) -> impl Iterator<Item = Edge> + '_ {
        self.edges.outgoing_edges(v)
    }

    pub fn ingoing_edges(&self, v: i64) -> impl Iterator<Item = Edge> + '_ {
        self.edges.ingoing_edges(v)
    }
}

/// Complement of a single IUPAC nucleotide character, falling back to `N` for anything else —
/// matches the original implementation's `TwoPaCo::DnaChar::ReverseChar`.
pub fn complement(base: u8) -> u8 {
    bio::alphabets::dna::complement(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chr(id: u32, seq: &str) -> Chromosome {
        Chromosome::new(id, format!("chr{id}"), seq.as_bytes().to_vec())
    }

    #[test]
    fn rejects_even_k() {
        let err = JunctionStorage::build(vec![chr(0, "ACGT")], vec![], 4, 150);
        assert!(matches!(err, Err(JunctionGraphError::EvenK(4))));
    }

    #[test]
    fn builds_edges_between_adjacent_junctions() {
        // k=3, single chromosome "AAAACCCCTTTT" (len 12) with junctions at 0 and 4.
        let storage = JunctionStorage::build(
            vec![chr(0, "AAAACCCCTTTT")],
            vec![
                RawJunction { chr: 0, position: 0, vertex_id: 1 },
                RawJunction { chr: 0, position: 4, vertex_id: 2 },
            ],
            3,
            150,
        ).unwrap();

        assert_eq!(storage.chr_junction_count(0), 2);
        assert_eq!(storage.outgoing_edges_number(1), 1);
        let e = storage.outgoing_edge(1, 0).unwrap();
        assert_eq!(e.end(), 2);
        assert_eq!(e.length(), 4);
        assert_eq!(e.ch(), b'A'); // base at pos 0+k=3, still inside the leading "AAAA" run
    }

    #[test]
    fn abundance_filter_drops_overabundant_vertex() {
        let raw: Vec<RawJunction> = (0..5).map(|i| RawJunction { chr: 0, position: i * 10, vertex_id: 1 }).collect();
        let storage = JunctionStorage::build(vec![chr(0, &"A".repeat(100))], raw, 3, 3).unwrap();
        assert_eq!(storage.instances_count(1), 0);
    }

    /// Vertex `99` between `1` and `3` is a private divergence (a bubble only this instance
    /// takes) — `instance_extension_forward` must skip over it and resync onto `3` as long as the
    /// genomic gap stays within `max_branch_size`, then refuse once the budget is too small.
    #[test]
    fn instance_extension_forward_skips_an_intermediate_private_junction() {
        let storage = JunctionStorage::build(
            vec![chr(0, "AAAACCCCGGGGTTTT")],
            vec![
                RawJunction { chr: 0, position: 0, vertex_id: 1 },
                RawJunction { chr: 0, position: 4, vertex_id: 99 },
                RawJunction { chr: 0, position: 8, vertex_id: 3 },
            ],
            3,
            150,
        )
        .unwrap();

        let it = storage.junction_instance(1, 0).unwrap();
        let found = storage.instance_extension_forward(it, 3, 10);
        assert!(found.valid(&storage));
        assert_eq!(found.vertex_id(&storage), 3);

        let too_tight = storage.instance_extension_forward(it, 3, 2);
        assert!(!too_tight.valid(&storage));
    }
}
