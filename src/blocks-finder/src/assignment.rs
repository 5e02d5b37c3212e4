use block_engine::{Instance, Path};
use junction_graph::{Forbidden, JunctionStorage};
use parking_lot::Mutex;

use crate::block_instance::BlockInstance;

/// Which committed block (and which of its instances) a junction belongs to, or neither (§4.2
/// "Assignment").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub block: i32,
    pub instance: i32,
}

struct Inner {
    next_block_id: i32,
    assignment: Vec<Vec<Option<Assignment>>>,
}

/// The single critical section of §5: block-id allocation, junction marking, and the caller's
/// `Forbidden` insertion all happen while holding this table's lock, so no two workers can ever
/// commit overlapping junctions.
pub struct BlockAssignmentTable {
    inner: Mutex<Inner>,
}

impl BlockAssignmentTable {
    pub fn new(storage: &JunctionStorage) -> Self {
        let assignment = (0..storage.chr_number()).map(|chr| vec![None; storage.chr_junction_count(chr as u32)]).collect();
        Self { inner: Mutex::new(Inner { next_block_id: 1, assignment }) }
    }

    pub fn assignment_at(&self, chr: u32, index: i64) -> Option<Assignment> {
        self.inner.lock().assignment[chr as usize][index as usize]
    }

    /// Finalize a winning path: allocate a block id, mark every good instance's junctions used
    /// and assigned, add the path's edges to `forbidden`, and hand back the committed
    /// [`BlockInstance`]s for the output writers (§4.6 "Finalize").
    ///
    /// Rechecks every junction's "used" bit before claiming it, under this table's lock: another
    /// worker may have committed an overlapping block between this worker's DFS and its call
    /// here. On conflict the whole block is discarded silently and nothing is mutated (§5, §7
    /// kind 5 "Commit conflict").
    pub fn commit(&self, storage: &JunctionStorage, path: &Path<'_>, good: &[Instance], forbidden: &Forbidden) -> Option<Vec<BlockInstance>> {
        let mut inner = self.inner.lock();

        for inst in good {
            let (lo, hi) = (inst.front().index().min(inst.back().index()), inst.front().index().max(inst.back().index()));
            let chr = inst.front().chr_id();
            for idx in lo..=hi {
                if storage.is_used(chr, idx) {
                    return None;
                }
            }
        }

        let block_id = inner.next_block_id;
        inner.next_block_id += 1;

        let mut committed = Vec::with_capacity(good.len());
        for (ordinal, inst) in good.iter().enumerate() {
            let (lo, hi) = (inst.front().index().min(inst.back().index()), inst.front().index().max(inst.back().index()));
            let chr = inst.front().chr_id();
            for idx in lo..=hi {
                inner.assignment[chr as usize][idx as usize] = Some(Assignment { block: block_id, instance: ordinal as i32 });
                storage.set_used(chr, idx);
            }

            let signed_id = if inst.front().is_positive_strand() { block_id } else { -block_id };
            committed.push(BlockInstance::new(signed_id, chr, inst.front().position(storage), inst.back().position(storage)));
        }

        for edge in path.dump_path() {
            forbidden.add(&edge);
        }

        Some(committed)
    }

    pub fn into_assignment_grid(self) -> Vec<Vec<Option<Assignment>>> {
        self.inner.into_inner().assignment
    }
}
