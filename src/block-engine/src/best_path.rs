use junction_graph::Edge;

use crate::path::Path;

/// Remembers the best-scoring body reached so far during a DFS extension, as the actual edge
/// sequence rather than just a length: the bounded-depth DFS step pops back to its starting state
/// on every return (§4.6 "on return, pop"), so by the time the caller is ready to commit, the
/// path itself has already unwound past the best state and there is nothing left to trim down
/// to — `FixForward`/`FixBackward` must replay the recorded edges back onto the path (§4.6
/// "commit the best prefix"), not merely pop.
///
/// Callers must seed a fresh `BestPath` with the path's own current state (`update_forward`/
/// `update_backward` called before any DFS push) so that a round that finds nothing better than
/// what is already there restores exactly that, instead of collapsing to empty.
#[derive(Debug, Clone)]
pub struct BestPath {
    score: i64,
    left_edges: Vec<Edge>,
    right_edges: Vec<Edge>,
}

impl Default for BestPath {
    fn default() -> Self {
        Self::new()
    }
}

impl BestPath {
    pub fn new() -> Self {
        Self { score: 0, left_edges: Vec::new(), right_edges: Vec::new() }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Record `path`'s current right body as the best-known forward extension.
    pub fn update_forward(&mut self, path: &Path<'_>, score: i64) {
        self.score = score;
        self.right_edges = path.right_body_edges();
    }

    /// Record `path`'s current left body as the best-known backward extension.
    pub fn update_backward(&mut self, path: &Path<'_>, score: i64) {
        self.score = score;
        self.left_edges = path.left_body_edges();
    }

    /// Pop `path`'s right body down to empty, then replay the edges recorded by the last
    /// `update_forward` — a no-op if that snapshot was the pre-DFS baseline.
    pub fn fix_forward(&self, path: &mut Path<'_>) {
        while path.right_body_len() > 0 {
            path.point_pop_back();
        }
        for &edge in &self.right_edges {
            path.point_push_back(edge);
        }
    }

    /// Pop `path`'s left body down to empty, then replay the edges recorded by the last
    /// `update_backward` — a no-op if that snapshot was the pre-DFS baseline.
    pub fn fix_backward(&self, path: &mut Path<'_>) {
        while path.left_body_len() > 0 {
            path.point_pop_front();
        }
        for &edge in &self.left_edges {
            path.point_push_front(edge);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use junction_graph::{Chromosome, JunctionStorage, RawJunction};

    fn storage() -> JunctionStorage {
        let seq = "AAAACCCCGGGGTTTT";
        JunctionStorage::build(
            vec![Chromosome::new(0, "chr0".into(), seq.as_bytes().to_vec())],
            vec![
                RawJunction { chr: 0, position: 0, vertex_id: 1 },
                RawJunction { chr: 0, position: 4, vertex_id: 2 },
                RawJunction { chr: 0, position: 8, vertex_id: 3 },
            ],
            3,
            150,
        )
        .unwrap()
    }

    #[test]
    fn fix_forward_drops_extension_past_the_remembered_length() {
        let storage = storage();
        let mut path = Path::new(&storage, 0, 1, 100);
        path.init(1);

        let mut best = BestPath::new();
        best.update_forward(&path, path.score(false));

        let e1 = storage.outgoing_edge(1, 0).unwrap();
        assert!(path.point_push_back(e1));
        let e2 = storage.outgoing_edge(2, 0).unwrap();
        assert!(path.point_push_back(e2));
        assert_eq!(path.right_body_len(), 2);

        best.fix_forward(&mut path);
        assert_eq!(path.right_body_len(), 0);
    }

    /// Mirrors how `blocks-finder` actually drives this: the DFS pushes, records an improving
    /// state, then unwinds all the way back down ("on return, pop") before `fix_forward` is
    /// called. `fix_forward` must restore the recorded depth, not merely trim down to whatever
    /// the (already-unwound) path currently sits at.
    #[test]
    fn fix_forward_restores_the_best_depth_after_a_full_dfs_unwind() {
        let storage = storage();
        let mut path = Path::new(&storage, 0, 1, 100);
        path.init(1);

        let mut best = BestPath::new();
        best.update_forward(&path, path.score(false));

        let e1 = storage.outgoing_edge(1, 0).unwrap();
        assert!(path.point_push_back(e1));
        best.update_forward(&path, best.score() + 1);

        let e2 = storage.outgoing_edge(2, 0).unwrap();
        assert!(path.point_push_back(e2));
        best.update_forward(&path, best.score() + 1);

        // "on return, pop": undo every push made during this DFS call before committing.
        path.point_pop_back();
        path.point_pop_back();
        assert_eq!(path.right_body_len(), 0);

        best.fix_forward(&mut path);
        assert_eq!(path.right_body_len(), 2);
    }
}
