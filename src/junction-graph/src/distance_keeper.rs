use ahash::AHashMap;

/// Sparse map `vertex-id -> signed distance along the current path` (§4.2).
///
/// Backed by a hash map rather than a dense `2*|V|` array: path lengths explored by the DFS are
/// small relative to the vertex universe, so [`DistanceKeeper::clear`] staying proportional to
/// the number of set entries (not the universe size) matters far more than O(1) vs hashed
/// lookup overhead — the design note in §9 leaves this choice open and this is the one taken
/// here.
#[derive(Debug, Default)]
pub struct DistanceKeeper {
    distance: AHashMap<i64, i64>,
}

impl DistanceKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, vertex: i64, distance: i64) {
        self.distance.insert(vertex, distance);
    }

    /// No-op if `vertex` was not set, matching §4.2's contract.
    pub fn unset(&mut self, vertex: i64) {
        self.distance.remove(&vertex);
    }

    pub fn is_set(&self, vertex: i64) -> bool {
        self.distance.contains_key(&vertex)
    }

    pub fn get(&self, vertex: i64) -> Option<i64> {
        self.distance.get(&vertex).copied()
    }

    /// Undoes exactly the entries set since construction / the last call (§4.2, §8 invariant 4).
    pub fn clear(&mut self) {
        self.distance.clear();
    }

    pub fn len(&self) -> usize {
        self.distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_unset_roundtrip() {
        let mut dk = DistanceKeeper::new();
        assert!(!dk.is_set(5));
        dk.set(5, 42);
        assert!(dk.is_set(5));
        assert_eq!(dk.get(5), Some(42));
        dk.set(5, 7);
        assert_eq!(dk.get(5), Some(7));
        dk.unset(5);
        assert!(!dk.is_set(5));
        // Unset on an already-unset vertex is a no-op, not an error.
        dk.unset(5);
        assert!(!dk.is_set(5));
    }

    #[test]
    fn clear_empties_exactly_what_was_set() {
        let mut dk = DistanceKeeper::new();
        for v in 0..10 {
            dk.set(v, v * 2);
        }
        assert_eq!(dk.len(), 10);
        dk.clear();
        assert!(dk.is_empty());
        for v in 0..10 {
            assert!(!dk.is_set(v));
        }
    }
}
