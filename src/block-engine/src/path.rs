use junction_graph::{DistanceKeeper, Edge, JunctionIterator, JunctionStorage};

use crate::instance::Instance;
use crate::point::Point;

/// One candidate locally-collinear block, grown outward from a single origin vertex by repeated
/// `point_push_front`/`point_push_back` calls (§4.2 "Path").
///
/// A `Path` borrows the [`JunctionStorage`] it walks for its whole lifetime — unlike
/// [`JunctionIterator`], which is storage-reference-free so it can be copied freely, `Path` owns
/// mutable exploration state (`distance_keeper`) that only makes sense against one particular
/// storage, so threading the reference through its constructor is the natural fit here.
pub struct Path<'s> {
    storage: &'s JunctionStorage,
    max_branch_size: i64,
    min_block_size: i64,
    max_flanking_size: i64,
    origin: i64,
    left_body: Vec<Point>,
    right_body: Vec<Point>,
    instance: Vec<Instance>,
    left_body_flank: i64,
    right_body_flank: i64,
    distance_keeper: DistanceKeeper,
    extended_scratch: Vec<bool>,
}

impl<'s> Path<'s> {
    pub fn new(storage: &'s JunctionStorage, max_branch_size: i64, min_block_size: i64, max_flanking_size: i64) -> Self {
        Self {
            storage,
            max_branch_size,
            min_block_size,
            max_flanking_size,
            origin: 0,
            left_body: Vec::new(),
            right_body: Vec::new(),
            instance: Vec::new(),
            left_body_flank: 0,
            right_body_flank: 0,
            distance_keeper: DistanceKeeper::new(),
            extended_scratch: Vec::new(),
        }
    }

    /// Seed the path at vertex `vid`: every not-yet-used occurrence of `vid` becomes a
    /// zero-length instance (§4.2).
    pub fn init(&mut self, vid: i64) {
        self.origin = vid;
        self.distance_keeper.set(vid, 0);
        self.left_body_flank = 0;
        self.right_body_flank = 0;
        self.instance.clear();

        let count = self.storage.instances_count(vid);
        for idx in 0..count {
            if let Some(it) = self.storage.junction_instance(vid, idx) {
                if !it.is_used(self.storage) {
                    self.instance.push(Instance::new(it, 0));
                }
            }
        }
    }

    pub fn is_in_path(&self, vertex: i64) -> bool {
        self.distance_keeper.is_set(vertex)
    }

    pub fn origin(&self) -> i64 {
        self.origin
    }

    pub fn all_instances(&self) -> &[Instance] {
        &self.instance
    }

    pub fn left_body_len(&self) -> usize {
        self.left_body.len()
    }

    pub fn right_body_len(&self) -> usize {
        self.right_body.len()
    }

    pub fn storage(&self) -> &'s JunctionStorage {
        self.storage
    }

    pub fn left_distance(&self) -> i64 {
        -self.left_body_flank
    }

    pub fn right_distance(&self) -> i64 {
        self.right_body_flank
    }

    pub fn middle_path_length(&self) -> i64 {
        self.left_distance() + self.right_distance()
    }

    pub fn end_vertex(&self) -> i64 {
        self.right_body.last().map_or(self.origin, |p| p.edge().end())
    }

    pub fn start_vertex(&self) -> i64 {
        self.left_body.last().map_or(self.origin, |p| p.edge().start())
    }

    pub fn right_size(&self) -> usize {
        self.right_body.len() + 1
    }

    pub fn left_size(&self) -> usize {
        self.left_body.len() + 1
    }

    /// `idx == 0` is the origin; `idx >= 1` walks the right body outward (§4.2).
    pub fn right_vertex(&self, idx: usize) -> i64 {
        if idx == 0 {
            self.origin
        } else {
            self.right_body[idx - 1].edge().end()
        }
    }

    pub fn left_vertex(&self, idx: usize) -> i64 {
        if idx == 0 {
            self.origin
        } else {
            self.left_body[idx - 1].edge().start()
        }
    }

    /// The path's edges in genomic order, left body reversed then right body, matching
    /// `DumpPath` (§4.2 output ordering).
    pub fn dump_path(&self) -> Vec<Edge> {
        let mut ret = Vec::with_capacity(self.left_body.len() + self.right_body.len());
        ret.extend(self.left_body.iter().rev().map(Point::edge));
        ret.extend(self.right_body.iter().rev().map(Point::edge));
        ret
    }

    /// The right body's edges in push order (origin-outward), for [`crate::BestPath`] to snapshot
    /// and later replay.
    pub fn right_body_edges(&self) -> Vec<Edge> {
        self.right_body.iter().map(Point::edge).collect()
    }

    /// The left body's counterpart of [`Self::right_body_edges`].
    pub fn left_body_edges(&self) -> Vec<Edge> {
        self.left_body.iter().map(Point::edge).collect()
    }

    /// Whether extending from `start` to `end` via edge `e` keeps the branch size (genomic
    /// divergence between the instance being extended and the edge's own span) within bound, or
    /// requires an exact character/vertex match otherwise (§4.2 "Compatible").
    pub fn compatible(&self, start: JunctionIterator, end: JunctionIterator, e: &Edge) -> bool {
        if start.is_positive_strand() != end.is_positive_strand() {
            return false;
        }

        let diff = end.position(self.storage) as i64 - start.position(self.storage) as i64;
        let branch = if start.is_positive_strand() { diff } else { -diff };
        if branch < 0 {
            return false;
        }

        if branch > self.max_branch_size {
            let start1 = start.advance();
            let start_char = start.outgoing_char(self.storage);
            let exact = start1.valid(self.storage)
                && start_char == Some(e.ch())
                && start1 == end
                && start1.vertex_id(self.storage) == e.end();
            if !exact {
                return false;
            }
        }

        true
    }

    /// Attempt to extend the path's right body by edge `e`; rolls back and returns `false` if any
    /// instance would overrun `max_flanking_size` once a long-enough block forms (§4.2).
    pub fn point_push_back(&mut self, e: Edge) -> bool {
        let vertex = e.end();
        if self.distance_keeper.is_set(vertex) {
            return false;
        }

        let start_distance = self.right_body_flank;
        let end_distance = start_distance + e.length();
        let fail = self.extend_instances(vertex, end_distance, e, false);

        self.right_body.push(Point::new(e, start_distance));
        self.distance_keeper.set(vertex, end_distance);
        self.right_body_flank = self.right_body.last().unwrap().end_distance();

        if fail {
            self.point_pop_back();
        }
        !fail
    }

    /// The left-body counterpart of [`Self::point_push_back`].
    pub fn point_push_front(&mut self, e: Edge) -> bool {
        let vertex = e.start();
        if self.distance_keeper.is_set(vertex) {
            return false;
        }

        let end_distance = self.left_body_flank;
        let start_distance = end_distance - e.length();
        let fail = self.extend_instances(vertex, start_distance, e, true);

        self.left_body.push(Point::new(e, start_distance));
        self.distance_keeper.set(vertex, start_distance);
        self.left_body_flank = self.left_body.last().unwrap().start_distance();

        if fail {
            self.point_pop_front();
        }
        !fail
    }

    /// Shared body of `PointPushBackWorker`/`PointPushFrontWorker`: for every live instance, walk
    /// its loose end as far as `vertex`'s occurrences allow, then spawn a fresh instance at
    /// `vertex` for every occurrence none of them claimed.
    fn extend_instances(&mut self, vertex: i64, distance: i64, e: Edge, front: bool) -> bool {
        let extension_count = self.storage.instances_count(vertex);
        self.extended_scratch.clear();
        self.extended_scratch.resize(extension_count, false);

        let mut fail = false;
        for inst in &mut self.instance {
            loop {
                let anchor = if front { inst.front() } else { inst.back() };
                let extension = if front {
                    self.storage.instance_extension_backward(anchor, vertex, self.max_branch_size)
                } else {
                    self.storage.instance_extension_forward(anchor, vertex, self.max_branch_size)
                };

                if !extension.valid(self.storage) || extension.is_used(self.storage) {
                    break;
                }
                let ord = self.storage.occurrence_ordinal(extension);
                if self.extended_scratch[ord] {
                    break;
                }

                let compatible = if front { self.compatible(extension, anchor, &e) } else { self.compatible(anchor, extension, &e) };
                if !compatible {
                    break;
                }

                if front {
                    inst.change_front(extension, distance);
                } else {
                    inst.change_back(extension, distance);
                }
                self.extended_scratch[ord] = true;
            }

            let next_length = inst.length(self.storage);
            let left_flank_size = -(self.left_body_flank - inst.left_flank_distance());
            let right_flank_size = self.right_body_flank - inst.right_flank_distance();
            if next_length >= self.min_block_size && (left_flank_size > self.max_flanking_size || right_flank_size > self.max_flanking_size) {
                fail = true;
                break;
            }
        }

        if !fail {
            for idx in 0..extension_count {
                if let Some(it) = self.storage.junction_instance(vertex, idx) {
                    if !it.is_used(self.storage) && !self.extended_scratch[idx] {
                        self.instance.push(Instance::new(it, distance));
                    }
                }
            }
        }

        fail
    }

    /// Final (`final == true`) or in-progress total score across all instances (§4.2 "Score").
    pub fn score(&self, only_good: bool) -> i64 {
        let middle_path = self.middle_path_length();
        self.instance
            .iter()
            .filter_map(|inst| {
                let (length, score) = self.instance_score(inst, middle_path);
                (!only_good || length >= self.min_block_size).then_some(score)
            })
            .sum()
    }

    pub fn good_instances_count(&self) -> usize {
        self.instance.iter().filter(|inst| self.is_good_instance(inst)).count()
    }

    pub fn good_instances(&self) -> Vec<Instance> {
        self.instance.iter().filter(|inst| self.is_good_instance(inst)).copied().collect()
    }

    pub fn is_good_instance(&self, inst: &Instance) -> bool {
        let (length, _) = self.instance_score(inst, self.middle_path_length());
        length >= self.min_block_size
    }

    fn instance_score(&self, inst: &Instance, middle_path: i64) -> (i64, i64) {
        let length = inst.length(self.storage);
        (length, 2 * length - middle_path)
    }

    pub fn point_pop_back(&mut self) {
        let last_vertex = self.right_body.last().expect("pop_back on an empty right body").edge().end();
        self.right_body.pop();
        self.distance_keeper.unset(last_vertex);
        debug_assert!(self.distance_keeper.is_set(self.origin));
        self.right_body_flank = self.right_body.last().map_or(0, Point::end_distance);
        self.rollback_instances(last_vertex, false);
    }

    pub fn point_pop_front(&mut self) {
        let last_vertex = self.left_body.last().expect("pop_front on an empty left body").edge().start();
        self.left_body.pop();
        self.distance_keeper.unset(last_vertex);
        self.left_body_flank = self.left_body.last().map_or(0, Point::start_distance);
        self.rollback_instances(last_vertex, true);
    }

    /// Undo every instance's claim on `last_vertex`: walk its loose end back toward the origin
    /// until it lands on a vertex still in the path, or drop the instance entirely if it never
    /// reaches one (§4.2 `PointPopBack`/`PointPopFront`).
    fn rollback_instances(&mut self, last_vertex: i64, front: bool) {
        let mut drop = Vec::new();
        for (i, inst) in self.instance.iter_mut().enumerate().rev() {
            let loose_end = if front { inst.front() } else { inst.back() };
            if loose_end.vertex_id(self.storage) != last_vertex {
                continue;
            }

            if inst.front() == inst.back() {
                drop.push(i);
                continue;
            }

            let mut cursor = loose_end;
            loop {
                let vid = cursor.vertex_id(self.storage);
                if self.distance_keeper.is_set(vid) {
                    let distance = self.distance_keeper.get(vid).unwrap();
                    if front {
                        inst.change_front(cursor, distance);
                    } else {
                        inst.change_back(cursor, distance);
                    }
                    break;
                }

                let other_end = if front { inst.back() } else { inst.front() };
                if cursor == other_end {
                    drop.push(i);
                    break;
                }

                cursor = if front { cursor.advance() } else { cursor.retreat() };
            }
        }

        for i in drop {
            self.instance.remove(i);
        }
    }

    /// Reset to the empty path so the caller can `init` a fresh origin (§4.2 "Clear").
    pub fn clear(&mut self) {
        for p in &self.left_body {
            self.distance_keeper.unset(p.edge().start());
        }
        for p in &self.right_body {
            self.distance_keeper.unset(p.edge().end());
        }

        self.left_body.clear();
        self.right_body.clear();
        self.distance_keeper.unset(self.origin);
        debug_assert!(self.distance_keeper.is_empty());
        self.instance.clear();
    }
}
