use junction_graph::Edge;

/// One edge of the path's left or right body, tagged with the distance its start (left body) or
/// end (right body) sits at from the origin (§3 "Point").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    edge: Edge,
    start_distance: i64,
}

impl Point {
    pub fn new(edge: Edge, start_distance: i64) -> Self {
        Self { edge, start_distance }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn start_distance(&self) -> i64 {
        self.start_distance
    }

    pub fn end_distance(&self) -> i64 {
        self.start_distance + self.edge.length()
    }
}
