//! Read-only index over a compacted de Bruijn graph of k-mer junctions: the shared vocabulary
//! ([`JunctionStorage`], [`JunctionIterator`], [`Edge`], [`Forbidden`], [`DistanceKeeper`]) that
//! `block-engine` walks and `blocks-finder` orchestrates.

pub mod chromosome;
pub mod distance_keeper;
pub mod edge;
pub mod error;
pub mod junction;
pub mod storage;

pub use chromosome::Chromosome;
pub use distance_keeper::DistanceKeeper;
pub use edge::{Edge, EdgeStorage, Forbidden};
pub use error::JunctionGraphError;
pub use junction::JunctionIterator;
pub use storage::{JunctionStorage, RawJunction};
