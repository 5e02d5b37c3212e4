//! Orchestration layer: enumerates seed vertices, drives [`block_engine::Path`] through the
//! bounded-depth DFS of the two search passes, and commits winning paths into a
//! [`BlockAssignmentTable`], marking their junctions used and their edges forbidden.

pub mod assignment;
pub mod block_instance;
pub mod finder;

pub use assignment::{Assignment, BlockAssignmentTable};
pub use block_instance::BlockInstance;
pub use finder::{BlocksFinder, Config};
