//! Level kernel: the generated world model and its deterministic random source.
//!
//! # Invariants
//! - Identical seeds produce identical random sequences on every platform.
//! - A `World` is built once per generation and handed out by value.

pub mod random;
pub mod world;

pub use random::RandomSequence;
pub use world::{Sector, SectorType, Segment, SegmentType, World};

pub fn crate_info() -> &'static str {
    "levelgen-kernel v0.1.0"
}
