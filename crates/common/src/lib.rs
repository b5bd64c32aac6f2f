//! Shared grid types used by every stage of level generation.
//!
//! # Invariants
//! - All placement and collision math is integer; one unit is one tile.
//! - Boxes are half-open `[min, max)` and never empty.

mod types;

pub use types::{Direction, GridBox};

pub fn crate_info() -> &'static str {
    "levelgen-common v0.1.0"
}
