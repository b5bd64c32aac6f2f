//! Sector search: grows a chain of rooms and corridors from a root room
//! towards a target cell.
//!
//! # Invariants
//! - A candidate is only accepted if it overlaps neither committed geometry
//!   nor any sector on its own ancestor chain.
//! - The search is bounded by `SearchConfig::max_pops`.
//! - Random draws happen in a fixed order, so a seed fully determines the path.

mod config;
mod frontier;
mod search;
mod successors;

pub use config::{SearchConfig, Span};
pub use frontier::Frontier;
pub use search::{SearchError, SearchOutcome, SectorSearch, is_goal};
pub use successors::{door_offsets, successors};

pub fn crate_info() -> &'static str {
    "levelgen-search v0.1.0"
}
