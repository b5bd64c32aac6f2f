//! Developer tooling: level inspector and invariant validator.
//!
//! # Invariants
//! - Tools only read a `World`; they never modify it.

mod inspector;
mod validate;

pub use inspector::{SectorInfo, WorldInspector, WorldSummary};
pub use validate::{Violation, validate};

pub fn crate_info() -> &'static str {
    "levelgen-tools v0.1.0"
}
