//! Level generation: the single entry point the host calls at level load.
//!
//! # Invariants
//! - Generation is synchronous and touches no shared state.
//! - A seed and a configuration fully determine the returned `World`.
//! - Failure to reach the target is reported, never returned as an empty world.

mod config;
mod generate;

pub use config::{ConfigError, GeneratorConfig};
pub use generate::{
    GenerateError, MAX_TARGET_SPREAD, generate_world, generate_world_with_seed, pick_target,
};

pub fn crate_info() -> &'static str {
    "levelgen-generate v0.1.0"
}
