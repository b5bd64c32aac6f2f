use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::IVec3;
use levelgen_generate::{GeneratorConfig, generate_world};
use levelgen_kernel::World;
use levelgen_persist::{LevelStore, export_json, fingerprint};
use levelgen_tools::{WorldInspector, validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "levelgen-cli", about = "CLI tool for level generation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a level and optionally save it
    Generate {
        /// RNG seed
        #[arg(short, long)]
        seed: Option<u32>,
        /// Fixed target cell as X,Y,Z
        #[arg(short, long, value_parser = parse_target)]
        target: Option<IVec3>,
        /// YAML generator configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the level as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Append the level to a level store directory
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Print a level summary, or one sector
    Inspect {
        #[arg(short, long, default_value = "0")]
        seed: u32,
        /// Sector index in chain order
        #[arg(long)]
        sector: Option<usize>,
    },
    /// Check a generated level against its structural invariants
    Validate {
        #[arg(short, long, default_value = "0")]
        seed: u32,
    },
    /// Verify the integrity chain of a level store
    Verify {
        #[arg(long)]
        store: PathBuf,
    },
}

fn parse_target(s: &str) -> Result<IVec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts[..] else {
        return Err(format!("expected X,Y,Z, got {s:?}"));
    };
    let coord = |v: &str| v.parse::<i32>().map_err(|e| format!("{v:?}: {e}"));
    Ok(IVec3::new(coord(x)?, coord(y)?, coord(z)?))
}

fn generate_seed(seed: u32) -> anyhow::Result<World> {
    generate_world(&GeneratorConfig::with_seed(seed))
        .with_context(|| format!("generating level for seed {seed}"))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("levelgen-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", levelgen_common::crate_info());
            println!("kernel: {}", levelgen_kernel::crate_info());
            println!("search: {}", levelgen_search::crate_info());
            println!("synth: {}", levelgen_synth::crate_info());
            println!("generate: {}", levelgen_generate::crate_info());
            println!("tools: {}", levelgen_tools::crate_info());
            println!("persist: {}", levelgen_persist::crate_info());
        }
        Commands::Generate {
            seed,
            target,
            config,
            out,
            store,
        } => {
            let mut gen_config = match &config {
                Some(path) => GeneratorConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => GeneratorConfig::default(),
            };
            if let Some(seed) = seed {
                gen_config.seed = seed;
            }
            if target.is_some() {
                gen_config.target = target;
            }

            let world = generate_world(&gen_config)?;
            println!("{}", WorldInspector::summary(&world));
            println!("state hash: {:#018x}", world.state_hash());

            if let Some(path) = out {
                export_json(&world, &path)
                    .with_context(|| format!("exporting to {}", path.display()))?;
                println!("exported: {} ({})", path.display(), fingerprint(&world)?);
            }
            if let Some(dir) = store {
                let mut level_store = LevelStore::open(&dir)
                    .with_context(|| format!("opening store {}", dir.display()))?;
                let index = level_store.save_level(&world)?;
                println!("stored: level #{index} in {}", dir.display());
            }
        }
        Commands::Inspect { seed, sector } => {
            let world = generate_seed(seed)?;
            match sector {
                Some(index) => {
                    let info = WorldInspector::inspect_sector(&world, index).with_context(|| {
                        format!("sector {index} out of range (level has {})", world.sector_count())
                    })?;
                    println!("{info}");
                }
                None => {
                    println!("{}", WorldInspector::summary(&world));
                    for info in WorldInspector::list_sectors(&world) {
                        println!("  {info}");
                    }
                }
            }
        }
        Commands::Validate { seed } => {
            let world = generate_seed(seed)?;
            let violations = validate(&world);
            if !violations.is_empty() {
                for v in &violations {
                    println!("violation: {v}");
                }
                tracing::error!(seed, count = violations.len(), "level failed validation");
                return Ok(ExitCode::FAILURE);
            }
            println!(
                "seed {seed}: OK ({} sectors, {} segments)",
                world.sector_count(),
                world.segment_count()
            );
        }
        Commands::Verify { store } => {
            let level_store = LevelStore::open(&store)
                .with_context(|| format!("opening store {}", store.display()))?;
            level_store.verify_integrity()?;
            println!(
                "store {}: OK ({} levels)",
                store.display(),
                level_store.meta().level_count
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
