use glam::IVec3;
use levelgen_kernel::{RandomSequence, World};
use levelgen_search::{SearchError, SectorSearch};
use levelgen_synth::synthesize_all;

use crate::config::GeneratorConfig;

/// Errors from level generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid generator configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Largest accepted `target_spread`.
pub const MAX_TARGET_SPREAD: i32 = 1 << 24;

/// The cell the sector path is grown towards.
///
/// A configured target is used as is. Otherwise X and Y are drawn (in that
/// order) within `target_spread` of `target_center`.
pub fn pick_target(config: &GeneratorConfig, rng: &mut RandomSequence) -> IVec3 {
    if let Some(target) = config.target {
        return target;
    }
    let spread = config.target_spread.clamp(0, MAX_TARGET_SPREAD);
    let span = (2 * spread + 1) as u32;
    let dx = rng.below(span) as i32 - spread;
    let dy = rng.below(span) as i32 - spread;
    config.target_center.saturating_add(IVec3::new(dx, dy, 0))
}

/// Generate a complete level: pick a target, search a sector path to it and
/// synthesize the segments of every sector.
pub fn generate_world(config: &GeneratorConfig) -> Result<World, GenerateError> {
    let _span = tracing::info_span!("generate_world", seed = config.seed).entered();

    if !(0..=MAX_TARGET_SPREAD).contains(&config.target_spread) {
        return Err(GenerateError::InvalidConfig {
            reason: format!("target_spread must be in 0..={MAX_TARGET_SPREAD}"),
        });
    }

    let mut rng = RandomSequence::new(config.seed);
    let target = pick_target(config, &mut rng);
    let root = config.search.root_sector()?;
    let mut search = SectorSearch::new(config.search.clone())?;
    let outcome = search.run(root, target, &[], &mut rng)?;

    let mut sectors = outcome.path;
    synthesize_all(&mut sectors, &mut rng);
    let world = World::new(config.seed, target, sectors);

    tracing::info!(
        ?target,
        sectors = world.sector_count(),
        segments = world.segment_count(),
        pops = outcome.pops,
        nodes = outcome.nodes,
        "level generated"
    );
    Ok(world)
}

/// [`generate_world`] with the default configuration and the given seed.
pub fn generate_world_with_seed(seed: u32) -> Result<World, GenerateError> {
    generate_world(&GeneratorConfig::with_seed(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelgen_kernel::{SectorType, SegmentType};
    use levelgen_search::{SearchConfig, is_goal};
    use levelgen_synth::find_portals;

    fn scenario_config() -> GeneratorConfig {
        GeneratorConfig {
            seed: 0,
            target: Some(IVec3::new(136, 136, 0)),
            ..Default::default()
        }
    }

    #[test]
    fn scenario_reaches_target() {
        let world = generate_world(&scenario_config()).unwrap();
        assert!(world.sector_count() > 2);
        assert_eq!(world.target(), IVec3::new(136, 136, 0));
        let sectors = world.sectors();
        assert_eq!(sectors[0].kind, SectorType::Room);
        for pair in sectors.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
        let last = sectors.last().unwrap();
        assert!(is_goal(&last.bounds, IVec3::new(136, 136, 0), 2));
    }

    #[test]
    fn same_seed_same_world() {
        let a = generate_world_with_seed(21).unwrap();
        let b = generate_world_with_seed(21).unwrap();
        assert_eq!(a.sector_count(), b.sector_count());
        for (sa, sb) in a.sectors().iter().zip(b.sectors()) {
            assert_eq!(sa.segments.len(), sb.segments.len());
        }
        assert_eq!(a.state_hash(), b.state_hash());
        assert_eq!(a, b);
    }

    #[test]
    fn drawn_target_stays_in_spread() {
        for seed in 0..50 {
            let config = GeneratorConfig::with_seed(seed);
            let mut rng = RandomSequence::new(seed);
            let t = pick_target(&config, &mut rng);
            assert!((112..=144).contains(&t.x), "x = {}", t.x);
            assert!((112..=144).contains(&t.y), "y = {}", t.y);
            assert_eq!(t.z, 0);
        }
    }

    #[test]
    fn fixed_target_draws_nothing() {
        let config = scenario_config();
        let mut rng = RandomSequence::new(0);
        assert_eq!(pick_target(&config, &mut rng), IVec3::new(136, 136, 0));
        assert_eq!(rng, RandomSequence::new(0));
    }

    #[test]
    fn sectors_never_overlap() {
        for seed in 0..3 {
            let world = generate_world_with_seed(seed).unwrap();
            let sectors = world.sectors();
            for (i, a) in sectors.iter().enumerate() {
                for b in &sectors[i + 1..] {
                    assert!(!a.bounds.overlaps(&b.bounds), "{} overlaps {}", a.bounds, b.bounds);
                }
            }
        }
    }

    #[test]
    fn segments_stay_in_their_sector() {
        let world = generate_world_with_seed(4).unwrap();
        for sector in world.sectors() {
            assert!(!sector.segments.is_empty());
            for seg in &sector.segments {
                assert!(sector.bounds.contains(seg.pos));
            }
        }
    }

    #[test]
    fn corridors_have_unit_cross_section() {
        let world = generate_world_with_seed(6).unwrap();
        for sector in world.sectors().iter().filter(|s| s.is_corridor()) {
            let e = sector.bounds.extent();
            assert_eq!(e[sector.direction.lateral_axis()], 1);
            assert_eq!(e.z, 1);
            assert!(e[sector.direction.axis()] >= 2);
        }
    }

    #[test]
    fn doorways_are_open_floor() {
        let world = generate_world(&scenario_config()).unwrap();
        let sectors = world.sectors();
        let portals: Vec<_> = find_portals(sectors)
            .into_iter()
            .filter(|p| p.room.abs_diff(p.corridor) == 1)
            .collect();
        // One doorway per link in the chain.
        assert_eq!(portals.len(), sectors.len() - 1);
        for portal in portals {
            let kinds: Vec<SegmentType> = sectors[portal.room]
                .segments
                .iter()
                .filter(|s| s.pos == portal.cell)
                .map(|s| s.kind)
                .collect();
            assert!(kinds.contains(&SegmentType::Floor));
            assert!(!kinds.contains(&SegmentType::Wall));
            assert!(!kinds.contains(&SegmentType::FloorWallJoint));
        }
    }

    #[test]
    fn unreachable_target_is_an_error() {
        let config = GeneratorConfig {
            target: Some(IVec3::new(0, 0, 400)),
            search: SearchConfig {
                max_pops: 200,
                ..SearchConfig::default()
            },
            ..Default::default()
        };
        let err = generate_world(&config).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Search(SearchError::PopLimit { max_pops: 200, .. })
        ));
    }

    #[test]
    fn huge_target_hits_pop_limit() {
        let config = GeneratorConfig {
            target: Some(IVec3::new(2_000_000_000, 0, 0)),
            search: SearchConfig {
                max_pops: 10,
                ..SearchConfig::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            generate_world(&config),
            Err(GenerateError::Search(SearchError::PopLimit { max_pops: 10, .. }))
        ));
    }

    #[test]
    fn drawn_target_saturates_at_grid_edge() {
        let config = GeneratorConfig {
            target_center: IVec3::new(i32::MAX, i32::MIN, 0),
            target_spread: MAX_TARGET_SPREAD,
            ..Default::default()
        };
        let mut rng = RandomSequence::new(8);
        let t = pick_target(&config, &mut rng);
        assert!(t.x > i32::MAX - MAX_TARGET_SPREAD - 1);
        assert!(t.y < i32::MIN + MAX_TARGET_SPREAD + 1);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let negative_spread = GeneratorConfig {
            target_spread: -1,
            ..Default::default()
        };
        assert!(matches!(
            generate_world(&negative_spread),
            Err(GenerateError::InvalidConfig { .. })
        ));

        let huge_spread = GeneratorConfig {
            target_spread: i32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            generate_world(&huge_spread),
            Err(GenerateError::InvalidConfig { .. })
        ));

        let low_root = GeneratorConfig {
            search: SearchConfig {
                root_max: IVec3::new(3, 3, 1),
                ..SearchConfig::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            generate_world(&low_root),
            Err(GenerateError::Search(SearchError::InvalidConfig { .. }))
        ));

        let bad_search = GeneratorConfig {
            search: SearchConfig {
                columns_step: 0,
                ..SearchConfig::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            generate_world(&bad_search),
            Err(GenerateError::Search(SearchError::InvalidConfig { .. }))
        ));
    }
}
