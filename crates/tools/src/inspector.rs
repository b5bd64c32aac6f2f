use std::collections::BTreeMap;

use levelgen_common::{Direction, GridBox};
use levelgen_kernel::{SectorType, SegmentType, World};
use levelgen_synth::find_portals;

/// Level inspector for developer tooling.
///
/// Read-only queries against a generated world for debugging and the CLI.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the level.
    pub fn summary(world: &World) -> WorldSummary {
        let sectors = world.sectors();
        let count_kind = |kind| sectors.iter().filter(|s| s.kind == kind).count();

        let mut segments_by_kind = BTreeMap::new();
        for seg in sectors.iter().flat_map(|s| &s.segments) {
            *segments_by_kind.entry(seg.kind).or_insert(0) += 1;
        }

        let extent = sectors.iter().map(|s| s.bounds).reduce(|a, b| GridBox {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        });

        WorldSummary {
            seed: world.seed(),
            target: world.target().to_array(),
            sector_count: sectors.len(),
            rooms: count_kind(SectorType::Room),
            corridors: count_kind(SectorType::Corridor),
            shafts: count_kind(SectorType::Shaft),
            segment_count: world.segment_count(),
            segments_by_kind,
            portals: find_portals(sectors).len(),
            extent,
        }
    }

    /// Details of one sector, by chain index.
    pub fn inspect_sector(world: &World, index: usize) -> Option<SectorInfo> {
        let sector = world.sectors().get(index)?;
        let portals = find_portals(world.sectors())
            .iter()
            .filter(|p| p.room == index || p.corridor == index)
            .count();
        Some(SectorInfo {
            index,
            kind: sector.kind,
            direction: sector.direction,
            bounds: sector.bounds,
            segment_count: sector.segments.len(),
            portals,
        })
    }

    /// Details of every sector, root first.
    pub fn list_sectors(world: &World) -> Vec<SectorInfo> {
        (0..world.sector_count())
            .filter_map(|i| Self::inspect_sector(world, i))
            .collect()
    }
}

/// Summary of a generated level.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub seed: u32,
    pub target: [i32; 3],
    pub sector_count: usize,
    pub rooms: usize,
    pub corridors: usize,
    pub shafts: usize,
    pub segment_count: usize,
    pub segments_by_kind: BTreeMap<SegmentType, usize>,
    pub portals: usize,
    /// Box enclosing every sector; `None` for an empty level.
    pub extent: Option<GridBox>,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Level: seed={} target=({}, {}, {}) sectors={} (rooms={} corridors={} shafts={}) segments={} portals={}",
            self.seed,
            self.target[0],
            self.target[1],
            self.target[2],
            self.sector_count,
            self.rooms,
            self.corridors,
            self.shafts,
            self.segment_count,
            self.portals,
        )?;
        if let Some(extent) = self.extent {
            write!(f, " extent={extent}")?;
        }
        Ok(())
    }
}

/// Detailed info about a single sector.
#[derive(Debug, Clone)]
pub struct SectorInfo {
    pub index: usize,
    pub kind: SectorType,
    pub direction: Direction,
    pub bounds: GridBox,
    pub segment_count: usize,
    pub portals: usize,
}

impl std::fmt::Display for SectorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sector #{:<3} {:<8} {:<6} {} segments={} portals={}",
            self.index,
            format!("{:?}", self.kind),
            format!("{:?}", self.direction),
            self.bounds,
            self.segment_count,
            self.portals,
        )
    }
}
