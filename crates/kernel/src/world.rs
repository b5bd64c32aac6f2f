use glam::IVec3;
use levelgen_common::{Direction, GridBox};
use serde::{Deserialize, Serialize};

/// Default room ceiling clearance, in tiles below the room's top face.
pub const DEFAULT_CEILING_HEIGHT: i32 = 2;
/// Default spacing of the room column grid.
pub const DEFAULT_COLUMNS_STEP: i32 = 3;

/// Structural kind of a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorType {
    Room,
    Corridor,
    Shaft,
}

/// Kind of a renderable tile. The renderer maps each kind to a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SegmentType {
    Floor,
    Wall,
    FloorWallJoint,
    /// Corner joint between the floor and two walls.
    FloorWallWallJoint,
    Corridor,
    Shaft,
    CeilingArch3,
    Column3,
    Column3Lights,
}

impl SegmentType {
    pub const ALL: [SegmentType; 9] = [
        SegmentType::Floor,
        SegmentType::Wall,
        SegmentType::FloorWallJoint,
        SegmentType::FloorWallWallJoint,
        SegmentType::Corridor,
        SegmentType::Shaft,
        SegmentType::CeilingArch3,
        SegmentType::Column3,
        SegmentType::Column3Lights,
    ];
}

/// One unit-cell tile of a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub pos: IVec3,
    pub kind: SegmentType,
    /// Quarter turns, 0..=3.
    pub angle: u8,
}

impl Segment {
    pub fn new(pos: IVec3, kind: SegmentType, angle: u8) -> Self {
        debug_assert!(angle < 4, "angle must be a quarter turn index");
        Self { pos, kind, angle }
    }
}

/// A rectangular volume of one structural kind placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub kind: SectorType,
    /// Long axis and open end for corridors; entry heading for rooms.
    pub direction: Direction,
    pub bounds: GridBox,
    pub ceiling_height: i32,
    pub columns_step: i32,
    /// Filled in by segment synthesis once the sector is part of the final chain.
    pub segments: Vec<Segment>,
}

impl Sector {
    pub fn room(bounds: GridBox, direction: Direction, ceiling_height: i32, columns_step: i32) -> Self {
        Self {
            kind: SectorType::Room,
            direction,
            bounds,
            ceiling_height,
            columns_step,
            segments: Vec::new(),
        }
    }

    pub fn corridor(bounds: GridBox, direction: Direction) -> Self {
        Self {
            kind: SectorType::Corridor,
            direction,
            bounds,
            ceiling_height: DEFAULT_CEILING_HEIGHT,
            columns_step: DEFAULT_COLUMNS_STEP,
            segments: Vec::new(),
        }
    }

    pub fn shaft(bounds: GridBox) -> Self {
        Self {
            kind: SectorType::Shaft,
            direction: Direction::XPlus,
            bounds,
            ceiling_height: DEFAULT_CEILING_HEIGHT,
            columns_step: DEFAULT_COLUMNS_STEP,
            segments: Vec::new(),
        }
    }

    pub fn is_room(&self) -> bool {
        self.kind == SectorType::Room
    }

    pub fn is_corridor(&self) -> bool {
        self.kind == SectorType::Corridor
    }

    /// Number of segments of the given kind.
    pub fn count_segments(&self, kind: SegmentType) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).count()
    }
}

/// The generated level: an ordered chain of sectors, root first.
///
/// Built once by the generator and never mutated afterwards; accessors are
/// read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    seed: u32,
    target: IVec3,
    sectors: Vec<Sector>,
}

impl World {
    pub fn new(seed: u32, target: IVec3, sectors: Vec<Sector>) -> Self {
        Self {
            seed,
            target,
            sectors,
        }
    }

    /// Seed the level was generated from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Grid coordinate the sector path was searched towards.
    pub fn target(&self) -> IVec3 {
        self.target
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Total number of segments across all sectors.
    pub fn segment_count(&self) -> usize {
        self.sectors.iter().map(|s| s.segments.len()).sum()
    }

    /// Take the sectors out of the world.
    pub fn into_sectors(self) -> Vec<Sector> {
        self.sectors
    }

    /// Deterministic hash of the whole level for comparison across runs.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_vec = |h: &mut u64, v: IVec3| {
            for c in v.to_array() {
                mix(h, &c.to_le_bytes());
            }
        };
        mix(&mut h, &self.seed.to_le_bytes());
        mix_vec(&mut h, self.target);
        for sector in &self.sectors {
            mix(&mut h, &[sector.kind as u8, sector.direction as u8]);
            mix_vec(&mut h, sector.bounds.min);
            mix_vec(&mut h, sector.bounds.max);
            mix(&mut h, &sector.ceiling_height.to_le_bytes());
            mix(&mut h, &sector.columns_step.to_le_bytes());
            for seg in &sector.segments {
                mix_vec(&mut h, seg.pos);
                mix(&mut h, &[seg.kind as u8, seg.angle]);
            }
        }
        h
    }
}
