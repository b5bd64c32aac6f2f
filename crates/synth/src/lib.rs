//! Segment synthesis: expands placed sectors into renderable unit tiles.
//!
//! # Invariants
//! - Every segment lies inside its sector's bounds.
//! - Rules are local: a sector's tiles depend only on its own box, its kind
//!   and the corridors placed next to it.
//! - Doorway cells never carry a wall or floor-wall joint.

mod portal;
mod room;

use glam::IVec3;
use levelgen_kernel::{RandomSequence, Sector, SectorType, Segment, SegmentType};

pub use portal::{Portal, find_portal, find_portals};

/// Build the segments of `sector`.
///
/// `placed` is the full set of placed sectors, used to find doorways.
pub fn synthesize(sector: &Sector, placed: &[Sector], rng: &mut RandomSequence) -> Vec<Segment> {
    let mut out = Vec::new();
    match sector.kind {
        SectorType::Corridor => synthesize_corridor(sector, &mut out),
        SectorType::Room => room::synthesize_room(sector, placed, rng, &mut out),
        SectorType::Shaft => synthesize_shaft(sector, &mut out),
    }
    out
}

/// Fill the segments of every sector in order, treating the whole slice as placed.
pub fn synthesize_all(sectors: &mut [Sector], rng: &mut RandomSequence) {
    let _span = tracing::info_span!("synthesize", sectors = sectors.len()).entered();
    for i in 0..sectors.len() {
        let segments = synthesize(&sectors[i], sectors, rng);
        tracing::trace!(sector = i, kind = ?sectors[i].kind, segments = segments.len(), "synthesized");
        sectors[i].segments = segments;
    }
}

fn synthesize_corridor(corridor: &Sector, out: &mut Vec<Segment>) {
    let b = corridor.bounds;
    let along = corridor.direction.axis();
    let angle = if along == 0 { 1 } else { 0 };
    for i in b.min[along]..b.max[along] {
        let mut pos = b.min;
        pos[along] = i;
        out.push(Segment::new(pos, SegmentType::Corridor, angle));
    }
}

fn synthesize_shaft(shaft: &Sector, out: &mut Vec<Segment>) {
    let b = shaft.bounds;
    for z in b.min.z..b.max.z {
        out.push(Segment::new(
            IVec3::new(b.min.x, b.min.y, z),
            SegmentType::Shaft,
            0,
        ));
    }
}

pub fn crate_info() -> &'static str {
    "levelgen-synth v0.1.0"
}
