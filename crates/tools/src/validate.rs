use levelgen_kernel::{SectorType, World};

/// A broken level invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("sectors {a} and {b} overlap")]
    Overlap { a: usize, b: usize },
    #[error("sector {sector} has a segment at {pos:?} outside its bounds")]
    SegmentOutside { sector: usize, pos: [i32; 3] },
    #[error("corridor {sector} is not one cell wide and one cell tall")]
    CorridorShape { sector: usize },
    #[error("sectors {a} and {b} are consecutive but do not share a face")]
    Disconnected { a: usize, b: usize },
    #[error("sector {sector} has a segment with angle {angle}")]
    BadAngle { sector: usize, angle: u8 },
}

/// Check every structural invariant of a generated level.
///
/// Returns all violations found; an empty list means the level is sound.
pub fn validate(world: &World) -> Vec<Violation> {
    let sectors = world.sectors();
    let mut violations = Vec::new();

    for (a, sa) in sectors.iter().enumerate() {
        for (b, sb) in sectors.iter().enumerate().skip(a + 1) {
            if sa.bounds.overlaps(&sb.bounds) {
                violations.push(Violation::Overlap { a, b });
            }
        }
    }

    for (a, pair) in sectors.windows(2).enumerate() {
        if !pair[0].bounds.touches(&pair[1].bounds) {
            violations.push(Violation::Disconnected { a, b: a + 1 });
        }
    }

    for (i, sector) in sectors.iter().enumerate() {
        if sector.kind == SectorType::Corridor {
            let e = sector.bounds.extent();
            if e[sector.direction.lateral_axis()] != 1 || e.z != 1 {
                violations.push(Violation::CorridorShape { sector: i });
            }
        }
        for seg in &sector.segments {
            if !sector.bounds.contains(seg.pos) {
                violations.push(Violation::SegmentOutside {
                    sector: i,
                    pos: seg.pos.to_array(),
                });
            }
            if seg.angle > 3 {
                violations.push(Violation::BadAngle {
                    sector: i,
                    angle: seg.angle,
                });
            }
        }
    }

    violations
}
