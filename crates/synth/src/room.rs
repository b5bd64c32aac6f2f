use glam::IVec3;
use levelgen_kernel::{RandomSequence, Sector, Segment, SegmentType};

use crate::portal::find_portal;

/// Emit the tiles of a room: floor, edge joints, walls, corners, ceiling
/// arches and columns, in that order.
///
/// Cells where a placed corridor opens into the room lose their wall or joint
/// and become plain floor.
pub(crate) fn synthesize_room(
    room: &Sector,
    placed: &[Sector],
    rng: &mut RandomSequence,
    out: &mut Vec<Segment>,
) {
    let IVec3 { x: x0, y: y0, z: z0 } = room.bounds.min;
    let IVec3 { x: x1, y: y1, z: z1 } = room.bounds.max;
    let (xl, yl) = (x1 - 1, y1 - 1);
    let is_portal = |cell: IVec3| find_portal(cell, placed).is_some();

    // Interior floor.
    for y in y0 + 1..yl {
        for x in x0 + 1..xl {
            let cell = IVec3::new(x, y, z0);
            if is_portal(cell) {
                continue;
            }
            out.push(Segment::new(cell, SegmentType::Floor, rng.below(4) as u8));
        }
    }

    // Straight edges: floor-wall joints, opened up at doorways.
    let mut edge = |cell: IVec3, angle: u8| {
        let kind = if is_portal(cell) {
            SegmentType::Floor
        } else {
            SegmentType::FloorWallJoint
        };
        out.push(Segment::new(cell, kind, angle));
    };
    for y in y0 + 1..yl {
        edge(IVec3::new(x0, y, z0), 0);
        edge(IVec3::new(xl, y, z0), 2);
    }
    for x in x0 + 1..xl {
        edge(IVec3::new(x, y0, z0), 1);
        edge(IVec3::new(x, yl, z0), 3);
    }

    // Walls above the floor on every face.
    let mut wall = |cell: IVec3, angle: u8| {
        if !is_portal(cell) {
            out.push(Segment::new(cell, SegmentType::Wall, angle));
        }
    };
    for z in z0 + 1..z1 {
        for y in y0..y1 {
            wall(IVec3::new(x0, y, z), 0);
            wall(IVec3::new(xl, y, z), 2);
        }
        for x in x0..x1 {
            wall(IVec3::new(x, y0, z), 1);
            wall(IVec3::new(x, yl, z), 3);
        }
    }

    for (x, y, angle) in [(x0, y0, 0), (xl, y0, 1), (xl, yl, 2), (x0, yl, 3)] {
        out.push(Segment::new(
            IVec3::new(x, y, z0),
            SegmentType::FloorWallWallJoint,
            angle,
        ));
    }

    let step = room.columns_step.max(1);
    let ceiling_z = z1 - room.ceiling_height;

    // One arch per bay of the column grid.
    for y in (y0..yl).step_by(step as usize) {
        for x in (x0..xl).step_by(step as usize) {
            out.push(Segment::new(
                IVec3::new(x, y, ceiling_z),
                SegmentType::CeilingArch3,
                0,
            ));
        }
    }

    // Columns on every grid intersection; interior ones carry lights at the base.
    for y in (y0..=yl).step_by(step as usize) {
        for x in (x0..=xl).step_by(step as usize) {
            let interior = x > x0 && x < xl && y > y0 && y < yl;
            let mut z = z0;
            if interior {
                out.push(Segment::new(
                    IVec3::new(x, y, z0),
                    SegmentType::Column3Lights,
                    0,
                ));
                z += 1;
            }
            for z in z..ceiling_z {
                out.push(Segment::new(IVec3::new(x, y, z), SegmentType::Column3, 0));
            }
        }
    }
}
