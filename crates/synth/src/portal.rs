use glam::IVec3;
use levelgen_kernel::Sector;

/// A doorway: the room cell just past one end of a corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portal {
    /// Index of the room in the sector list.
    pub room: usize,
    /// Index of the corridor in the sector list.
    pub corridor: usize,
    /// Room cell the corridor opens into.
    pub cell: IVec3,
}

/// Find the placed corridor whose open end faces `cell`, if any.
///
/// Linear scan; only corridors take part.
pub fn find_portal(cell: IVec3, placed: &[Sector]) -> Option<&Sector> {
    placed
        .iter()
        .filter(|s| s.is_corridor())
        .find(|c| faces_end(cell, c))
}

/// All doorways between rooms and corridors in `sectors`, in corridor order.
pub fn find_portals(sectors: &[Sector]) -> Vec<Portal> {
    let mut portals = Vec::new();
    for (ci, corridor) in sectors.iter().enumerate().filter(|(_, s)| s.is_corridor()) {
        for cell in end_cells(corridor) {
            for (ri, room) in sectors.iter().enumerate().filter(|(_, s)| s.is_room()) {
                if room.bounds.contains(cell) {
                    portals.push(Portal {
                        room: ri,
                        corridor: ci,
                        cell,
                    });
                }
            }
        }
    }
    portals
}

/// The two cells just past each end of a corridor's long axis.
fn end_cells(corridor: &Sector) -> [IVec3; 2] {
    let b = corridor.bounds;
    let along = corridor.direction.axis();
    let mut before = b.min;
    before[along] -= 1;
    let mut after = b.min;
    after[along] = b.max[along];
    [before, after]
}

fn faces_end(cell: IVec3, corridor: &Sector) -> bool {
    let b = corridor.bounds;
    let along = corridor.direction.axis();
    let inside_section =
        (0..3).all(|axis| axis == along || (cell[axis] >= b.min[axis] && cell[axis] < b.max[axis]));
    inside_section && (cell[along] == b.min[along] - 1 || cell[along] == b.max[along])
}
