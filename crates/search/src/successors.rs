use levelgen_common::{Direction, GridBox};
use levelgen_kernel::{Sector, SectorType};

use crate::config::SearchConfig;

/// Offsets along a wall of `wall_len` cells where a door may open.
///
/// Doors sit half a bay past each column and never on the corner cells.
pub fn door_offsets(wall_len: i32, columns_step: i32) -> impl Iterator<Item = i32> {
    let step = columns_step.max(1);
    (0..)
        .map(move |k| step / 2 + k * step)
        .take_while(move |&o| o < wall_len - 1)
        .filter(|&o| o > 0)
}

/// Append every candidate successor of `sector` to `out`.
///
/// Rooms open corridors, corridors end in rooms, shafts are terminal.
pub fn successors(sector: &Sector, config: &SearchConfig, out: &mut Vec<Sector>) {
    match sector.kind {
        SectorType::Room => corridors_from_room(sector, config, out),
        SectorType::Corridor => rooms_from_corridor(sector, config, out),
        SectorType::Shaft => {}
    }
}

fn corridors_from_room(room: &Sector, config: &SearchConfig, out: &mut Vec<Sector>) {
    let b = room.bounds;
    for dir in Direction::ALL {
        let along = dir.axis();
        let lateral = dir.lateral_axis();
        for offset in door_offsets(b.extent()[lateral], room.columns_step) {
            for len in config.corridor_length.iter() {
                let mut min = b.min;
                let mut max = b.max;
                min[lateral] = b.min[lateral] + offset;
                max[lateral] = min[lateral] + 1;
                max.z = b.min.z + 1;
                if dir.is_positive() {
                    min[along] = b.max[along];
                    max[along] = b.max[along] + len;
                } else {
                    max[along] = b.min[along];
                    min[along] = b.min[along] - len;
                }
                if let Some(bounds) = GridBox::new(min, max) {
                    out.push(Sector::corridor(bounds, dir));
                }
            }
        }
    }
}

fn rooms_from_corridor(corridor: &Sector, config: &SearchConfig, out: &mut Vec<Sector>) {
    let c = corridor.bounds;
    let dir = corridor.direction;
    let along = dir.axis();
    let lateral = dir.lateral_axis();
    for width_arches in config.room_arches.iter() {
        for depth_arches in config.room_arches.iter() {
            for height in config.room_height.iter() {
                let width = config.room_size(width_arches);
                let depth = config.room_size(depth_arches);
                for offset in door_offsets(width, config.columns_step) {
                    let mut min = c.min;
                    let mut max = c.max;
                    min[lateral] = c.min[lateral] - offset;
                    max[lateral] = min[lateral] + width;
                    max.z = c.min.z + height;
                    if dir.is_positive() {
                        min[along] = c.max[along];
                        max[along] = c.max[along] + depth;
                    } else {
                        max[along] = c.min[along];
                        min[along] = c.min[along] - depth;
                    }
                    if let Some(bounds) = GridBox::new(min, max) {
                        out.push(Sector::room(
                            bounds,
                            dir,
                            config.ceiling_height,
                            config.columns_step,
                        ));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    fn root() -> Sector {
        SearchConfig::default().root_sector().unwrap()
    }

    #[test]
    fn door_offsets_skip_corners() {
        assert_eq!(door_offsets(6, 3).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(door_offsets(7, 3).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(door_offsets(16, 3).collect::<Vec<_>>(), vec![1, 4, 7, 10, 13]);
        assert_eq!(door_offsets(2, 3).count(), 0);
        assert_eq!(door_offsets(4, 1).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn room_emits_corridors_on_every_side() {
        let config = SearchConfig::default();
        let mut out = Vec::new();
        successors(&root(), &config, &mut out);
        // 4 sides x 2 doors x 9 lengths
        assert_eq!(out.len(), 72);
        for d in Direction::ALL {
            assert_eq!(out.iter().filter(|s| s.direction == d).count(), 18);
        }
    }

    #[test]
    fn corridors_abut_the_room() {
        let config = SearchConfig::default();
        let room = root();
        let mut out = Vec::new();
        successors(&room, &config, &mut out);
        for corridor in &out {
            assert!(corridor.is_corridor());
            assert!(corridor.bounds.touches(&room.bounds));
            let e = corridor.bounds.extent();
            assert_eq!(e[corridor.direction.lateral_axis()], 1);
            assert_eq!(e.z, 1);
            assert!(e[corridor.direction.axis()] >= 2);
            assert_eq!(corridor.bounds.min.z, room.bounds.min.z);
        }
    }

    #[test]
    fn xplus_corridor_geometry() {
        let config = SearchConfig::default();
        let mut out = Vec::new();
        successors(&root(), &config, &mut out);
        let first = &out[0];
        assert_eq!(first.direction, Direction::XPlus);
        assert_eq!(first.bounds.min, IVec3::new(3, -2, 0));
        assert_eq!(first.bounds.max, IVec3::new(5, -1, 1));
    }

    #[test]
    fn corridor_rooms_are_flush_with_open_end() {
        let config = SearchConfig::default();
        let bounds = GridBox::new(IVec3::new(-8, 1, 0), IVec3::new(-3, 2, 1)).unwrap();
        let corridor = Sector::corridor(bounds, Direction::XMinus);
        let mut out = Vec::new();
        successors(&corridor, &config, &mut out);
        assert!(!out.is_empty());
        for room in &out {
            assert!(room.is_room());
            assert_eq!(room.bounds.max.x, -8);
            assert!(room.bounds.touches(&corridor.bounds));
            assert_eq!(room.bounds.min.z, 0);
            // The corridor lines up with a door cell of the near wall.
            let offset = corridor.bounds.min.y - room.bounds.min.y;
            assert!(door_offsets(room.bounds.extent().y, room.columns_step).any(|o| o == offset));
        }
    }

    #[test]
    fn corridor_room_count() {
        let config = SearchConfig::default();
        let bounds = GridBox::new(IVec3::new(0, 0, 0), IVec3::new(1, 4, 1)).unwrap();
        let corridor = Sector::corridor(bounds, Direction::YPlus);
        let mut out = Vec::new();
        successors(&corridor, &config, &mut out);
        // widths 7, 10, 13, 16 have 2, 3, 4, 5 doors; 4 depths; 5 heights
        assert_eq!(out.len(), (2 + 3 + 4 + 5) * 4 * 5);
    }

    #[test]
    fn shafts_are_terminal() {
        let config = SearchConfig::default();
        let shaft = Sector::shaft(GridBox::new(IVec3::ZERO, IVec3::new(1, 1, 6)).unwrap());
        let mut out = Vec::new();
        successors(&shaft, &config, &mut out);
        assert!(out.is_empty());
    }
}
