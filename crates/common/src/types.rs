use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned integer box covering the cells `[min, max)`.
///
/// Every axis has a positive extent; use [`GridBox::new`] to build one from
/// untrusted corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl GridBox {
    /// Build a box, or `None` if any axis has `min >= max`.
    pub fn new(min: IVec3, max: IVec3) -> Option<Self> {
        if min.cmplt(max).all() {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Size of the box along each axis.
    pub fn extent(&self) -> IVec3 {
        self.max - self.min
    }

    /// Twice the center point. Keeps center comparisons in integers.
    pub fn doubled_center(&self) -> IVec3 {
        self.min + self.max
    }

    /// Number of unit cells inside the box.
    pub fn volume(&self) -> i64 {
        let e = self.extent();
        e.x as i64 * e.y as i64 * e.z as i64
    }

    pub fn contains(&self, cell: IVec3) -> bool {
        cell.cmpge(self.min).all() && cell.cmplt(self.max).all()
    }

    /// Open-interval intersection test. Boxes that only share a face do not overlap.
    pub fn overlaps(&self, other: &GridBox) -> bool {
        self.min.cmplt(other.max).all() && other.min.cmplt(self.max).all()
    }

    /// True if the boxes share part of a face without overlapping.
    pub fn touches(&self, other: &GridBox) -> bool {
        if self.overlaps(other) {
            return false;
        }
        let mut flush_axes = 0;
        for axis in 0..3 {
            if self.max[axis] == other.min[axis] || other.max[axis] == self.min[axis] {
                flush_axes += 1;
            } else if !(self.min[axis] < other.max[axis] && other.min[axis] < self.max[axis]) {
                return false;
            }
        }
        flush_axes == 1
    }

    /// Iterate every cell of the box, X fastest, then Y, then Z.
    pub fn cells(&self) -> impl Iterator<Item = IVec3> + use<> {
        let (min, max) = (self.min, self.max);
        (min.z..max.z).flat_map(move |z| {
            (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| IVec3::new(x, y, z)))
        })
    }
}

impl std::fmt::Display for GridBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}]-[{}, {}, {}]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

/// Horizontal heading of a corridor, or the heading a room was entered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    XPlus,
    XMinus,
    YPlus,
    YMinus,
}

impl Direction {
    /// All headings in expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::XPlus,
        Direction::XMinus,
        Direction::YPlus,
        Direction::YMinus,
    ];

    /// Index of the axis this direction runs along (0 = X, 1 = Y).
    pub fn axis(self) -> usize {
        match self {
            Self::XPlus | Self::XMinus => 0,
            Self::YPlus | Self::YMinus => 1,
        }
    }

    /// The other horizontal axis.
    pub fn lateral_axis(self) -> usize {
        1 - self.axis()
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Self::XPlus | Self::YPlus)
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::XPlus => Self::XMinus,
            Self::XMinus => Self::XPlus,
            Self::YPlus => Self::YMinus,
            Self::YMinus => Self::YPlus,
        }
    }

    /// Unit step in this direction.
    pub fn step(self) -> IVec3 {
        match self {
            Self::XPlus => IVec3::X,
            Self::XMinus => IVec3::NEG_X,
            Self::YPlus => IVec3::Y,
            Self::YMinus => IVec3::NEG_Y,
        }
    }
}
