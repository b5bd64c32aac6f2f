use glam::IVec3;
use levelgen_common::{Direction, GridBox};
use levelgen_kernel::Sector;
use levelgen_kernel::world::{DEFAULT_CEILING_HEIGHT, DEFAULT_COLUMNS_STEP};
use serde::{Deserialize, Serialize};

use crate::search::SearchError;

/// Inclusive integer range used for the size tables of the successor rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: i32,
    pub max: i32,
}

impl Span {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// Search configuration: root room, successor size tables, goal tolerance
/// and the pop budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Inclusive corner of the root room.
    pub root_min: IVec3,
    /// Exclusive corner of the root room.
    pub root_max: IVec3,
    /// Column grid spacing for every room, also the door spacing.
    pub columns_step: i32,
    /// Ceiling clearance below the top of every room.
    pub ceiling_height: i32,
    /// Corridor lengths tried from every room door.
    pub corridor_length: Span,
    /// Room width and depth, in column bays.
    pub room_arches: Span,
    /// Room heights tried at every corridor end.
    pub room_height: Span,
    /// A sector whose center is within this many cells of the target on
    /// every axis ends the search.
    pub goal_tolerance: i32,
    /// Frontier pops before the search gives up.
    pub max_pops: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            root_min: IVec3::new(-3, -3, 0),
            root_max: IVec3::new(3, 3, 16),
            columns_step: DEFAULT_COLUMNS_STEP,
            ceiling_height: DEFAULT_CEILING_HEIGHT,
            corridor_length: Span::new(2, 10),
            room_arches: Span::new(2, 5),
            room_height: Span::new(3, 7),
            goal_tolerance: 2,
            max_pops: 100_000,
        }
    }
}

impl SearchConfig {
    /// Check that every table is usable before a search starts.
    pub fn validate(&self) -> Result<(), SearchError> {
        let invalid = |reason: &str| {
            Err(SearchError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if GridBox::new(self.root_min, self.root_max).is_none() {
            return invalid("root room must have a positive extent on every axis");
        }
        if self.columns_step < 1 {
            return invalid("columns_step must be at least 1");
        }
        if self.corridor_length.is_empty() || self.corridor_length.min < 1 {
            return invalid("corridor_length must be a non-empty range of positive lengths");
        }
        if self.room_arches.is_empty() || self.room_arches.min < 1 {
            return invalid("room_arches must be a non-empty range of positive counts");
        }
        if self.room_height.is_empty() || self.room_height.min <= self.ceiling_height {
            return invalid("room_height must be a non-empty range above ceiling_height");
        }
        if self.ceiling_height < 1 {
            return invalid("ceiling_height must be at least 1");
        }
        if (self.root_max.z as i64 - self.root_min.z as i64) <= self.ceiling_height as i64 {
            return invalid("root room must be taller than ceiling_height");
        }
        if self.goal_tolerance < 0 {
            return invalid("goal_tolerance must not be negative");
        }
        if self.max_pops == 0 {
            return invalid("max_pops must be positive");
        }
        Ok(())
    }

    /// The fixed room every search starts from.
    pub fn root_sector(&self) -> Result<Sector, SearchError> {
        let bounds =
            GridBox::new(self.root_min, self.root_max).ok_or_else(|| SearchError::InvalidConfig {
                reason: "root room must have a positive extent on every axis".to_string(),
            })?;
        Ok(Sector::room(
            bounds,
            Direction::XPlus,
            self.ceiling_height,
            self.columns_step,
        ))
    }

    /// Cells along a room side spanning `arches` bays, including both end columns.
    pub fn room_size(&self, arches: i32) -> i32 {
        arches * self.columns_step + 1
    }
}
