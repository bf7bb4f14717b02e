use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer world-block coordinate.
///
/// This is the key tombstones are stored under, so it is `Hash + Eq` and
/// serializes as a plain `(x: .., y: .., z: ..)` record.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    pub const fn down(self) -> Self {
        self.offset(0, -1, 0)
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Largest per-axis distance to `other`.
    pub fn chebyshev_distance(self, other: BlockPos) -> i32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// Block position of a player entity, kept current by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Component)]
pub struct BlockPosition(pub BlockPos);

/// Vertical extent of a world. `min_y` is the lowest buildable layer and
/// `max_y` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldBounds {
    pub min_y: i32,
    pub max_y: i32,
}

impl WorldBounds {
    pub const fn new(min_y: i32, max_y: i32) -> Self {
        Self { min_y, max_y }
    }

    /// Number of layers in the world, used to cap vertical scans.
    pub const fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub const fn contains_y(&self, y: i32) -> bool {
        y >= self.min_y && y < self.max_y
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(-64, 320)
    }
}
