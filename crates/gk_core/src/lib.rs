use bevy::prelude::*;

pub mod block;
pub mod config;
pub mod coords;
pub mod item;
pub mod player;
pub mod voxel;
pub mod world;

pub use block::{BlockFlags, BlockState, DimensionKind, Fluid, MarkerKind};
pub use config::TombstoneConfig;
pub use coords::{BlockPos, BlockPosition, WorldBounds};
pub use item::{Inventory, ItemStack};
pub use player::{ParsePlayerIdError, PlayerId, PlayerIdentity};
pub use voxel::VoxelWorld;
pub use world::BlockWorld;

/// Core plugin providing the shared tombstone types.
pub struct GkCorePlugin;

impl Plugin for GkCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TombstoneConfig>();
    }
}
