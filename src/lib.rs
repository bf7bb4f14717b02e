//! Gravekeeper: a player's inventory goes into a tombstone when they die,
//! and comes back when they return to it.
//!
//! The host supplies a block world resource implementing [`BlockWorld`],
//! player entities carrying [`PlayerIdentity`], [`BlockPosition`] and
//! [`Inventory`], and the death, respawn, block-use and world-save events.

use bevy::prelude::*;
use std::marker::PhantomData;
use std::path::PathBuf;

pub use gk_core::{
    BlockPos, BlockPosition, BlockState, BlockWorld, DimensionKind, Inventory, ItemStack,
    MarkerKind, PlayerId, PlayerIdentity, TombstoneConfig, VoxelWorld, WorldBounds,
};
pub use gk_lifecycle::{
    DeathVetoed, LifecycleController, PlayerDeathEvent, PlayerRespawnEvent, TombstoneClaimed,
    TombstonePlaced, UseBlockEvent,
};
pub use gk_persistence::{TombstoneSavePath, WorldSaveEvent};
pub use gk_store::TombstoneStore;

pub use gk_core;
pub use gk_lifecycle;
pub use gk_marker;
pub use gk_persistence;
pub use gk_placement;
pub use gk_store;

/// Everything the tombstone feature needs, for a host world of type `W`.
///
/// Without [`with_persistence`](Self::with_persistence) the config is the
/// default one and tombstones live only as long as the app.
pub struct GravekeeperPlugin<W> {
    persistence: Option<(PathBuf, PathBuf)>,
    _world: PhantomData<fn() -> W>,
}

impl<W> Default for GravekeeperPlugin<W> {
    fn default() -> Self {
        Self {
            persistence: None,
            _world: PhantomData,
        }
    }
}

impl<W> GravekeeperPlugin<W> {
    /// Read the config from `config_path` and keep tombstones in `world_dir`.
    pub fn with_persistence(
        config_path: impl Into<PathBuf>,
        world_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            persistence: Some((config_path.into(), world_dir.into())),
            _world: PhantomData,
        }
    }
}

impl<W: BlockWorld + Resource> Plugin for GravekeeperPlugin<W> {
    fn build(&self, app: &mut App) {
        if let Some((config_path, world_dir)) = &self.persistence {
            app.add_plugins(gk_persistence::GkPersistencePlugin::new(
                config_path.clone(),
                world_dir.clone(),
            ));
        }

        app.add_plugins((
            gk_core::GkCorePlugin,
            gk_marker::GkMarkerPlugin,
            gk_lifecycle::GkLifecyclePlugin::<W>::default(),
        ));
    }
}
