use bevy::prelude::*;
use gk_core::{BlockWorld, TombstoneConfig};
use gk_marker::MarkerCatalog;
use gk_store::GkStorePlugin;
use std::marker::PhantomData;

pub mod controller;
pub mod events;
pub mod systems;

pub use controller::{
    Claim, DeathOutcome, DeathState, LifecycleController, MarkerSource, PlayerRef,
    RETURN_SCAN_RADIUS,
};
pub use events::{
    DeathVetoed, PlayerDeathEvent, PlayerRespawnEvent, TombstoneClaimed, TombstonePlaced,
    UseBlockEvent,
};

/// Lifecycle plugin, generic over the host's block world resource.
pub struct GkLifecyclePlugin<W>(PhantomData<fn() -> W>);

impl<W> Default for GkLifecyclePlugin<W> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<W: BlockWorld + Resource> Plugin for GkLifecyclePlugin<W> {
    fn build(&self, app: &mut App) {
        app.init_resource::<TombstoneConfig>()
            .init_resource::<MarkerCatalog>()
            .init_resource::<LifecycleController>();

        if !app.is_plugin_added::<GkStorePlugin>() {
            app.add_plugins(GkStorePlugin);
        }

        app.add_event::<PlayerDeathEvent>()
            .add_event::<PlayerRespawnEvent>()
            .add_event::<UseBlockEvent>()
            .add_event::<DeathVetoed>()
            .add_event::<TombstonePlaced>()
            .add_event::<TombstoneClaimed>()
            .add_systems(
                Update,
                (
                    systems::handle_deaths::<W>,
                    systems::handle_respawns,
                    systems::handle_block_use::<W>,
                    systems::scan_for_tombstones::<W>.run_if(systems::distance_check_enabled),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_core::VoxelWorld;
    use gk_store::TombstoneStore;

    #[test]
    fn installs_store_sized_from_config() {
        let mut app = App::new();
        app.insert_resource(VoxelWorld::default())
            .insert_resource(TombstoneConfig {
                max_tombstones_per_player: 3,
                ..default()
            })
            .add_plugins(GkLifecyclePlugin::<VoxelWorld>::default());

        assert!(app.is_plugin_added::<GkStorePlugin>());
        assert_eq!(app.world().resource::<TombstoneStore>().max_per_owner(), 3);
    }

    #[test]
    fn keeps_a_store_loaded_before_it() {
        let mut app = App::new();
        app.insert_resource(VoxelWorld::default())
            .insert_resource(TombstoneStore::with_limit(7))
            .add_plugins((GkStorePlugin, GkLifecyclePlugin::<VoxelWorld>::default()));

        assert_eq!(app.world().resource::<TombstoneStore>().max_per_owner(), 7);
    }
}
