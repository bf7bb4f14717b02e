use bevy::prelude::*;
use gk_core::TombstoneConfig;

pub mod record;
pub mod saved;
pub mod store;

pub use record::LootRecord;
pub use saved::{SavedTombstone, SavedTombstones};
pub use store::{AddOutcome, TombstoneStore};

/// Store plugin. Installs an empty [`TombstoneStore`] sized from the
/// config, unless persistence already loaded one.
pub struct GkStorePlugin;

impl Plugin for GkStorePlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<TombstoneStore>() {
            return;
        }
        let limit = app
            .world()
            .get_resource::<TombstoneConfig>()
            .map(|config| config.max_tombstones_per_player)
            .unwrap_or_default();
        app.insert_resource(TombstoneStore::with_limit(limit));
    }
}
