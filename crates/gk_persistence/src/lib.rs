use bevy::prelude::*;
use std::path::PathBuf;

pub mod config_io;
pub mod error;
pub mod store_io;

pub use config_io::{load_config, read_config, save_config, CONFIG_FILENAME};
pub use error::PersistenceError;
pub use store_io::{
    flush_tombstones, load_or_empty, load_tombstones, save_tombstones, store_path, STORE_NAME,
};

use gk_store::TombstoneStore;

/// Fired by the host on its save cycle. Dirty tombstone state is written
/// once per frame no matter how many of these arrive.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct WorldSaveEvent;

/// Location of the current world's tombstone save.
#[derive(Resource, Debug, Clone)]
pub struct TombstoneSavePath(pub PathBuf);

/// Persistence plugin.
///
/// Loads the config and the world's tombstones when the app is built, and
/// writes the tombstones back on [`WorldSaveEvent`].
pub struct GkPersistencePlugin {
    pub config_path: PathBuf,
    pub world_dir: PathBuf,
}

impl GkPersistencePlugin {
    pub fn new(config_path: impl Into<PathBuf>, world_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            world_dir: world_dir.into(),
        }
    }
}

impl Plugin for GkPersistencePlugin {
    fn build(&self, app: &mut App) {
        let config = load_config(&self.config_path);
        let path = store_path(&self.world_dir);
        let store = load_or_empty(&path, config.max_tombstones_per_player);

        app.insert_resource(config)
            .insert_resource(store)
            .insert_resource(TombstoneSavePath(path))
            .add_event::<WorldSaveEvent>()
            .add_systems(Last, save_on_world_save);
    }
}

/// System that flushes dirty tombstone state when the host saves.
pub fn save_on_world_save(
    mut events: EventReader<WorldSaveEvent>,
    mut store: ResMut<TombstoneStore>,
    path: Res<TombstoneSavePath>,
) {
    if events.read().count() == 0 {
        return;
    }
    flush_tombstones(&mut store, &path.0);
}
