use bevy::prelude::*;
use gk_store::{SavedTombstones, TombstoneStore};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// Fixed name of the per-world tombstone save.
pub const STORE_NAME: &str = "gravekeeper_tombstones";

/// Path of the tombstone save inside a world directory.
pub fn store_path(world_dir: &Path) -> PathBuf {
    world_dir.join(format!("{}.ron", STORE_NAME))
}

/// Save the store to a RON file.
///
/// Writes to a sibling temp file first and renames it over the target, so a
/// crash mid-write never leaves a truncated save behind.
pub fn save_tombstones(path: &Path, store: &TombstoneStore) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pretty_config = ron::ser::PrettyConfig::new().depth_limit(3);
    let ron_string = ron::ser::to_string_pretty(&store.to_saved(), pretty_config)?;

    let tmp = path.with_extension("ron.tmp");
    fs::write(&tmp, ron_string)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Load the store from a RON file. A missing file is an empty store.
pub fn load_tombstones(
    path: &Path,
    max_per_owner: u32,
) -> Result<TombstoneStore, PersistenceError> {
    if !path.exists() {
        return Ok(TombstoneStore::with_limit(max_per_owner));
    }
    let contents = fs::read_to_string(path)?;
    let saved: SavedTombstones = ron::from_str(&contents)?;
    Ok(TombstoneStore::from_saved(saved, max_per_owner))
}

/// Load the world's tombstones, falling back to an empty store.
///
/// An unreadable save is copied aside to `*.ron.bak` before the empty store
/// replaces it on the next save.
pub fn load_or_empty(path: &Path, max_per_owner: u32) -> TombstoneStore {
    match load_tombstones(path, max_per_owner) {
        Ok(store) => {
            info!("Loaded {} tombstone records from {}", store.len(), path.display());
            store
        }
        Err(e) => {
            error!("Failed to load tombstones from {}: {}", path.display(), e);
            let backup = path.with_extension("ron.bak");
            if let Err(e) = fs::copy(path, &backup) {
                warn!("Could not back up {}: {}", path.display(), e);
            }
            TombstoneStore::with_limit(max_per_owner)
        }
    }
}

/// Save the store if it changed since the last save.
///
/// A failed save is logged and the store stays dirty, so the next save cycle
/// tries again. Returns whether anything was written.
pub fn flush_tombstones(store: &mut TombstoneStore, path: &Path) -> bool {
    if !store.take_dirty() {
        return false;
    }
    match save_tombstones(path, store) {
        Ok(()) => {
            debug!("Saved {} tombstone records to {}", store.len(), path.display());
            true
        }
        Err(e) => {
            error!("Failed to save tombstones to {}: {}", path.display(), e);
            store.mark_dirty();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_core::{BlockPos, ItemStack, PlayerId};
    use gk_store::LootRecord;
    use tempfile::tempdir;

    fn sample_store() -> TombstoneStore {
        let mut store = TombstoneStore::with_limit(4);
        store.add(
            BlockPos::new(10, -63, 10),
            LootRecord::new(
                PlayerId(7),
                vec![ItemStack::new(vec![0, 1, 2]), ItemStack::new(vec![255])],
            ),
        );
        store.add(
            BlockPos::new(10, -63, 10),
            LootRecord::new(PlayerId(8), vec![ItemStack::new(b"{id:\"stone\"}".to_vec())]),
        );
        store
    }

    #[test]
    fn save_and_load_tombstones() {
        let dir = tempdir().unwrap();
        let path = store_path(dir.path());

        let store = sample_store();
        save_tombstones(&path, &store).unwrap();

        let loaded = load_tombstones(&path, 4).unwrap();
        assert_eq!(loaded.to_saved(), store.to_saved());
        assert_eq!(loaded.max_per_owner(), 4);
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let loaded = load_tombstones(&dir.path().join("nope.ron"), 0).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_file_falls_back_and_is_backed_up() {
        let dir = tempdir().unwrap();
        let path = store_path(dir.path());
        fs::write(&path, "(tombstones: [oops").unwrap();

        assert!(load_tombstones(&path, 0).is_err());
        let store = load_or_empty(&path, 2);
        assert!(store.is_empty());
        assert_eq!(store.max_per_owner(), 2);
        assert!(path.with_extension("ron.bak").exists());
    }

    #[test]
    fn flush_only_writes_when_dirty() {
        let dir = tempdir().unwrap();
        let path = store_path(&dir.path().join("world"));

        let mut store = sample_store();
        assert!(flush_tombstones(&mut store, &path));
        assert!(path.exists());
        assert!(!store.is_dirty());
        assert!(!flush_tombstones(&mut store, &path));
    }

    #[test]
    fn store_filename_is_fixed() {
        let path = store_path(Path::new("saves/world1"));
        assert_eq!(path, Path::new("saves/world1/gravekeeper_tombstones.ron"));
    }
}
