use bevy::prelude::*;
use gk_core::TombstoneConfig;
use std::fs;
use std::path::Path;

use crate::error::PersistenceError;

/// Default config file name, relative to the host's config directory.
pub const CONFIG_FILENAME: &str = "gravekeeper.ron";

pub fn read_config(path: &Path) -> Result<TombstoneConfig, PersistenceError> {
    let contents = fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

pub fn save_config(path: &Path, config: &TombstoneConfig) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let ron_string = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::new())?;
    fs::write(path, ron_string)?;
    Ok(())
}

/// Load the config, never failing.
///
/// A missing file is created with the defaults. Any read or parse error is
/// logged and the defaults are used for this run.
pub fn load_config(path: &Path) -> TombstoneConfig {
    if !path.exists() {
        let config = TombstoneConfig::default();
        match save_config(path, &config) {
            Ok(()) => info!("Created default config at {}", path.display()),
            Err(e) => error!("Failed to create default config at {}: {}", path.display(), e),
        }
        return config;
    }

    match read_config(path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            error!("Error loading config from {}: {}", path.display(), e);
            TombstoneConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join(CONFIG_FILENAME);

        let config = load_config(&path);
        assert_eq!(config, TombstoneConfig::default());
        assert!(path.exists());
        assert_eq!(read_config(&path).unwrap(), config);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "(whitelist_mode: maybe)").unwrap();

        assert!(read_config(&path).is_err());
        assert_eq!(load_config(&path), TombstoneConfig::default());
    }

    #[test]
    fn reads_written_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                whitelist_mode: true,
                flower_pots: ["minecraft:potted_cactus"],
                max_tombstones_per_player: 5,
            )"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert!(config.whitelist_mode);
        assert_eq!(config.flower_pots, vec!["minecraft:potted_cactus".to_string()]);
        assert_eq!(config.max_tombstones_per_player, 5);
        assert!(config.check_distance_enabled);
    }
}
