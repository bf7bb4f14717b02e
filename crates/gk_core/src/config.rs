use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tombstone settings, loaded once at startup.
///
/// Missing fields fall back to their defaults, so an older config file keeps
/// working after new options are added.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TombstoneConfig {
    /// `true`: only the listed markers may be used.
    /// `false`: the listed markers are excluded.
    pub whitelist_mode: bool,
    /// Namespaced marker ids, e.g. `minecraft:potted_poppy`.
    pub flower_pots: Vec<String>,
    /// Live tombstones kept per player; 0 means unlimited.
    pub max_tombstones_per_player: u32,
    /// Automatically return items when a respawned player walks up to
    /// their tombstone.
    pub check_distance_enabled: bool,
}

impl Default for TombstoneConfig {
    fn default() -> Self {
        Self {
            whitelist_mode: false,
            flower_pots: Vec::new(),
            max_tombstones_per_player: 0,
            check_distance_enabled: true,
        }
    }
}

impl TombstoneConfig {
    pub fn lists_marker(&self, id: &str) -> bool {
        self.flower_pots.iter().any(|listed| listed == id)
    }
}
