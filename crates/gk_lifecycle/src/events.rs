use bevy::prelude::*;
use gk_core::{BlockPos, PlayerId};

/// Host → plugin: a player entity is about to die.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDeathEvent {
    pub player: Entity,
}

/// Host → plugin: a player respawned. `old` and `new` may be the same entity.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerRespawnEvent {
    pub old: Entity,
    pub new: Entity,
}

/// Host → plugin: a player used (right-clicked) the block at `hit`.
/// Never consumed; the host keeps processing it.
#[derive(Event, Debug, Clone, Copy)]
pub struct UseBlockEvent {
    pub player: Entity,
    pub hit: BlockPos,
}

/// Plugin → host: the death was handled by a tombstone and the default
/// item drop must be suppressed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathVetoed {
    pub player: Entity,
    pub tombstone: BlockPos,
}

/// Plugin → host: a tombstone was placed or extended. Meant for chat.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TombstonePlaced {
    pub player: Entity,
    pub owner: PlayerId,
    pub position: BlockPos,
    pub merged: bool,
}

/// Plugin → host: a player got their items back.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TombstoneClaimed {
    pub player: Entity,
    pub owner: PlayerId,
    pub position: BlockPos,
    pub returned: usize,
    pub dropped: usize,
}
