use gk_core::{BlockPos, ItemStack, PlayerId};
use serde::{Deserialize, Serialize};

/// Durable form of the tombstone store: one entry per (position, owner),
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTombstones {
    pub tombstones: Vec<SavedTombstone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTombstone {
    pub position: BlockPos,
    pub owner: PlayerId,
    pub items: Vec<ItemStack>,
}
