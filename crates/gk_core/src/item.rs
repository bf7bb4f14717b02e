use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Opaque item payload owned by the host.
///
/// The bytes are carried verbatim; nothing in this workspace looks inside.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemStack(Vec<u8>);

impl ItemStack {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self(payload.into())
    }

    pub fn payload(&self) -> &[u8] {
        &self.0
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.0
    }
}

/// Slot-based player inventory. `None` marks an empty slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Component)]
pub struct Inventory {
    pub slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            slots: vec![None; slots],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Remove every stack in slot order, skipping empty slots.
    pub fn drain(&mut self) -> Vec<ItemStack> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    /// Put `stack` in the first empty slot. Hands the stack back when the
    /// inventory is full.
    pub fn offer(&mut self, stack: ItemStack) -> Result<(), ItemStack> {
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(stack);
                Ok(())
            }
            None => Err(stack),
        }
    }
}
