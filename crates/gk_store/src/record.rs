use gk_core::{ItemStack, PlayerId};

/// Items one player left behind at one tombstone.
///
/// The item list is owned by the record and only grows by appending, so the
/// order items come back in matches the order they were lost in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootRecord {
    owner: PlayerId,
    items: Vec<ItemStack>,
}

impl LootRecord {
    pub fn new(owner: PlayerId, items: Vec<ItemStack>) -> Self {
        Self { owner, items }
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn items(&self) -> &[ItemStack] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ItemStack> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn append(&mut self, items: Vec<ItemStack>) {
        self.items.extend(items);
    }
}
