//! Position-keyed store of unclaimed tombstone loot.

use bevy::prelude::*;
use gk_core::{BlockPos, PlayerId};
use std::collections::HashMap;

use crate::record::LootRecord;
use crate::saved::{SavedTombstone, SavedTombstones};

/// Result of [`TombstoneStore::add`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// The items were appended to a record the owner already had there.
    pub merged: bool,
    /// Records dropped to keep the owner under the per-player limit, oldest
    /// first.
    pub evicted: Vec<(BlockPos, LootRecord)>,
}

/// Unclaimed loot for one world.
///
/// A position can hold records for several owners, but never two for the
/// same owner. Every record carries an insertion sequence number, which
/// decides eviction order.
#[derive(Resource, Debug, Clone, Default)]
pub struct TombstoneStore {
    entries: HashMap<BlockPos, Vec<LootRecord>>,
    order: HashMap<(BlockPos, PlayerId), u64>,
    max_per_owner: u32,
    next_seq: u64,
    dirty: bool,
}

impl TombstoneStore {
    /// Empty store keeping at most `max_per_owner` records per player
    /// (0 = unlimited).
    pub fn with_limit(max_per_owner: u32) -> Self {
        Self {
            max_per_owner,
            ..default()
        }
    }

    pub fn max_per_owner(&self) -> u32 {
        self.max_per_owner
    }

    /// Store `record` at `pos`, merging into the owner's existing record
    /// there. A merged record counts as freshly added.
    pub fn add(&mut self, pos: BlockPos, record: LootRecord) -> AddOutcome {
        let owner = record.owner();
        let seq = self.bump_seq();
        let records = self.entries.entry(pos).or_default();

        let merged = match records.iter_mut().find(|r| r.owner() == owner) {
            Some(existing) => {
                existing.append(record.into_items());
                info!("Merged tombstone data for {} at {}", owner, pos);
                true
            }
            None => {
                records.push(record);
                info!("Added tombstone for {} at {}", owner, pos);
                false
            }
        };
        self.order.insert((pos, owner), seq);

        let evicted = self.enforce_limit(owner);
        self.dirty = true;
        AddOutcome { merged, evicted }
    }

    /// Take the record `owner` has at `pos`. Check and delete happen in one
    /// step, so a record can only ever be claimed once.
    pub fn remove(&mut self, pos: BlockPos, owner: PlayerId) -> Option<LootRecord> {
        let records = self.entries.get_mut(&pos)?;
        let index = records.iter().position(|r| r.owner() == owner)?;
        let record = records.remove(index);
        if records.is_empty() {
            self.entries.remove(&pos);
        }
        self.order.remove(&(pos, owner));
        self.dirty = true;
        info!("Removed tombstone data for {} at {}", owner, pos);
        Some(record)
    }

    pub fn lookup(&self, pos: BlockPos) -> &[LootRecord] {
        self.entries.get(&pos).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn lookup_owner(&self, pos: BlockPos, owner: PlayerId) -> Option<&LootRecord> {
        self.lookup(pos).iter().find(|r| r.owner() == owner)
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        self.entries.contains_key(&pos)
    }

    pub fn positions(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.entries.keys().copied()
    }

    /// Positions where `owner` has loot, oldest first.
    pub fn positions_for(&self, owner: PlayerId) -> Vec<BlockPos> {
        let mut owned: Vec<(u64, BlockPos)> = self
            .order
            .iter()
            .filter(|((_, o), _)| *o == owner)
            .map(|((pos, _), seq)| (*seq, *pos))
            .collect();
        owned.sort_unstable_by_key(|(seq, _)| *seq);
        owned.into_iter().map(|(_, pos)| pos).collect()
    }

    pub fn owner_count(&self, owner: PlayerId) -> usize {
        self.order.keys().filter(|(_, o)| *o == owner).count()
    }

    /// Number of live records across all positions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Report and clear the dirty flag. Used by the save cycle.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Snapshot in insertion order.
    pub fn to_saved(&self) -> SavedTombstones {
        let mut ordered: Vec<(u64, BlockPos, &LootRecord)> = self
            .entries
            .iter()
            .flat_map(|(pos, records)| {
                records.iter().map(move |record| {
                    let seq = self.order.get(&(*pos, record.owner())).copied().unwrap_or(0);
                    (seq, *pos, record)
                })
            })
            .collect();
        ordered.sort_unstable_by_key(|(seq, _, _)| *seq);

        SavedTombstones {
            tombstones: ordered
                .into_iter()
                .map(|(_, position, record)| SavedTombstone {
                    position,
                    owner: record.owner(),
                    items: record.items().to_vec(),
                })
                .collect(),
        }
    }

    /// Rebuild a store from its durable form. File order becomes insertion
    /// order; the limit is applied on the next add, not retroactively.
    pub fn from_saved(saved: SavedTombstones, max_per_owner: u32) -> Self {
        let mut store = Self::with_limit(max_per_owner);
        for entry in saved.tombstones {
            let seq = store.bump_seq();
            let records = store.entries.entry(entry.position).or_default();
            match records.iter_mut().find(|r| r.owner() == entry.owner) {
                Some(existing) => existing.append(entry.items),
                None => records.push(LootRecord::new(entry.owner, entry.items)),
            }
            store.order.insert((entry.position, entry.owner), seq);
        }
        store
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn enforce_limit(&mut self, owner: PlayerId) -> Vec<(BlockPos, LootRecord)> {
        let limit = self.max_per_owner as usize;
        if limit == 0 {
            return Vec::new();
        }
        let owned = self.positions_for(owner);
        if owned.len() <= limit {
            return Vec::new();
        }

        let surplus = owned.len() - limit;
        owned
            .into_iter()
            .take(surplus)
            .filter_map(|pos| {
                let record = self.remove(pos, owner)?;
                warn!(
                    "Tombstone limit ({}) reached for {}, evicted oldest at {}",
                    limit, owner, pos
                );
                Some((pos, record))
            })
            .collect()
    }
}
