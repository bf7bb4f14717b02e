//! Per-world tombstone lifecycle: death, respawn, proximity return and
//! direct interaction.

use bevy::prelude::*;
use gk_core::{
    BlockPos, BlockState, BlockWorld, Inventory, PlayerId, PlayerIdentity, TombstoneConfig,
};
use gk_marker::{choose_marker, MarkerCatalog};
use gk_placement::resolve;
use gk_store::{LootRecord, TombstoneStore};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Chebyshev radius scanned around a respawned player each tick.
pub const RETURN_SCAN_RADIUS: i32 = 4;

/// Where a player stands in the tombstone lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathState {
    Alive,
    /// Died with a tombstone, has not respawned yet.
    AwaitingRespawn,
    /// Respawned with an unclaimed tombstone; eligible for auto-return.
    PendingReturn,
}

/// The player a lifecycle call acts on.
pub struct PlayerRef<'a> {
    pub identity: &'a PlayerIdentity,
    pub position: BlockPos,
    pub inventory: &'a mut Inventory,
}

/// What the marker choice draws from.
#[derive(Clone, Copy)]
pub struct MarkerSource<'a> {
    pub config: &'a TombstoneConfig,
    pub catalog: &'a MarkerCatalog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeathOutcome {
    /// A tombstone holds the inventory; the host must not drop items.
    Vetoed {
        tombstone: BlockPos,
        merged: bool,
        evicted: usize,
    },
    /// Not handled here; the host's default death handling applies.
    Skipped,
}

impl DeathOutcome {
    pub fn is_vetoed(&self) -> bool {
        matches!(self, Self::Vetoed { .. })
    }
}

/// Items handed back by a successful claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub position: BlockPos,
    pub returned: usize,
    /// Items that did not fit and were dropped at the tombstone.
    pub dropped: usize,
    /// The marker was removed because no other loot remains there.
    pub cleared: bool,
}

/// Per-world lifecycle service.
///
/// Holds the transient per-player state; loot itself lives in the
/// [`TombstoneStore`]. A claim only succeeds by taking the record out of the
/// store, which is what keeps a tick scan and an interaction from returning
/// the same items twice.
#[derive(Resource)]
pub struct LifecycleController {
    awaiting_respawn: HashSet<PlayerId>,
    pending_return: HashSet<PlayerId>,
    rng: ChaCha8Rng,
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }
}

impl LifecycleController {
    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            awaiting_respawn: HashSet::new(),
            pending_return: HashSet::new(),
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn state(&self, player: PlayerId) -> DeathState {
        if self.pending_return.contains(&player) {
            DeathState::PendingReturn
        } else if self.awaiting_respawn.contains(&player) {
            DeathState::AwaitingRespawn
        } else {
            DeathState::Alive
        }
    }

    pub fn has_pending_returns(&self) -> bool {
        !self.pending_return.is_empty()
    }

    /// Move the dying player's inventory into a tombstone.
    pub fn on_death<W: BlockWorld + ?Sized>(
        &mut self,
        world: &mut W,
        store: &mut TombstoneStore,
        markers: MarkerSource<'_>,
        player: PlayerRef<'_>,
    ) -> DeathOutcome {
        let identity = player.identity;
        if identity.fake {
            info!("Skipping fake player {}", identity.name);
            return DeathOutcome::Skipped;
        }
        info!("Player {} died, creating tombstone", identity.name);

        let placement = resolve(player.position, &*world);
        placement.apply(world);
        let tombstone = placement.tombstone;

        let items = player.inventory.drain();
        let outcome = store.add(tombstone, LootRecord::new(identity.id, items));
        for (pos, _) in &outcome.evicted {
            if *pos != tombstone && !store.contains(*pos) {
                clear_tombstone_blocks(world, *pos);
            }
        }

        if world.block(tombstone).marker().is_none() {
            let kind = choose_marker(markers.config, markers.catalog, &mut self.rng);
            world.set_block(tombstone, BlockState::Marker(kind));
        }

        self.pending_return.remove(&identity.id);
        self.awaiting_respawn.insert(identity.id);
        info!("Created tombstone for {} at {}", identity.name, tombstone);

        DeathOutcome::Vetoed {
            tombstone,
            merged: outcome.merged,
            evicted: outcome.evicted.len(),
        }
    }

    /// Arm proximity return for a player who died with a tombstone.
    pub fn on_respawn(&mut self, identity: &PlayerIdentity) -> bool {
        if !self.awaiting_respawn.remove(&identity.id) {
            return false;
        }
        self.pending_return.insert(identity.id);
        info!("Player {} respawned, item return enabled", identity.name);
        true
    }

    /// Per-tick proximity check. Claims the player's oldest tombstone within
    /// [`RETURN_SCAN_RADIUS`].
    pub fn on_tick<W: BlockWorld + ?Sized>(
        &mut self,
        world: &mut W,
        store: &mut TombstoneStore,
        player: PlayerRef<'_>,
    ) -> Option<Claim> {
        let owner = player.identity.id;
        if !self.pending_return.contains(&owner) {
            return None;
        }
        let nearby = store
            .positions_for(owner)
            .into_iter()
            .find(|pos| pos.chebyshev_distance(player.position) <= RETURN_SCAN_RADIUS)?;
        self.claim(world, store, nearby, player)
    }

    /// Right-click on a block. Claims the player's loot if `hit` is a marker,
    /// whatever the distance or state. The host continues its own handling
    /// either way.
    pub fn on_use_block<W: BlockWorld + ?Sized>(
        &mut self,
        world: &mut W,
        store: &mut TombstoneStore,
        player: PlayerRef<'_>,
        hit: BlockPos,
    ) -> Option<Claim> {
        if world.block(hit).marker().is_none() {
            return None;
        }
        self.claim(world, store, hit, player)
    }

    fn claim<W: BlockWorld + ?Sized>(
        &mut self,
        world: &mut W,
        store: &mut TombstoneStore,
        pos: BlockPos,
        player: PlayerRef<'_>,
    ) -> Option<Claim> {
        let identity = player.identity;
        let record = store.remove(pos, identity.id)?;
        self.pending_return.remove(&identity.id);
        self.awaiting_respawn.remove(&identity.id);

        let mut returned = 0;
        let mut dropped = 0;
        for stack in record.into_items() {
            match player.inventory.offer(stack) {
                Ok(()) => returned += 1,
                Err(overflow) => {
                    world.drop_item(pos, overflow);
                    dropped += 1;
                }
            }
        }

        let cleared = !store.contains(pos);
        if cleared {
            clear_tombstone_blocks(world, pos);
        }
        info!(
            "Player {} recovered {} items from tombstone at {} ({} dropped)",
            identity.name, returned, pos, dropped
        );

        Some(Claim {
            position: pos,
            returned,
            dropped,
            cleared,
        })
    }
}

/// Remove the marker at `pos` and its placeholder footing, unless the
/// footing is the world floor.
fn clear_tombstone_blocks<W: BlockWorld + ?Sized>(world: &mut W, pos: BlockPos) {
    let footing = pos.down();
    if world.block(footing) == BlockState::Placeholder && footing.y != world.bounds().min_y {
        world.remove_block(footing);
    }
    if world.block(pos).marker().is_some() {
        world.remove_block(pos);
    }
}
