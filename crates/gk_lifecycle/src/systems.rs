//! Thin systems forwarding host events to the [`LifecycleController`].

use bevy::prelude::*;
use gk_core::{BlockPosition, BlockWorld, Inventory, PlayerIdentity, TombstoneConfig};
use gk_marker::MarkerCatalog;
use gk_store::TombstoneStore;

use crate::controller::{
    Claim, DeathOutcome, DeathState, LifecycleController, MarkerSource, PlayerRef,
};
use crate::events::{
    DeathVetoed, PlayerDeathEvent, PlayerRespawnEvent, TombstoneClaimed, TombstonePlaced,
    UseBlockEvent,
};

/// Player entities as the host exposes them.
pub type PlayerQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static PlayerIdentity,
        &'static BlockPosition,
        &'static mut Inventory,
    ),
>;

pub fn handle_deaths<W: BlockWorld + Resource>(
    mut deaths: EventReader<PlayerDeathEvent>,
    mut players: PlayerQuery,
    mut world: ResMut<W>,
    mut store: ResMut<TombstoneStore>,
    mut controller: ResMut<LifecycleController>,
    config: Res<TombstoneConfig>,
    catalog: Res<MarkerCatalog>,
    mut vetoed: EventWriter<DeathVetoed>,
    mut placed: EventWriter<TombstonePlaced>,
) {
    let markers = MarkerSource {
        config: &*config,
        catalog: &*catalog,
    };

    for death in deaths.read() {
        let Ok((entity, identity, position, inventory)) = players.get_mut(death.player) else {
            warn!("Death event for unknown player entity {:?}", death.player);
            continue;
        };

        let outcome = controller.on_death(
            &mut *world,
            &mut *store,
            markers,
            PlayerRef {
                identity,
                position: position.0,
                inventory: inventory.into_inner(),
            },
        );

        if let DeathOutcome::Vetoed {
            tombstone, merged, ..
        } = outcome
        {
            vetoed.send(DeathVetoed {
                player: entity,
                tombstone,
            });
            placed.send(TombstonePlaced {
                player: entity,
                owner: identity.id,
                position: tombstone,
                merged,
            });
        }
    }
}

pub fn handle_respawns(
    mut respawns: EventReader<PlayerRespawnEvent>,
    players: Query<&PlayerIdentity>,
    mut controller: ResMut<LifecycleController>,
) {
    for respawn in respawns.read() {
        let Ok(identity) = players.get(respawn.new).or_else(|_| players.get(respawn.old)) else {
            warn!("Respawn event for unknown player entity {:?}", respawn.new);
            continue;
        };
        controller.on_respawn(identity);
    }
}

pub fn handle_block_use<W: BlockWorld + Resource>(
    mut uses: EventReader<UseBlockEvent>,
    mut players: PlayerQuery,
    mut world: ResMut<W>,
    mut store: ResMut<TombstoneStore>,
    mut controller: ResMut<LifecycleController>,
    mut claimed: EventWriter<TombstoneClaimed>,
) {
    for use_block in uses.read() {
        let Ok((entity, identity, position, inventory)) = players.get_mut(use_block.player) else {
            continue;
        };
        if !store.contains(use_block.hit) {
            continue;
        }

        let claim = controller.on_use_block(
            &mut *world,
            &mut *store,
            PlayerRef {
                identity,
                position: position.0,
                inventory: inventory.into_inner(),
            },
            use_block.hit,
        );
        if let Some(claim) = claim {
            claimed.send(claimed_event(entity, identity, &claim));
        }
    }
}

pub fn scan_for_tombstones<W: BlockWorld + Resource>(
    mut players: PlayerQuery,
    mut world: ResMut<W>,
    mut store: ResMut<TombstoneStore>,
    mut controller: ResMut<LifecycleController>,
    mut claimed: EventWriter<TombstoneClaimed>,
) {
    if !controller.has_pending_returns() {
        return;
    }

    for (entity, identity, position, inventory) in players.iter_mut() {
        if controller.state(identity.id) != DeathState::PendingReturn {
            continue;
        }
        let claim = controller.on_tick(
            &mut *world,
            &mut *store,
            PlayerRef {
                identity,
                position: position.0,
                inventory: inventory.into_inner(),
            },
        );
        if let Some(claim) = claim {
            claimed.send(claimed_event(entity, identity, &claim));
        }
    }
}

/// Run condition for the proximity scan.
pub fn distance_check_enabled(config: Res<TombstoneConfig>) -> bool {
    config.check_distance_enabled
}

fn claimed_event(player: Entity, identity: &PlayerIdentity, claim: &Claim) -> TombstoneClaimed {
    TombstoneClaimed {
        player,
        owner: identity.id,
        position: claim.position,
        returned: claim.returned,
        dropped: claim.dropped,
    }
}
