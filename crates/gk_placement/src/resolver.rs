//! Tombstone position resolution.
//!
//! Turns an arbitrary death coordinate into a tombstone coordinate with safe
//! footing beneath it. Deaths in the void, mid-air, in water or in lava all
//! end up on something a player can walk back to.

use bevy::prelude::*;
use gk_core::{BlockPos, BlockState, BlockWorld, DimensionKind, Fluid};

/// Extra lift applied to void deaths in an End-type dimension, so the
/// tombstone does not always land on the spawn platform.
pub const END_VOID_LIFT: i32 = 60;

/// Where a tombstone goes, and the footing it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub tombstone: BlockPos,
    /// Block directly below the tombstone.
    pub footing: BlockPos,
    /// Set when the footing must be replaced by a placeholder block.
    pub footing_patch: Option<BlockPos>,
}

impl Placement {
    /// Write the placeholder footing, if one is needed.
    pub fn apply<W: BlockWorld + ?Sized>(&self, world: &mut W) {
        if let Some(pos) = self.footing_patch {
            world.set_block(pos, BlockState::Placeholder);
        }
    }
}

/// Compute the tombstone position for a death at `death`.
///
/// Pure: nothing is written to `world`. Every vertical scan is capped by the
/// world height, and a column with no usable ground ends with a patch at the
/// last scanned position.
pub fn resolve<W: BlockWorld + ?Sized>(death: BlockPos, world: &W) -> Placement {
    let bounds = world.bounds();
    let top = bounds.max_y - 1;
    let cap = bounds.height().max(1);
    let mut pos = death;

    let void_death = pos.y <= bounds.min_y;
    if void_death {
        pos.y = bounds.min_y + 1;
    } else if pos.y > top {
        pos.y = top;
    }

    if void_death && world.dimension() == DimensionKind::End {
        pos.y = (pos.y + END_VOID_LIFT).min(top);
        let mut steps = 0;
        while !world.is_air(pos) && pos.y < top && steps < cap {
            pos = pos.up();
            steps += 1;
        }
    }

    let mut steps = 0;
    while world.is_air(pos.down()) && pos.y > bounds.min_y + 1 && steps < cap {
        pos = pos.down();
        steps += 1;
    }

    // Landing on an existing marker resolves to that marker, so repeated
    // deaths in one spot share a tombstone.
    if world.block(pos.down()).marker().is_some() {
        pos = pos.down();
    }

    let mut footing = pos.down();
    let footing_state = world.block(footing);

    let footing_patch = match footing_state.fluid() {
        Some(fluid) => {
            pos = rise_through(world, pos, fluid, top, cap);
            // A tombstone already floating on this column is reused, never
            // buried under a second one.
            if world.block(pos) == BlockState::Placeholder
                && world.block(pos.up()).marker().is_some()
            {
                pos = pos.up();
            }
            footing = pos.down();
            let surface = world.block(footing);
            match fluid {
                Fluid::Water => (surface != BlockState::Placeholder).then_some(footing),
                Fluid::Lava => (!surface.is_solid()).then_some(footing),
            }
        }
        None if !footing_state.is_safe_footing() => Some(footing),
        None => None,
    };

    let tombstone = footing.up();
    debug!(
        "Resolved death at {} to tombstone at {} (patch: {:?})",
        death, tombstone, footing_patch
    );

    Placement {
        tombstone,
        footing,
        footing_patch,
    }
}

fn rise_through<W: BlockWorld + ?Sized>(
    world: &W,
    mut pos: BlockPos,
    fluid: Fluid,
    top: i32,
    cap: i32,
) -> BlockPos {
    let mut steps = 0;
    while world.fluid(pos) == Some(fluid) && pos.y < top && steps < cap {
        pos = pos.up();
        steps += 1;
    }
    pos
}
