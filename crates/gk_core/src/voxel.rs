use bevy::prelude::*;
use std::collections::HashMap;

use crate::block::{BlockState, DimensionKind};
use crate::coords::{BlockPos, WorldBounds};
use crate::item::ItemStack;
use crate::world::BlockWorld;

/// Sparse in-memory block world.
///
/// Unset positions are air. Useful as the world resource of a headless
/// server, and for exercising placement against hand-built terrain.
#[derive(Resource, Debug, Clone, Default)]
pub struct VoxelWorld {
    pub dimension: DimensionKind,
    pub bounds: WorldBounds,
    blocks: HashMap<BlockPos, BlockState>,
    dropped: Vec<(BlockPos, ItemStack)>,
}

impl VoxelWorld {
    pub fn new(dimension: DimensionKind, bounds: WorldBounds) -> Self {
        Self {
            dimension,
            bounds,
            blocks: HashMap::new(),
            dropped: Vec::new(),
        }
    }

    /// Fill every layer from `from_y` to `to_y` (inclusive) over the square
    /// `[-half, half]` on x and z.
    pub fn fill_layers(
        &mut self,
        half: i32,
        from_y: i32,
        to_y: i32,
        state: BlockState,
    ) -> &mut Self {
        for x in -half..=half {
            for z in -half..=half {
                for y in from_y..=to_y {
                    self.set_block(BlockPos::new(x, y, z), state.clone());
                }
            }
        }
        self
    }

    /// Items spilled into the world, in drop order.
    pub fn dropped_items(&self) -> &[(BlockPos, ItemStack)] {
        &self.dropped
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl BlockWorld for VoxelWorld {
    fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn dimension(&self) -> DimensionKind {
        self.dimension
    }

    fn block(&self, pos: BlockPos) -> BlockState {
        if !self.bounds.contains_y(pos.y) {
            return BlockState::Air;
        }
        self.blocks.get(&pos).cloned().unwrap_or_default()
    }

    fn set_block(&mut self, pos: BlockPos, state: BlockState) {
        if !self.bounds.contains_y(pos.y) {
            return;
        }
        if state.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, state);
        }
    }

    fn drop_item(&mut self, pos: BlockPos, stack: ItemStack) {
        self.dropped.push((pos, stack));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_air_and_ignores_writes() {
        let mut world = VoxelWorld::new(DimensionKind::Overworld, WorldBounds::new(0, 16));
        world.set_block(BlockPos::new(0, 16, 0), BlockState::STONE);
        world.set_block(BlockPos::new(0, -1, 0), BlockState::STONE);
        assert!(world.is_air(BlockPos::new(0, 16, 0)));
        assert_eq!(world.block_count(), 0);
    }

    #[test]
    fn writing_air_clears_the_block() {
        let mut world = VoxelWorld::default();
        world.fill_layers(1, 0, 0, BlockState::STONE);
        assert_eq!(world.block_count(), 9);
        world.remove_block(BlockPos::new(0, 0, 0));
        assert_eq!(world.block_count(), 8);
    }
}
