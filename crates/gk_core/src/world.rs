use crate::block::{BlockState, DimensionKind, Fluid};
use crate::coords::{BlockPos, WorldBounds};
use crate::item::ItemStack;

/// Block access the host world exposes to the tombstone logic.
///
/// Reads and writes are synchronous and cheap; implementations should treat
/// positions outside [`WorldBounds`] as air.
pub trait BlockWorld {
    fn bounds(&self) -> WorldBounds;

    fn dimension(&self) -> DimensionKind;

    fn block(&self, pos: BlockPos) -> BlockState;

    fn set_block(&mut self, pos: BlockPos, state: BlockState);

    /// Spawn `stack` as a dropped item at `pos`.
    fn drop_item(&mut self, pos: BlockPos, stack: ItemStack);

    fn is_air(&self, pos: BlockPos) -> bool {
        self.block(pos).is_air()
    }

    fn fluid(&self, pos: BlockPos) -> Option<Fluid> {
        self.block(pos).fluid()
    }

    fn remove_block(&mut self, pos: BlockPos) {
        self.set_block(pos, BlockState::Air);
    }
}
