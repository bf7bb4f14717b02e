use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Physical properties of a terrain block.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BlockFlags: u8 {
        const SOLID = 0b0000_0001;
        const FULL_CUBE = 0b0000_0010;
        const WATERLOGGED = 0b0000_0100;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fluid {
    Water,
    Lava,
}

/// Namespaced identifier of a marker block variant, e.g.
/// `minecraft:potted_poppy`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKind(pub String);

impl MarkerKind {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The subset of block state the tombstone logic needs to see.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum BlockState {
    #[default]
    Air,
    /// Any ordinary block, described by its flags.
    Terrain(BlockFlags),
    /// A source or flowing fluid block.
    Fluid(Fluid),
    /// Transparent solid footing laid under a tombstone.
    Placeholder,
    /// A tombstone marker.
    Marker(MarkerKind),
}

impl BlockState {
    pub const STONE: Self = Self::Terrain(BlockFlags::SOLID.union(BlockFlags::FULL_CUBE));
    pub const SLAB: Self = Self::Terrain(BlockFlags::SOLID);
    pub const FOLIAGE: Self = Self::Terrain(BlockFlags::empty());
    pub const WATER: Self = Self::Fluid(Fluid::Water);
    pub const LAVA: Self = Self::Fluid(Fluid::Lava);

    pub fn is_air(&self) -> bool {
        matches!(self, Self::Air)
    }

    /// Fluid occupying this block, including water inside a waterlogged block.
    pub fn fluid(&self) -> Option<Fluid> {
        match self {
            Self::Fluid(fluid) => Some(*fluid),
            Self::Terrain(flags) if flags.contains(BlockFlags::WATERLOGGED) => Some(Fluid::Water),
            _ => None,
        }
    }

    pub fn is_fluid_block(&self) -> bool {
        matches!(self, Self::Fluid(_))
    }

    pub fn is_solid(&self) -> bool {
        match self {
            Self::Terrain(flags) => flags.contains(BlockFlags::SOLID),
            Self::Placeholder => true,
            _ => false,
        }
    }

    pub fn is_full_cube(&self) -> bool {
        match self {
            Self::Terrain(flags) => flags.contains(BlockFlags::FULL_CUBE),
            Self::Placeholder => true,
            _ => false,
        }
    }

    /// Something a player can stand on without sinking or suffocating.
    pub fn is_safe_footing(&self) -> bool {
        !self.is_fluid_block() && self.is_solid() && self.is_full_cube()
    }

    pub fn marker(&self) -> Option<&MarkerKind> {
        match self {
            Self::Marker(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Kind of dimension a world belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DimensionKind {
    #[default]
    Overworld,
    Nether,
    /// Floating islands over an open void.
    End,
}
