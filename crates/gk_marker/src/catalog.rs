use bevy::prelude::*;
use gk_core::MarkerKind;

/// Potted plants available in a vanilla world, minus the bare pot.
const VANILLA_POTTED: &[&str] = &[
    "minecraft:potted_oak_sapling",
    "minecraft:potted_spruce_sapling",
    "minecraft:potted_birch_sapling",
    "minecraft:potted_jungle_sapling",
    "minecraft:potted_acacia_sapling",
    "minecraft:potted_cherry_sapling",
    "minecraft:potted_dark_oak_sapling",
    "minecraft:potted_mangrove_propagule",
    "minecraft:potted_fern",
    "minecraft:potted_dandelion",
    "minecraft:potted_poppy",
    "minecraft:potted_blue_orchid",
    "minecraft:potted_allium",
    "minecraft:potted_azure_bluet",
    "minecraft:potted_red_tulip",
    "minecraft:potted_orange_tulip",
    "minecraft:potted_white_tulip",
    "minecraft:potted_pink_tulip",
    "minecraft:potted_oxeye_daisy",
    "minecraft:potted_cornflower",
    "minecraft:potted_lily_of_the_valley",
    "minecraft:potted_wither_rose",
    "minecraft:potted_torchflower",
    "minecraft:potted_red_mushroom",
    "minecraft:potted_brown_mushroom",
    "minecraft:potted_dead_bush",
    "minecraft:potted_cactus",
    "minecraft:potted_bamboo",
    "minecraft:potted_crimson_fungus",
    "minecraft:potted_warped_fungus",
    "minecraft:potted_crimson_roots",
    "minecraft:potted_warped_roots",
    "minecraft:potted_azalea_bush",
    "minecraft:potted_flowering_azalea_bush",
];

/// Every block variant that can stand in as a tombstone marker.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct MarkerCatalog {
    pub variants: Vec<MarkerKind>,
    /// The plain variant. Never picked at random.
    pub bare: MarkerKind,
    /// Used when filtering leaves nothing to choose from.
    pub fallback: MarkerKind,
}

impl MarkerCatalog {
    pub fn new(variants: Vec<MarkerKind>, bare: MarkerKind, fallback: MarkerKind) -> Self {
        Self {
            variants,
            bare,
            fallback,
        }
    }
}

impl Default for MarkerCatalog {
    fn default() -> Self {
        let bare = MarkerKind::new("minecraft:flower_pot");
        let mut variants = vec![bare.clone()];
        variants.extend(VANILLA_POTTED.iter().map(|id| MarkerKind::new(*id)));
        Self::new(variants, bare, MarkerKind::new("minecraft:potted_dandelion"))
    }
}
