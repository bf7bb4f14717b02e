use gk_core::{MarkerKind, TombstoneConfig};
use rand::prelude::*;

use crate::catalog::MarkerCatalog;

/// Markers eligible under the config's allow/deny list, in catalog order.
pub fn eligible_markers<'a>(
    config: &TombstoneConfig,
    catalog: &'a MarkerCatalog,
) -> Vec<&'a MarkerKind> {
    catalog
        .variants
        .iter()
        .filter(|kind| **kind != catalog.bare)
        .filter(|kind| config.whitelist_mode == config.lists_marker(kind.id()))
        .collect()
}

/// Pick a marker uniformly from the eligible set, or the catalog fallback
/// when nothing is eligible.
pub fn choose_marker<R: Rng + ?Sized>(
    config: &TombstoneConfig,
    catalog: &MarkerCatalog,
    rng: &mut R,
) -> MarkerKind {
    eligible_markers(config, catalog)
        .choose(rng)
        .map(|kind| (*kind).clone())
        .unwrap_or_else(|| catalog.fallback.clone())
}
