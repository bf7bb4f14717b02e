use bevy::prelude::*;

pub mod catalog;
pub mod select;

pub use catalog::MarkerCatalog;
pub use select::{choose_marker, eligible_markers};

/// Marker plugin. Installs the vanilla marker catalog unless the host
/// provided its own.
pub struct GkMarkerPlugin;

impl Plugin for GkMarkerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MarkerCatalog>();
    }
}
