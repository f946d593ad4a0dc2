pub mod camera;
pub mod colors;
pub mod components;
pub mod fade;
pub mod grid;
pub mod panel;
pub mod picking;
pub mod pointer;
pub mod resources;
pub mod systems;

pub use camera::*;
pub use colors::*;
pub use components::*;
pub use fade::*;
pub use grid::*;
pub use panel::*;
pub use picking::*;
pub use pointer::*;
pub use resources::*;
use systems::*;

use bevy::prelude::*;

use crate::core::PlaneSettings;

/// Displaced plane, orbit camera, debug panel and hover highlighting.
#[derive(Default)]
pub struct HoverPlanePlugin {
    pub settings: PlaneSettings,
}

impl HoverPlanePlugin {
    pub fn new(settings: PlaneSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for HoverPlanePlugin {
    fn build(&self, app: &mut App) {
        let settings = &self.settings;
        info!(
            "plane {}x{} with {}x{} segments",
            settings.grid.width,
            settings.grid.height,
            settings.grid.width_segments,
            settings.grid.height_segments
        );

        app.insert_resource(SettingsRes::new(settings.clone()))
            .insert_resource(GridRes(settings.grid))
            .insert_resource(NoiseRng::new(settings.seed))
            .insert_resource(FadeAnimations::new(settings.fade.overlap))
            .init_resource::<PointerNdc>()
            .init_resource::<ColorBuffer>()
            .init_resource::<PlaneGeometry>()
            .add_systems(
                Startup,
                (setup_scene, setup_camera, setup_plane, setup_panel),
            )
            .add_systems(
                Update,
                (
                    orbit_camera,
                    handle_panel_buttons,
                    (refresh_panel_values, rebuild_plane).run_if(resource_changed::<GridRes>),
                    track_pointer,
                    // Fades step before the highlighter so a fresh highlight
                    // survives the tick it was applied in
                    advance_fades,
                    highlight_hovered_face,
                    upload_colors,
                )
                    .chain(),
            );
    }
}
