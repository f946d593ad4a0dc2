use bevy::prelude::*;

use crate::core::PlaneSettings;
use crate::render::HoverPlanePlugin;

#[cfg(not(target_arch = "wasm32"))]
pub fn run_plane(settings: PlaneSettings) {
    let bg = settings.background;
    App::new()
        .insert_resource(ClearColor(bg.into()))
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "hover-plane".into(),
                    ..default()
                }),
                ..default()
            }),
            HoverPlanePlugin::new(settings),
        ))
        .run();
}

#[cfg(target_arch = "wasm32")]
pub fn run_plane(settings: PlaneSettings, canvas_id: &str) {
    let bg = settings.background;
    App::new()
        .insert_resource(ClearColor(bg.into()))
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{}", canvas_id)),
                    fit_canvas_to_parent: true,
                    ..default()
                }),
                ..default()
            }),
            HoverPlanePlugin::new(settings),
        ))
        .run();
}
