use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_camera::{PerspectiveProjection, Projection};

use super::components::OrbitCamera;
use super::resources::SettingsRes;

pub fn setup_camera(mut commands: Commands, settings: Res<SettingsRes>) {
    let cam = &settings.0.camera;
    let orbit = OrbitCamera::looking_at(Vec3::from_array(cam.position), Vec3::from_array(cam.target));

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: cam.fov_degrees.to_radians(),
            near: cam.near,
            far: cam.far,
            ..default()
        }),
        orbit.transform(),
        orbit,
    ));
}

/// Left drag orbits, right drag pans the target, wheel zooms. Ignored while
/// the pointer is on a panel button.
pub fn orbit_camera(
    mouse: Res<ButtonInput<MouseButton>>,
    mut wheel: MessageReader<MouseWheel>,
    mut motion: MessageReader<MouseMotion>,
    interactions: Query<&Interaction>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    // Collect events first (they can only be read once)
    let scroll_y: f32 = wheel.read().map(|e| e.y).sum();
    let mouse_delta: Vec2 = motion.read().map(|e| e.delta).sum();

    if interactions.iter().any(|i| *i != Interaction::None) {
        return;
    }

    for (mut view, mut transform) in cameras.iter_mut() {
        let mut changed = false;

        if scroll_y.abs() > 0.001 {
            view.radius = (view.radius * (1.0 - scroll_y * 0.1)).clamp(0.5, 500.0);
            changed = true;
        }

        if mouse_delta != Vec2::ZERO {
            if mouse.pressed(MouseButton::Left) {
                view.yaw -= mouse_delta.x * view.orbit_speed;
                view.pitch = (view.pitch - mouse_delta.y * view.orbit_speed).clamp(-1.5, 1.5);
                changed = true;
            }

            if mouse.pressed(MouseButton::Right) {
                let right = transform.right();
                let up = transform.up();
                let pan = (-*right * mouse_delta.x + *up * mouse_delta.y)
                    * view.pan_speed
                    * view.radius;
                view.target += pan;
                changed = true;
            }
        }

        if changed {
            *transform = view.transform();
        }
    }
}
