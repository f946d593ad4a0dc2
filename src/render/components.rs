use bevy::prelude::*;

use crate::core::GridField;

/// Marker for the displaced plane entity.
#[derive(Component)]
pub struct PlaneMesh;

/// Orbit camera state. The camera sits on a sphere of `radius` around
/// `target`, placed by `yaw` (around Y) and `pitch` (above the XZ plane).
#[derive(Component, Clone, Copy, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub orbit_speed: f32,
    pub pan_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            radius: 5.0,
            yaw: 0.0,
            pitch: 0.0,
            orbit_speed: 0.01,
            pan_speed: 0.002,
        }
    }
}

impl OrbitCamera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            ..default()
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.radius
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

/// Root node of the debug panel
#[derive(Component)]
pub struct PanelRoot;

/// A `-`/`+` button stepping one grid field.
#[derive(Component, Clone, Copy)]
pub struct PanelButton {
    pub field: GridField,
    pub steps: i32,
}

/// Text showing the current value of a grid field.
#[derive(Component, Clone, Copy)]
pub struct PanelValue(pub GridField);
