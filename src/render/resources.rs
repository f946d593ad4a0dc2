use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::grid::GridMesh;
use crate::core::{GridConfig, PlaneSettings};

#[derive(Resource, Clone)]
pub struct SettingsRes(pub PlaneSettings);

impl SettingsRes {
    pub fn new(settings: PlaneSettings) -> Self {
        Self(settings)
    }
}

/// Live grid configuration. Any change rebuilds the plane.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct GridRes(pub GridConfig);

/// CPU copy of the current plane, matching the uploaded mesh.
#[derive(Resource, Default)]
pub struct PlaneGeometry(pub GridMesh);

/// Mesh asset the plane entity renders. Reused across rebuilds.
#[derive(Resource)]
pub struct PlaneHandle(pub Handle<Mesh>);

/// Source of the per-vertex depth noise.
#[derive(Resource)]
pub struct NoiseRng(pub ChaCha8Rng);

impl NoiseRng {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(clock_seed);
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    // SystemTime is unavailable in the browser
    (js_sys::Date::now() * 1000.0) as u64
}

/// Roughly an overcast day.
const LIGHT_LUX: f32 = 1000.0;

pub fn setup_scene(mut commands: Commands) {
    // Front and back lights so both sides of the plane are lit
    commands.spawn((
        DirectionalLight {
            illuminance: LIGHT_LUX,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: LIGHT_LUX,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
