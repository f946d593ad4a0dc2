//! Pointer ray casting against the plane and the hover highlight.

use bevy::prelude::*;
use bevy_math::Ray3d;

use super::colors::ColorBuffer;
use super::components::{OrbitCamera, PlaneMesh};
use super::fade::{Fade, FadeAnimations};
use super::pointer::PointerNdc;
use super::resources::{PlaneGeometry, SettingsRes};
use crate::core::PlaneSettings;

const EPSILON: f32 = 1e-7;

/// The nearest face under a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceHit {
    pub face: [u32; 3],
    pub distance: f32,
    pub point: Vec3,
}

/// Unproject `ndc` through a camera. Bevy projections are reverse-Z, so the
/// near plane sits at depth 1 and infinity at depth 0.
pub fn ray_from_ndc(world_from_clip: Mat4, ndc: Vec2) -> Option<Ray3d> {
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Möller–Trumbore, hitting both sides. Returns the distance along the ray.
pub fn intersect_triangle(ray: Ray3d, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    let dir = *ray.direction;
    let e1 = b - a;
    let e2 = c - a;

    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = det.recip();

    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

/// Cast `ray` (mesh-local) and, on a hit, paint the face with the hover color
/// and start a fade back to the base color.
pub fn highlight_face(
    geometry: &PlaneGeometry,
    ray: Ray3d,
    settings: &PlaneSettings,
    colors: &mut ColorBuffer,
    fades: &mut FadeAnimations,
) -> Option<FaceHit> {
    let hit = geometry.0.raycast(ray)?;

    for index in hit.face {
        colors.set_vertex_color(index, settings.hover_color);
    }
    fades.start(Fade::new(
        settings.hover_color,
        settings.base_color,
        hit.face,
        &settings.fade,
    ));

    Some(hit)
}

/// Ray through `ndc` from where the orbit camera is now. Reading the orbit
/// state rather than `GlobalTransform` keeps picking in step with a camera
/// moved earlier in the same frame.
pub fn orbit_ray(orbit: &OrbitCamera, clip_from_view: Mat4, ndc: Vec2) -> Option<Ray3d> {
    let world_from_view = Mat4::from(GlobalTransform::from(orbit.transform()).affine());
    ray_from_ndc(world_from_view * clip_from_view.inverse(), ndc)
}

pub fn highlight_hovered_face(
    pointer: Res<PointerNdc>,
    settings: Res<SettingsRes>,
    geometry: Res<PlaneGeometry>,
    cameras: Query<(&Camera, &OrbitCamera)>,
    planes: Query<&GlobalTransform, With<PlaneMesh>>,
    mut colors: ResMut<ColorBuffer>,
    mut fades: ResMut<FadeAnimations>,
) {
    let Some(ndc) = pointer.0 else { return };
    let Ok((camera, orbit)) = cameras.single() else {
        return;
    };
    let Ok(plane_transform) = planes.single() else {
        return;
    };

    let Some(ray) = orbit_ray(orbit, camera.clip_from_view(), ndc) else {
        return;
    };

    // Bring the ray into the plane's local space
    let local_from_world = Mat4::from(plane_transform.affine()).inverse();
    let origin = local_from_world.transform_point3(ray.origin);
    let Ok(direction) = Dir3::new(local_from_world.transform_vector3(*ray.direction)) else {
        return;
    };

    if let Some(hit) = highlight_face(
        &geometry,
        Ray3d::new(origin, direction),
        &settings.0,
        &mut colors,
        &mut fades,
    ) {
        trace!("hovered face {:?} at {}", hit.face, hit.point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, dir: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(dir).unwrap())
    }

    const TRI: [Vec3; 3] = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];

    #[test]
    fn hits_front_and_back() {
        let front = intersect_triangle(ray(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z), TRI);
        assert!((front.unwrap() - 5.0).abs() < 1e-5);

        let back = intersect_triangle(ray(Vec3::new(0.0, 0.0, -3.0), Vec3::Z), TRI);
        assert!((back.unwrap() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn misses_outside_and_behind() {
        assert_eq!(
            intersect_triangle(ray(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z), TRI),
            None
        );
        assert_eq!(
            intersect_triangle(ray(Vec3::new(0.0, 0.0, 5.0), Vec3::Z), TRI),
            None
        );
        // parallel to the triangle
        assert_eq!(
            intersect_triangle(ray(Vec3::new(0.0, 0.0, 1.0), Vec3::X), TRI),
            None
        );
    }

    #[test]
    fn center_ray_points_at_look_target() {
        let world_from_view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y).inverse();
        let clip_from_view = Mat4::perspective_infinite_reverse_rh(75f32.to_radians(), 1.5, 0.1);
        let world_from_clip = world_from_view * clip_from_view.inverse();

        let ray = ray_from_ndc(world_from_clip, Vec2::ZERO).unwrap();
        assert!((ray.origin - Vec3::new(0.0, 0.0, 4.9)).length() < 1e-3);
        assert!((*ray.direction - Vec3::NEG_Z).length() < 1e-4);

        // a pointer in the top-right quadrant looks up and to the right
        let ray = ray_from_ndc(world_from_clip, Vec2::new(0.5, 0.5)).unwrap();
        assert!(ray.direction.x > 0.0 && ray.direction.y > 0.0 && ray.direction.z < 0.0);
    }

    #[test]
    fn orbit_ray_follows_current_orbit() {
        let clip_from_view = Mat4::perspective_infinite_reverse_rh(75f32.to_radians(), 1.5, 0.1);
        let mut orbit = OrbitCamera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);

        let ray = orbit_ray(&orbit, clip_from_view, Vec2::ZERO).unwrap();
        assert!((*ray.direction - Vec3::NEG_Z).length() < 1e-4);

        // Swing round to +X without touching any transform
        orbit.yaw = std::f32::consts::FRAC_PI_2;
        let ray = orbit_ray(&orbit, clip_from_view, Vec2::ZERO).unwrap();
        assert!((ray.origin - Vec3::new(4.9, 0.0, 0.0)).length() < 1e-3);
        assert!((*ray.direction - Vec3::NEG_X).length() < 1e-4);
    }
}
