//! Displaced grid generation.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_math::Ray3d;
use bevy_mesh::PrimitiveTopology;
use rand::Rng;

use super::colors::ColorBuffer;
use super::picking::{FaceHit, intersect_triangle};
use crate::core::{Color, GridConfig};

/// CPU-side copy of the plane geometry, used for picking.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridMesh {
    pub positions: Vec<[f32; 3]>,
    pub faces: Vec<[u32; 3]>,
}

/// Lattice in the XY plane, row-major from the top-left corner, with each
/// vertex's Z pushed by uniform noise in `[0, noise_amplitude)`.
pub fn generate_grid(config: &GridConfig, rng: &mut impl Rng) -> GridMesh {
    let grid_x = config.width_segments.max(1);
    let grid_y = config.height_segments.max(1);
    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;

    let segment_w = config.width / grid_x as f32;
    let segment_h = config.height / grid_y as f32;
    let half_w = config.width * 0.5;
    let half_h = config.height * 0.5;

    let mut positions = Vec::with_capacity(grid_x1 as usize * grid_y1 as usize);
    for iy in 0..grid_y1 {
        let y = iy as f32 * segment_h - half_h;
        for ix in 0..grid_x1 {
            let x = ix as f32 * segment_w - half_w;
            let z = rng.random::<f32>() * config.noise_amplitude;
            positions.push([x, -y, z]);
        }
    }

    let mut faces = Vec::with_capacity(grid_x as usize * grid_y as usize * 2);
    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = b + 1;
            let d = a + 1;

            // Two triangles per cell, counter-clockwise from +Z
            faces.push([a, b, d]);
            faces.push([b, c, d]);
        }
    }

    GridMesh { positions, faces }
}

impl GridMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn triangle(&self, face: [u32; 3]) -> [Vec3; 3] {
        face.map(|i| Vec3::from_array(self.positions[i as usize]))
    }

    /// One `base` entry per vertex.
    pub fn base_colors(&self, base: Color) -> ColorBuffer {
        ColorBuffer::filled(self.vertex_count(), base)
    }

    /// Nearest face hit by `ray`, given in the mesh's local space.
    /// On equal distances the face that comes first in index order wins.
    pub fn raycast(&self, ray: Ray3d) -> Option<FaceHit> {
        let mut nearest: Option<FaceHit> = None;
        for &face in &self.faces {
            let Some(distance) = intersect_triangle(ray, self.triangle(face)) else {
                continue;
            };
            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(FaceHit {
                    face,
                    distance,
                    point: ray.get_point(distance),
                });
            }
        }
        nearest
    }

    /// Per-vertex colors spread to every face corner, in render mesh order.
    /// Copies of a shared vertex all get that vertex's color.
    pub fn corner_colors(&self, colors: &ColorBuffer) -> Vec<[f32; 4]> {
        self.faces
            .iter()
            .flatten()
            .map(|&i| colors.get(i).unwrap_or(Color::BLACK).to_array())
            .collect()
    }

    /// Build a flat-shaded renderable mesh. Faces don't share corners, so
    /// each face keeps its own normal. The main-world copy is kept so colors
    /// can be rewritten every frame.
    pub fn to_bevy_mesh(&self, colors: &ColorBuffer) -> Mesh {
        let positions: Vec<[f32; 3]> = self
            .faces
            .iter()
            .flatten()
            .map(|&i| self.positions[i as usize])
            .collect();
        let normals = compute_flat_normals(&positions);

        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.corner_colors(colors))
    }
}

/// One normal per triangle, repeated on its three corners.
fn compute_flat_normals(corners: &[[f32; 3]]) -> Vec<[f32; 3]> {
    let mut normals = Vec::with_capacity(corners.len());

    for tri in corners.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(Vec3::from_array);
        let n = (b - a).cross(c - a).normalize_or(Vec3::Z).to_array();
        normals.extend([n; 3]);
    }

    normals
}
