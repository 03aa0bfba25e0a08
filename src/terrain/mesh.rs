//! Mesh extraction from a finished heightfield.
//!
//! Produces one [`TerrainVertex`] per heightfield sample and two triangles
//! per grid cell, then fills in normals and tangents so that normal-mapped
//! lighting works on the result.

use cgmath::{InnerSpace, Vector2, Vector3, Zero};

use crate::{data_structures::model::TerrainVertex, terrain::heightfield::Heightfield};

/// World units per texture repeat.
pub const TEXEL_DENSITY: f32 = 10.0;

/// Smallest determinant magnitude accepted by the tangent solve.
pub const TANGENT_EPSILON: f32 = 0.00001;

/// CPU-side vertex and index arrays ready to be uploaded.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Turn a heightfield into a centered, textured and lit triangle mesh.
pub fn extract(heightfield: &Heightfield) -> MeshData {
    let size = heightfield.size();

    let mut vertices = Vec::with_capacity(size * size);
    for x in 0..size {
        for z in 0..size {
            vertices.push(create_vertex(heightfield, x, z));
        }
    }

    let indices = grid_indices(size);
    calculate_tangents(&mut vertices, &indices);

    MeshData { vertices, indices }
}

/// Two triangles per cell, indexed row-major as `x * size + z`.
pub fn grid_indices(size: usize) -> Vec<u32> {
    let cells = size.saturating_sub(1);
    let mut indices = Vec::with_capacity(cells * cells * 6);
    let idx = |x: usize, z: usize| (x * size + z) as u32;
    for x in 0..cells {
        for z in 0..cells {
            indices.extend_from_slice(&[idx(x, z), idx(x, z + 1), idx(x + 1, z)]);
            indices.extend_from_slice(&[idx(x + 1, z), idx(x, z + 1), idx(x + 1, z + 1)]);
        }
    }
    indices
}

fn grid_point(heightfield: &Heightfield, x: usize, z: usize) -> Vector3<f32> {
    Vector3::new(x as f32, heightfield.get(x, z), z as f32)
}

/// Normal at `(x, z)` from the diagonal-split triangles around it.
///
/// Every existing quadrant contributes one unit-length cross product. The
/// sum is divided by the negated number of contributions and renormalized;
/// the negation accounts for the operand order of the cross products below
/// and must stay in place for the lighting to face up.
pub fn estimate_normal(heightfield: &Heightfield, x: usize, z: usize) -> Vector3<f32> {
    let last = heightfield.size() - 1;
    let position = grid_point(heightfield, x, z);
    let mut normal = Vector3::zero();
    let mut count = 0;

    let mut accumulate = |a: Vector3<f32>, b: Vector3<f32>| {
        normal += (a - position).cross(b - position).normalize();
        count += 1;
    };

    if x > 0 && z > 0 {
        let xneg = grid_point(heightfield, x - 1, z);
        let zneg = grid_point(heightfield, x, z - 1);
        accumulate(xneg, zneg);
    }
    if x > 0 && z < last {
        let xneg = grid_point(heightfield, x - 1, z);
        let zpos = grid_point(heightfield, x, z + 1);
        accumulate(zpos, xneg);
    }
    if x < last && z < last {
        let xpos = grid_point(heightfield, x + 1, z);
        let zpos = grid_point(heightfield, x, z + 1);
        accumulate(xpos, zpos);
    }
    if x < last && z > 0 {
        let xpos = grid_point(heightfield, x + 1, z);
        let zneg = grid_point(heightfield, x, z - 1);
        accumulate(zneg, xpos);
    }

    if count > 0 {
        normal /= -(count as f32);
    }
    if normal.magnitude2() > 0.0 {
        normal.normalize()
    } else {
        normal
    }
}

fn create_vertex(heightfield: &Heightfield, x: usize, z: usize) -> TerrainVertex {
    let half = heightfield.size() as f32 / 2.0;
    let position = grid_point(heightfield, x, z);
    let normal = estimate_normal(heightfield, x, z);

    TerrainVertex {
        position: [position.x - half, position.y, position.z - half],
        normal: normal.into(),
        // filled in by `calculate_tangents`
        tangent: [0.0; 3],
        tex_coords: [position.x / TEXEL_DENSITY, position.z / TEXEL_DENSITY],
    }
}

/// Tangent of a single triangle, aligned with increasing texture U.
///
/// Solves
///     delta_pos1 = delta_uv1.x * T + delta_uv1.y * B
///     delta_pos2 = delta_uv2.x * T + delta_uv2.y * B
/// for `T`. A near-zero determinant is clamped to `±TANGENT_EPSILON`
/// (keeping its sign, exact zero becomes negative) so degenerate UV
/// mappings never yield infinite tangents.
pub fn triangle_tangent(
    positions: [Vector3<f32>; 3],
    uvs: [Vector2<f32>; 3],
) -> Vector3<f32> {
    let delta_pos1 = positions[1] - positions[0];
    let delta_pos2 = positions[2] - positions[0];
    let delta_uv1 = uvs[1] - uvs[0];
    let delta_uv2 = uvs[2] - uvs[0];

    let mut det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
    if det > 0.0 && det < TANGENT_EPSILON {
        det = TANGENT_EPSILON;
    } else if det > -TANGENT_EPSILON && det < TANGENT_EPSILON {
        det = -TANGENT_EPSILON;
    }

    let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) / det;
    if tangent.magnitude2() > 0.0 {
        tangent.normalize()
    } else {
        tangent
    }
}

/// Assign every triangle's tangent to its three vertices.
///
/// Shared vertices are not averaged: the last triangle touching a vertex
/// decides its tangent.
pub fn calculate_tangents(vertices: &mut [TerrainVertex], indices: &[u32]) {
    for c in indices.chunks_exact(3) {
        let (i0, i1, i2) = (c[0] as usize, c[1] as usize, c[2] as usize);
        let positions = [
            vertices[i0].position.into(),
            vertices[i1].position.into(),
            vertices[i2].position.into(),
        ];
        let uvs = [
            vertices[i0].tex_coords.into(),
            vertices[i1].tex_coords.into(),
            vertices[i2].tex_coords.into(),
        ];
        let tangent: [f32; 3] = triangle_tangent(positions, uvs).into();

        vertices[i0].tangent = tangent;
        vertices[i1].tangent = tangent;
        vertices[i2].tangent = tangent;
    }
}
