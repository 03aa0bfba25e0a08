//! Scene objects and their rigid transforms.
//!
//! An [`Object`] ties a mesh to one or more materials and places it in the
//! world. The per-object GPU data (model matrix, normal matrix and material
//! coefficients) is derived fresh from the transform every frame.

use cgmath::{Deg, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3};

use crate::data_structures::{
    model::{Material, Mesh},
    registry::Handle,
};

/// Most materials a single object can blend between.
pub const MAX_OBJECT_MATERIALS: usize = 3;

/// Translation, per-axis rotation in degrees and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_translation(mut self, translation: Vector3<f32>) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    /// Translate, then scale, then rotate about X, Y and Z in that order.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z))
    }

    /// Inverse transpose of the upper 3x3 block, used to carry normals.
    pub fn normal_matrix(&self) -> Matrix3<f32> {
        let m = self.to_matrix();
        let upper = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());
        upper
            .invert()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix3::identity)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// What an object is to the render passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectRole {
    /// Ordinary geometry, drawn into every pass.
    Solid,
    /// The water surface; only drawn in the composite pass.
    Water,
}

#[derive(Clone, Debug)]
pub struct Object {
    pub name: String,
    pub mesh: Handle<Mesh>,
    pub materials: Vec<Handle<Material>>,
    pub transform: Transform,
    pub role: ObjectRole,
}

impl Object {
    /// # Panics
    ///
    /// Objects are drawn with at least one and at most
    /// [`MAX_OBJECT_MATERIALS`] materials.
    pub fn new(
        name: &str,
        mesh: Handle<Mesh>,
        materials: Vec<Handle<Material>>,
        role: ObjectRole,
    ) -> Self {
        assert!(
            !materials.is_empty() && materials.len() <= MAX_OBJECT_MATERIALS,
            "object {} needs between 1 and {} materials, got {}",
            name,
            MAX_OBJECT_MATERIALS,
            materials.len()
        );
        Self {
            name: name.to_string(),
            mesh,
            materials,
            transform: Transform::new(),
            role,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// The material that decides which pipeline draws this object.
    pub fn primary_material(&self) -> Handle<Material> {
        self.materials[0]
    }

    /// Pack the per-draw data for the GPU.
    ///
    /// `materials` must hold the resolved materials of this object in order.
    pub fn to_raw(&self, materials: &[&Material]) -> ObjectRaw {
        let normal = self.transform.normal_matrix();
        let mut material = [[0.0; 4]; MAX_OBJECT_MATERIALS];
        materials
            .iter()
            .take(MAX_OBJECT_MATERIALS)
            .enumerate()
            .for_each(|(idx, m)| material[idx] = m.material_vector());
        ObjectRaw {
            model: self.transform.to_matrix().into(),
            normal: [
                normal.x.extend(0.0).into(),
                normal.y.extend(0.0).into(),
                normal.z.extend(0.0).into(),
            ],
            material,
            material_count: materials.len().min(MAX_OBJECT_MATERIALS) as u32,
            _padding: [0; 3],
        }
    }
}

/**
 * The raw object data is what is stored in the per-object uniform buffer.
 *
 * The normal matrix is stored as three padded columns because uniform
 * `mat3x3` columns are 16 bytes apart.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
    pub material: [[f32; 4]; MAX_OBJECT_MATERIALS],
    pub material_count: u32,
    _padding: [u32; 3],
}
