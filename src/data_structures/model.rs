//! Vertex layout, GPU meshes and materials.
//!
//! A [`Mesh`] owns the vertex and index buffers of one uploaded
//! [`MeshData`]; dropping it releases both. A [`Material`] carries the
//! lighting coefficients and the textures an object is drawn with.

use std::collections::BTreeMap;

use wgpu::util::DeviceExt;

use crate::{data_structures::texture::Texture, terrain::mesh::MeshData};

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Interleaved per-vertex data as it lives in GPU memory.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub tex_coords: [f32; 2],
}

/**
 * Four attribute slots bound in the order position, normal, tangent, uv.
 *
 * The offsets follow the field order of `TerrainVertex`, the stride is the
 * size of one vertex.
 */
impl Vertex for TerrainVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<TerrainVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 9]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// GPU-resident vertex and index buffers of one mesh.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_vertices: u32,
    pub num_elements: u32,
}

impl Mesh {
    /// Transfer `data` into freshly created vertex and index buffers.
    pub fn upload(device: &wgpu::Device, name: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_vertices: data.vertex_count() as u32,
            num_elements: data.index_count() as u32,
        }
    }

    /// One indexed triangle-list draw over the whole index buffer.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_elements, 0, 0..1);
    }
}

/// Which pipeline an object with this material is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialShader {
    Terrain,
    Water,
}

/// Texture slots of a terrain material.
pub const TEXTURE_SLOT_DIFFUSE: u32 = 0;
pub const TEXTURE_SLOT_NORMAL: u32 = 1;
pub const TEXTURE_SLOT_SPECULAR: u32 = 2;

/// Texture slots of the water material.
pub const TEXTURE_SLOT_DUDV: u32 = 0;
pub const TEXTURE_SLOT_REFLECTION: u32 = 1;
pub const TEXTURE_SLOT_REFRACTION: u32 = 2;
pub const TEXTURE_SLOT_DEPTH_MAP: u32 = 3;

/// Phong coefficients plus the textures bound for an object.
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub shininess: u32,
    pub shader: MaterialShader,
    textures: BTreeMap<u32, Texture>,
}

impl Material {
    pub fn new(name: &str, ka: f32, kd: f32, ks: f32, shininess: u32, shader: MaterialShader) -> Self {
        Self {
            name: name.to_string(),
            ka,
            kd,
            ks,
            shininess,
            shader,
            textures: BTreeMap::new(),
        }
    }

    /// Put `texture` into `slot`, replacing whatever was bound there.
    pub fn add_texture(&mut self, slot: u32, texture: Texture) {
        self.textures.insert(slot, texture);
    }

    pub fn texture(&self, slot: u32) -> Option<&Texture> {
        self.textures.get(&slot)
    }

    pub fn textures(&self) -> impl Iterator<Item = (&u32, &Texture)> {
        self.textures.iter()
    }

    /// Coefficients packed the way the shaders read them: `(ka, kd, ks, n)`.
    pub fn material_vector(&self) -> [f32; 4] {
        [self.ka, self.kd, self.ks, self.shininess as f32]
    }
}
