//! Uniform blocks shared by the terrain and water shaders.
//!
//! Field names and order mirror the WGSL structs in `terrain.wgsl` and
//! `water.wgsl`; the explicit padding fields keep the 16 byte alignment of
//! `vec3` and struct members that uniform buffers require.

use wgpu::util::DeviceExt;

use crate::data_structures::object::ObjectRaw;

/// Everything that changes between the reflection, refraction and composite
/// passes of one frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PassUniform {
    pub camera_position: [f32; 3],
    pub _padding: u32,
    pub view_matrix: [[f32; 4]; 4],
    pub proj_matrix: [[f32; 4]; 4],
    pub light_position: [f32; 3],
    pub _padding2: u32,
    pub light_color: [f32; 3],
    pub clip_sign: i32,
    pub time: f32,
    pub scale: f32,
    pub water_height: f32,
    pub near: f32,
    pub far: f32,
    pub _padding3: [u32; 3],
}

/// Layout of group 0 (`PassUniform`) and group 1 (`ObjectRaw`).
pub fn mk_uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

/// A uniform buffer with the bind group that exposes it at binding 0.
#[derive(Debug)]
pub struct UniformBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    pub fn new<T: bytemuck::Pod>(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        contents: &T,
        label: &str,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(std::slice::from_ref(contents)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self { buffer, bind_group }
    }

    pub fn write<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, contents: &T) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(std::slice::from_ref(contents)),
        );
    }
}

pub fn mk_object_binding(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    raw: &ObjectRaw,
    name: &str,
) -> UniformBinding {
    UniformBinding::new(device, layout, raw, &format!("{} object uniform", name))
}
