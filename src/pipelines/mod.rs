//! Render pipelines for terrain and water, plus the bind group layouts they
//! share.
//!
//! Both pipelines bind the same three groups:
//!
//! - group 0: the per-pass [`uniforms::PassUniform`]
//! - group 1: the per-object [`crate::data_structures::object::ObjectRaw`]
//! - group 2: the material textures, laid out per shader

use crate::data_structures::model::MaterialShader;

pub mod basic;
pub mod terrain;
pub mod uniforms;
pub mod water;

#[derive(Debug)]
pub struct Pipelines {
    pub pass_layout: wgpu::BindGroupLayout,
    pub object_layout: wgpu::BindGroupLayout,
    pub terrain_material_layout: wgpu::BindGroupLayout,
    pub water_material_layout: wgpu::BindGroupLayout,
    pub terrain: wgpu::RenderPipeline,
    pub water: wgpu::RenderPipeline,
}

impl Pipelines {
    /// Offscreen targets share the surface format, so one set of pipelines
    /// serves every pass.
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let pass_layout = uniforms::mk_uniform_layout(device, "pass_bind_group_layout");
        let object_layout = uniforms::mk_uniform_layout(device, "object_bind_group_layout");
        let terrain_material_layout = terrain::mk_material_layout(device);
        let water_material_layout = water::mk_material_layout(device);

        let terrain = terrain::mk_terrain_pipeline(
            device,
            color_format,
            &pass_layout,
            &object_layout,
            &terrain_material_layout,
        );
        let water = water::mk_water_pipeline(
            device,
            color_format,
            &pass_layout,
            &object_layout,
            &water_material_layout,
        );

        Self {
            pass_layout,
            object_layout,
            terrain_material_layout,
            water_material_layout,
            terrain,
            water,
        }
    }

    pub fn for_shader(&self, shader: MaterialShader) -> &wgpu::RenderPipeline {
        match shader {
            MaterialShader::Terrain => &self.terrain,
            MaterialShader::Water => &self.water,
        }
    }
}
