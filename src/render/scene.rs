//! Scene content and the GPU bindings each object is drawn with.

use anyhow::anyhow;

use crate::{
    data_structures::{
        model::{Material, MaterialShader, Mesh},
        object::Object,
        registry::Registry,
        texture::{create_clamped_sampler, create_default_sampler},
    },
    pipelines::{
        Pipelines, terrain,
        uniforms::{UniformBinding, mk_object_binding},
        water,
    },
};

/// Meshes and materials shared through handles, and the objects that use them.
#[derive(Debug, Default)]
pub struct Scene {
    pub meshes: Registry<Mesh>,
    pub materials: Registry<Material>,
    pub objects: Vec<Object>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index the frame plan refers to the object by.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn mesh(&self, object: &Object) -> anyhow::Result<&Mesh> {
        self.meshes
            .get(object.mesh)
            .ok_or_else(|| anyhow!("object {} refers to a missing mesh", object.name))
    }

    pub fn materials(&self, object: &Object) -> anyhow::Result<Vec<&Material>> {
        object
            .materials
            .iter()
            .map(|handle| {
                self.materials
                    .get(*handle)
                    .ok_or_else(|| anyhow!("object {} refers to a missing material", object.name))
            })
            .collect()
    }

    /// The shader of an object's first material picks its pipeline.
    pub fn shader(&self, object: &Object) -> anyhow::Result<MaterialShader> {
        self.materials
            .get(object.primary_material())
            .map(|material| material.shader)
            .ok_or_else(|| anyhow!("object {} refers to a missing material", object.name))
    }
}

#[derive(Debug)]
pub struct Samplers {
    pub repeat: wgpu::Sampler,
    pub clamp: wgpu::Sampler,
}

impl Samplers {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            repeat: create_default_sampler(device),
            clamp: create_clamped_sampler(device),
        }
    }
}

/// Group 1 and group 2 of one object.
#[derive(Debug)]
pub struct ObjectBinding {
    pub uniform: UniformBinding,
    pub material: wgpu::BindGroup,
}

impl ObjectBinding {
    pub fn new(
        device: &wgpu::Device,
        pipelines: &Pipelines,
        samplers: &Samplers,
        scene: &Scene,
        object: &Object,
    ) -> anyhow::Result<Self> {
        let materials = scene.materials(object)?;
        let uniform = mk_object_binding(
            device,
            &pipelines.object_layout,
            &object.to_raw(&materials),
            &object.name,
        );
        let material = match scene.shader(object)? {
            MaterialShader::Terrain => terrain::mk_material_bind_group(
                device,
                &pipelines.terrain_material_layout,
                &materials,
                &samplers.repeat,
            )?,
            MaterialShader::Water => water::mk_material_bind_group(
                device,
                &pipelines.water_material_layout,
                materials[0],
                &samplers.repeat,
                &samplers.clamp,
            )?,
        };
        Ok(Self { uniform, material })
    }
}
