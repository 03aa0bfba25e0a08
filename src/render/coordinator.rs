//! Owns the scene and the offscreen targets and drives the three passes of
//! every frame.
//!
//! The coordinator is independent of the window: it draws into whatever
//! texture view it is handed, which is the surface texture when running the
//! app and an offscreen texture in tests.

use std::iter;

use anyhow::anyhow;
use cgmath::Vector3;

use crate::{
    camera::{OrbitCamera, Projection},
    config::SceneConfig,
    data_structures::{
        model::{
            Material, MaterialShader, Mesh, TEXTURE_SLOT_DEPTH_MAP, TEXTURE_SLOT_REFLECTION,
            TEXTURE_SLOT_REFRACTION,
        },
        object::{Object, ObjectRole, Transform},
        registry::Handle,
        texture::Texture,
    },
    pipelines::{
        Pipelines,
        uniforms::{PassUniform, UniformBinding},
    },
    render::{
        lighting::Lighting,
        pass::{FramePlan, FrameSchedule, PassContext, PassKind, PassPlan},
        scene::{ObjectBinding, Samplers, Scene},
        target::{RenderTarget, begin_pass},
    },
    resources::load_material,
    terrain::{build_terrain_mesh, build_water_mesh},
};

/// Point the water material at the current reflection and refraction outputs.
pub fn attach_targets(water: &mut Material, reflection: &RenderTarget, refraction: &RenderTarget) {
    water.add_texture(TEXTURE_SLOT_REFLECTION, reflection.color.clone());
    water.add_texture(TEXTURE_SLOT_REFRACTION, refraction.color.clone());
    water.add_texture(TEXTURE_SLOT_DEPTH_MAP, refraction.depth.clone());
}

#[derive(Debug)]
pub struct RenderCoordinator {
    config: SceneConfig,
    pipelines: Pipelines,
    samplers: Samplers,
    scene: Scene,
    bindings: Vec<ObjectBinding>,
    /// One uniform buffer per pass, indexed by [`PassKind::index`]. All
    /// writes of a frame land before its single submit, so the passes cannot
    /// share a buffer.
    pass_uniforms: Vec<UniformBinding>,
    reflection: RenderTarget,
    refraction: RenderTarget,
    screen_depth: Texture,
    camera: OrbitCamera,
    projection: Projection,
    schedule: FrameSchedule,
    lighting: Lighting,
    terrain_mesh: Handle<Mesh>,
    water_material: Handle<Material>,
    water_object: usize,
    rebuilds: u64,
}

impl RenderCoordinator {
    /// Load the materials, synthesize the first terrain and set up every GPU
    /// resource the passes need.
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: SceneConfig,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let pipelines = Pipelines::new(device, color_format);
        let samplers = Samplers::new(device);
        let reflection = RenderTarget::new(device, color_format, width, height, "Reflection");
        let refraction = RenderTarget::new(device, color_format, width, height, "Refraction");
        let screen_depth = Texture::create_depth_texture(device, [width, height], "depth_texture");

        let mut scene = Scene::new();

        let mut terrain_materials = Vec::new();
        for material in &config.terrain_materials {
            let material = load_material(material, MaterialShader::Terrain, device, queue).await;
            terrain_materials.push(scene.materials.insert(material));
        }
        let mut water = load_material(&config.water_material, MaterialShader::Water, device, queue).await;
        attach_targets(&mut water, &reflection, &refraction);
        let water_material = scene.materials.insert(water);

        let terrain_data = build_terrain_mesh(&config.terrain);
        log::info!(
            "Generated terrain with {} vertices and {} indices",
            terrain_data.vertex_count(),
            terrain_data.index_count()
        );
        let terrain_mesh = scene
            .meshes
            .insert(Mesh::upload(device, "terrain", &terrain_data));
        let water_mesh = scene
            .meshes
            .insert(Mesh::upload(device, "water", &build_water_mesh(&config.water)));

        scene.add_object(
            Object::new("terrain", terrain_mesh, terrain_materials, ObjectRole::Solid).with_transform(
                Transform::new()
                    .with_translation(config.terrain.translation)
                    .with_scale(config.terrain.scale),
            ),
        );
        let water_object = scene.add_object(
            Object::new("water", water_mesh, vec![water_material], ObjectRole::Water).with_transform(
                Transform::new()
                    .with_translation(Vector3::new(0.0, config.water.height, 0.0))
                    .with_scale(config.water.scale),
            ),
        );

        let bindings = scene
            .objects
            .iter()
            .map(|object| ObjectBinding::new(device, &pipelines, &samplers, &scene, object))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let empty: PassUniform = bytemuck::Zeroable::zeroed();
        let pass_uniforms = PassKind::ORDER
            .iter()
            .map(|kind| UniformBinding::new(device, &pipelines.pass_layout, &empty, kind.label()))
            .collect();

        let camera = OrbitCamera::new(
            config.camera.rotate_x,
            config.camera.rotate_y,
            config.camera.scale_percent,
            config.water.height,
        );
        let projection = Projection::new(
            width,
            height,
            cgmath::Deg(config.camera.fovy),
            config.camera.znear,
            config.camera.zfar,
        );

        Ok(Self {
            config,
            pipelines,
            samplers,
            scene,
            bindings,
            pass_uniforms,
            reflection,
            refraction,
            screen_depth,
            camera,
            projection,
            schedule: FrameSchedule::new(),
            lighting: Lighting::at(0.0),
            terrain_mesh,
            water_material,
            water_object,
            rebuilds: 0,
        })
    }

    pub fn set_rotation(&mut self, rotate_x: i32, rotate_y: i32) {
        self.camera.set_rotation(rotate_x, rotate_y);
    }

    pub fn set_scale(&mut self, scale_percent: i32) {
        self.camera.set_scale(scale_percent);
    }

    /// Request a new terrain; it is built at the start of the next frame.
    pub fn regenerate(&mut self) {
        self.schedule.request_regenerate();
    }

    /// Recreate the viewport-sized targets and point the water at them.
    ///
    /// Must not be called while a frame is being recorded. A zero-sized
    /// viewport (minimized window) is ignored.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> anyhow::Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.reflection = self.reflection.resized(device, width, height);
        self.refraction = self.refraction.resized(device, width, height);
        self.screen_depth = Texture::create_depth_texture(device, [width, height], "depth_texture");

        let water = self
            .scene
            .materials
            .get_mut(self.water_material)
            .ok_or_else(|| anyhow!("water material is missing"))?;
        attach_targets(water, &self.reflection, &self.refraction);
        self.bindings[self.water_object] = ObjectBinding::new(
            device,
            &self.pipelines,
            &self.samplers,
            &self.scene,
            &self.scene.objects[self.water_object],
        )?;

        self.projection.resize(width, height);
        log::info!("Resized render targets to {}x{}", width, height);
        Ok(())
    }

    /// Synthesize a fresh heightfield and swap it in under the existing mesh
    /// handle. The previous buffers are released.
    fn rebuild_terrain(&mut self, device: &wgpu::Device) -> anyhow::Result<()> {
        self.config.validate()?;
        let data = build_terrain_mesh(&self.config.terrain);
        let mesh = Mesh::upload(device, "terrain", &data);
        self.scene
            .meshes
            .replace(self.terrain_mesh, mesh)
            .ok_or_else(|| anyhow!("terrain mesh is missing"))?;
        self.rebuilds += 1;
        log::info!(
            "Regenerated terrain ({}x{} samples, {} vertices, {} indices)",
            self.config.terrain.size(),
            self.config.terrain.size(),
            data.vertex_count(),
            data.index_count()
        );
        Ok(())
    }

    /// Render one frame into `output`.
    ///
    /// Advances the clock, applies a pending terrain rebuild, then records
    /// the reflection, refraction and composite passes in that order into a
    /// single submission.
    pub fn frame(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        output: &wgpu::TextureView,
    ) -> anyhow::Result<()> {
        let start = self.schedule.begin_frame();
        if start.regenerate {
            self.rebuild_terrain(device)?;
        }

        self.lighting = Lighting::at(start.time);
        let clear_colour = self.lighting.clear_colour();
        let plan = FramePlan::new(&self.scene.objects);

        for (object, binding) in self.scene.objects.iter().zip(&self.bindings) {
            let materials = self.scene.materials(object)?;
            binding.uniform.write(queue, &object.to_raw(&materials));
        }
        for kind in PassKind::ORDER {
            let context = PassContext::new(kind, &self.camera, &self.projection, &self.lighting, start.time);
            self.pass_uniforms[kind.index()].write(queue, &context.to_uniform());
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });
        for pass in &plan.passes {
            let mut render_pass = match pass.kind {
                PassKind::Reflection => self.reflection.begin_pass(&mut encoder, clear_colour, pass.kind.label()),
                PassKind::Refraction => self.refraction.begin_pass(&mut encoder, clear_colour, pass.kind.label()),
                PassKind::Composite => begin_pass(
                    &mut encoder,
                    output,
                    &self.screen_depth.view,
                    clear_colour,
                    pass.kind.label(),
                ),
            };
            self.draw_pass(&mut render_pass, pass)?;
        }
        queue.submit(iter::once(encoder.finish()));
        Ok(())
    }

    fn draw_pass(&self, render_pass: &mut wgpu::RenderPass<'_>, plan: &PassPlan) -> anyhow::Result<()> {
        log::debug!("{} draws {} objects", plan.kind.label(), plan.objects.len());
        render_pass.set_bind_group(0, &self.pass_uniforms[plan.kind.index()].bind_group, &[]);
        for &idx in &plan.objects {
            let object = &self.scene.objects[idx];
            let binding = &self.bindings[idx];
            render_pass.set_pipeline(self.pipelines.for_shader(self.scene.shader(object)?));
            render_pass.set_bind_group(1, &binding.uniform.bind_group, &[]);
            render_pass.set_bind_group(2, &binding.material, &[]);
            self.scene.mesh(object)?.draw(render_pass);
        }
        Ok(())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn frame_plan(&self) -> FramePlan {
        FramePlan::new(&self.scene.objects)
    }

    pub fn terrain_mesh(&self) -> Option<&Mesh> {
        self.scene.meshes.get(self.terrain_mesh)
    }

    pub fn water_material(&self) -> Option<&Material> {
        self.scene.materials.get(self.water_material)
    }

    pub fn reflection_target(&self) -> &RenderTarget {
        &self.reflection
    }

    pub fn refraction_target(&self) -> &RenderTarget {
        &self.refraction
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Animation time of the last frame.
    pub fn time(&self) -> f32 {
        self.schedule.time()
    }

    pub fn regenerate_pending(&self) -> bool {
        self.schedule.regenerate_pending()
    }

    /// Terrain rebuilds since construction.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}
