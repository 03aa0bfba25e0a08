use crate::{
    data_structures::{
        model::{
            Material, TEXTURE_SLOT_DEPTH_MAP, TEXTURE_SLOT_DUDV, TEXTURE_SLOT_REFLECTION,
            TEXTURE_SLOT_REFRACTION, TerrainVertex, Vertex,
        },
        texture::Texture,
    },
    pipelines::basic::mk_render_pipeline,
};

fn float_texture(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/**
 * Bindings follow the texture slots of the water material:
 *
 * 0: distortion (dudv) map, 1: reflection color, 2: refraction color,
 * 3: refraction depth (read with `textureLoad`, so no sampler),
 * 4: repeating sampler for the dudv map, 5: clamped sampler for the targets.
 */
pub fn mk_material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            float_texture(TEXTURE_SLOT_DUDV),
            float_texture(TEXTURE_SLOT_REFLECTION),
            float_texture(TEXTURE_SLOT_REFRACTION),
            wgpu::BindGroupLayoutEntry {
                binding: TEXTURE_SLOT_DEPTH_MAP,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            sampler(4),
            sampler(5),
        ],
        label: Some("Water material bind group layout"),
    })
}

pub fn mk_material_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    material: &Material,
    repeat_sampler: &wgpu::Sampler,
    clamp_sampler: &wgpu::Sampler,
) -> anyhow::Result<wgpu::BindGroup> {
    let view = |slot: u32| -> anyhow::Result<&wgpu::TextureView> {
        material
            .texture(slot)
            .map(|texture| &texture.view)
            .ok_or_else(|| anyhow::anyhow!("water material {} has no texture in slot {}", material.name, slot))
    };

    Ok(device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: TEXTURE_SLOT_DUDV,
                resource: wgpu::BindingResource::TextureView(view(TEXTURE_SLOT_DUDV)?),
            },
            wgpu::BindGroupEntry {
                binding: TEXTURE_SLOT_REFLECTION,
                resource: wgpu::BindingResource::TextureView(view(TEXTURE_SLOT_REFLECTION)?),
            },
            wgpu::BindGroupEntry {
                binding: TEXTURE_SLOT_REFRACTION,
                resource: wgpu::BindingResource::TextureView(view(TEXTURE_SLOT_REFRACTION)?),
            },
            wgpu::BindGroupEntry {
                binding: TEXTURE_SLOT_DEPTH_MAP,
                resource: wgpu::BindingResource::TextureView(view(TEXTURE_SLOT_DEPTH_MAP)?),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::Sampler(repeat_sampler),
            },
            wgpu::BindGroupEntry {
                binding: 5,
                resource: wgpu::BindingResource::Sampler(clamp_sampler),
            },
        ],
        label: Some("Water material bind group"),
    }))
}

/// Water is blended over the composite image, like the transparent pipeline
/// of a regular scene.
pub fn mk_water_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    pass_layout: &wgpu::BindGroupLayout,
    object_layout: &wgpu::BindGroupLayout,
    material_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Water Pipeline Layout"),
        bind_group_layouts: &[pass_layout, object_layout, material_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Water Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("water.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        "Water Pipeline",
        &layout,
        color_format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some(Texture::DEPTH_FORMAT),
        &[TerrainVertex::desc()],
        shader,
    )
}
