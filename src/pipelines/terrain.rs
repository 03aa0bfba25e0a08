use crate::{
    data_structures::{
        model::{
            Material, TEXTURE_SLOT_DIFFUSE, TEXTURE_SLOT_NORMAL, TEXTURE_SLOT_SPECULAR,
            TerrainVertex, Vertex,
        },
        object::MAX_OBJECT_MATERIALS,
        texture::Texture,
    },
    pipelines::basic::mk_render_pipeline,
};

/// Textures per terrain material: diffuse, normal, specular.
pub const TEXTURES_PER_MATERIAL: u32 = 3;

const TERRAIN_SLOTS: [u32; 3] = [TEXTURE_SLOT_DIFFUSE, TEXTURE_SLOT_NORMAL, TEXTURE_SLOT_SPECULAR];

/**
 * Bindings `0..9` hold the diffuse, normal and specular textures of up to
 * three materials (material `m`, slot `s` at `m * 3 + s`); binding 9 is the
 * shared repeating sampler.
 */
pub fn mk_material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let texture_count = MAX_OBJECT_MATERIALS as u32 * TEXTURES_PER_MATERIAL;
    let mut entries: Vec<wgpu::BindGroupLayoutEntry> = (0..texture_count)
        .map(|binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        })
        .collect();
    entries.push(wgpu::BindGroupLayoutEntry {
        binding: texture_count,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    });
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("Terrain material bind group layout"),
    })
}

/// Bind the textures of `materials` in slot order.
///
/// Objects with fewer than three materials repeat their last one. Every
/// material must carry all three texture slots.
pub fn mk_material_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    materials: &[&Material],
    sampler: &wgpu::Sampler,
) -> anyhow::Result<wgpu::BindGroup> {
    let last = materials
        .last()
        .ok_or_else(|| anyhow::anyhow!("a terrain object needs at least one material"))?;
    let mut views: Vec<&wgpu::TextureView> = Vec::new();
    for idx in 0..MAX_OBJECT_MATERIALS {
        let material = materials.get(idx).unwrap_or(last);
        for slot in TERRAIN_SLOTS {
            let texture: &Texture = material.texture(slot).ok_or_else(|| {
                anyhow::anyhow!("material {} has no texture in slot {}", material.name, slot)
            })?;
            views.push(&texture.view);
        }
    }

    let mut entries: Vec<wgpu::BindGroupEntry> = views
        .into_iter()
        .enumerate()
        .map(|(binding, view)| wgpu::BindGroupEntry {
            binding: binding as u32,
            resource: wgpu::BindingResource::TextureView(view),
        })
        .collect();
    entries.push(wgpu::BindGroupEntry {
        binding: entries.len() as u32,
        resource: wgpu::BindingResource::Sampler(sampler),
    });

    Ok(device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &entries,
        label: Some("Terrain material bind group"),
    }))
}

pub fn mk_terrain_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    pass_layout: &wgpu::BindGroupLayout,
    object_layout: &wgpu::BindGroupLayout,
    material_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Terrain Pipeline Layout"),
        bind_group_layouts: &[pass_layout, object_layout, material_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Terrain Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("terrain.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        "Terrain Pipeline",
        &layout,
        color_format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        Some(Texture::DEPTH_FORMAT),
        &[TerrainVertex::desc()],
        shader,
    )
}
