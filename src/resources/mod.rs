//! Loading of material textures from the `assets` directory (or the page
//! origin on the web).
//!
//! A texture that cannot be loaded is replaced by a generated stand-in so a
//! missing file never stops the scene from rendering.

use crate::{
    config::MaterialConfig,
    data_structures::{
        model::{
            Material, MaterialShader, TEXTURE_SLOT_DIFFUSE, TEXTURE_SLOT_DUDV, TEXTURE_SLOT_NORMAL,
            TEXTURE_SLOT_SPECULAR,
        },
        texture::Texture,
    },
};

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("page origin is not available"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        std::fs::read(path)?
    };

    Ok(data)
}

pub async fn load_texture(
    file_name: &str,
    is_normal_map: bool,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let data = load_binary(file_name).await?;
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str());
    Texture::from_bytes(device, queue, &data, file_name, extension, is_normal_map)
}

/// Neutral 1x1 texture for a slot whose file is missing.
pub fn fallback_texture(slot: u32, shader: MaterialShader, device: &wgpu::Device, queue: &wgpu::Queue) -> Texture {
    match (shader, slot) {
        (MaterialShader::Terrain, TEXTURE_SLOT_NORMAL) => {
            Texture::create_default_normal_map(1, 1, device, queue)
        }
        (MaterialShader::Terrain, TEXTURE_SLOT_SPECULAR) => {
            Texture::create_solid([64, 64, 64, 255], 1, 1, true, device, queue)
        }
        // no distortion
        (MaterialShader::Water, TEXTURE_SLOT_DUDV) => {
            Texture::create_solid([128, 128, 0, 255], 1, 1, true, device, queue)
        }
        _ => Texture::create_solid([128, 128, 128, 255], 1, 1, false, device, queue),
    }
}

fn is_normal_slot(shader: MaterialShader, slot: u32) -> bool {
    match shader {
        MaterialShader::Terrain => slot == TEXTURE_SLOT_NORMAL || slot == TEXTURE_SLOT_SPECULAR,
        // distortion offsets are data, not colour
        MaterialShader::Water => slot == TEXTURE_SLOT_DUDV,
    }
}

/// Build a material from its config and load every texture it lists.
///
/// Terrain materials always end up with a diffuse, normal and specular
/// texture, generated ones standing in for files that are not configured or
/// fail to load.
pub async fn load_material(
    config: &MaterialConfig,
    shader: MaterialShader,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> Material {
    let mut material = Material::new(
        &config.name,
        config.ka,
        config.kd,
        config.ks,
        config.shininess,
        shader,
    );
    for (slot, file_name) in &config.textures {
        let texture = match load_texture(file_name, is_normal_slot(shader, *slot), device, queue).await {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!(
                    "Texture {} of material {} could not be loaded ({}), using a default.",
                    file_name,
                    config.name,
                    e
                );
                fallback_texture(*slot, shader, device, queue)
            }
        };
        material.add_texture(*slot, texture);
    }

    let required: &[u32] = match shader {
        MaterialShader::Terrain => &[TEXTURE_SLOT_DIFFUSE, TEXTURE_SLOT_NORMAL, TEXTURE_SLOT_SPECULAR],
        MaterialShader::Water => &[TEXTURE_SLOT_DUDV],
    };
    for slot in required {
        if material.texture(*slot).is_none() {
            log::warn!("Material {} has no texture in slot {}, using a default.", config.name, slot);
            material.add_texture(*slot, fallback_texture(*slot, shader, device, queue));
        }
    }
    material
}
