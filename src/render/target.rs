//! Offscreen render targets for the reflection and refraction passes.

use crate::data_structures::texture::Texture;

/// A color attachment plus the depth attachment it is rendered with.
///
/// Both are sampled by the water material afterwards, so a target is thrown
/// away and rebuilt whenever the viewport changes size.
#[derive(Debug)]
pub struct RenderTarget {
    pub color: Texture,
    pub depth: Texture,
    label: String,
}

impl RenderTarget {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let color = Texture::create_color_target(
            device,
            [width, height],
            format,
            &format!("{} color", label),
        );
        let depth = Texture::create_depth_texture(device, [width, height], &format!("{} depth", label));
        Self {
            color,
            depth,
            label: label.to_string(),
        }
    }

    /// A new target of the same format at another resolution.
    pub fn resized(&self, device: &wgpu::Device, width: u32, height: u32) -> Self {
        Self::new(device, self.color.texture.format(), width, height, &self.label)
    }

    pub fn size(&self) -> [u32; 2] {
        self.color.size()
    }

    pub fn begin_pass<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        clear_colour: wgpu::Color,
        label: &str,
    ) -> wgpu::RenderPass<'e> {
        begin_pass(encoder, &self.color.view, &self.depth.view, clear_colour, label)
    }
}

/// Start a pass that clears `color` and `depth` before drawing.
pub fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    color: &wgpu::TextureView,
    depth: &wgpu::TextureView,
    clear_colour: wgpu::Color,
    label: &str,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear_colour),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    })
}
