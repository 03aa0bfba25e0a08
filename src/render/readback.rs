//! Copy a rendered color texture back to the CPU.

use std::iter;

use anyhow::{anyhow, ensure};
use instant::Duration;

/// Rows of a texture-to-buffer copy have to start on this boundary.
const ROW_ALIGNMENT: u32 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

/// Read `texture` (8 bit RGBA or BGRA, `COPY_SRC` usage) into an image.
///
/// Blocks on the device until the copy has finished.
pub async fn read_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> anyhow::Result<image::RgbaImage> {
    let format = texture.format();
    let swap_red_blue = matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    );
    ensure!(
        swap_red_blue
            || matches!(
                format,
                wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb
            ),
        "cannot read back a texture of format {:?}",
        format
    );

    let size = texture.size();
    let unpadded_row = 4 * size.width;
    let padded_row = unpadded_row.div_ceil(ROW_ALIGNMENT) * ROW_ALIGNMENT;

    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        size: (padded_row * size.height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        label: Some("Readback Buffer"),
        mapped_at_creation: false,
    });
    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Readback Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(size.height),
            },
        },
        wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(iter::once(encoder.finish()));

    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = output_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        // the receiver only goes away if this function already returned
        let _ = tx.send(result);
    });
    device.poll(wgpu::PollType::Wait {
        submission_index: None,
        timeout: Some(Duration::from_secs(3)),
    })?;
    rx.receive()
        .await
        .ok_or_else(|| anyhow!("the readback buffer was never mapped"))??;

    let data = buffer_slice.get_mapped_range();
    let mut pixels = Vec::with_capacity((unpadded_row * size.height) as usize);
    for row in data.chunks(padded_row as usize) {
        pixels.extend_from_slice(&row[..unpadded_row as usize]);
    }
    drop(data);
    output_buffer.unmap();

    if swap_red_blue {
        pixels.chunks_exact_mut(4).for_each(|px| px.swap(0, 2));
    }
    image::RgbaImage::from_raw(size.width, size.height, pixels)
        .ok_or_else(|| anyhow!("readback produced a buffer of the wrong size"))
}
