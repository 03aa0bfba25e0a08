use terra_ngin::config::SceneConfig;

pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// A device without a surface, or `None` on machines without any adapter.
pub fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let _ = env_logger::builder().is_test(true).try_init();
    futures::executor::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok()?;
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Test Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .ok()
    })
}

/// Stand-in for the surface texture of a window.
pub fn output_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Test Output"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

/// The stock scene on a grid small enough for software adapters.
pub fn small_scene() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.terrain.levels = 5;
    config.terrain.spike.coarseness = 2;
    config.terrain.octaves.count = 3;
    config.terrain.octaves.coarseness = 2;
    config
}
