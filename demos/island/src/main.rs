use terra_ngin::{config::SceneConfig, flow};

fn main() -> anyhow::Result<()> {
    let mut config = SceneConfig::default();
    // a higher, more jagged island than the default scene
    config.terrain.spike.max = 1.5;
    config.terrain.octaves.amplitude = 1.2;
    flow::run(config)
}
