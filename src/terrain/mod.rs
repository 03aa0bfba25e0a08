//! Procedural terrain: heightfield synthesis and mesh extraction.

use crate::config::{TerrainConfig, WaterConfig};

pub mod heightfield;
pub mod mesh;

use heightfield::Heightfield;
use mesh::MeshData;

/// Base spike plus fractal octaves, as described by `config`.
pub fn build_heightfield(config: &TerrainConfig) -> Heightfield {
    let mut heightfield = Heightfield::new(config.levels);
    heightfield.add_spike(config.spike.min, config.spike.max, config.spike.coarseness);
    heightfield.add_octaves(
        config.octaves.count,
        config.octaves.amplitude,
        config.octaves.coarseness,
    );
    heightfield
}

pub fn build_terrain_mesh(config: &TerrainConfig) -> MeshData {
    mesh::extract(&build_heightfield(config))
}

/// The water surface is a flat grid, scaled up by its object transform.
pub fn build_water_mesh(config: &WaterConfig) -> MeshData {
    mesh::extract(&Heightfield::new(config.levels))
}
