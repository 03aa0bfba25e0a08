//! Scene configuration.
//!
//! A plain struct handed to [`crate::flow::run`] or straight to the
//! [`crate::render::coordinator::RenderCoordinator`]. `Default` yields the
//! stock island scene.

use anyhow::ensure;
use cgmath::Vector3;

/// One spike of the base shape: control points at `min`, the center at `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpikeConfig {
    pub min: f32,
    pub max: f32,
    pub coarseness: u32,
}

/// Fractal detail: `count` layers of random noise, each half the amplitude
/// and twice the resolution of the one before.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctaveConfig {
    pub count: u32,
    pub amplitude: f32,
    pub coarseness: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TerrainConfig {
    pub levels: u32,
    pub spike: SpikeConfig,
    pub octaves: OctaveConfig,
    pub translation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl TerrainConfig {
    /// Samples along one side of the heightfield.
    pub fn size(&self) -> usize {
        (1usize << self.levels) + 1
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaterConfig {
    pub levels: u32,
    pub height: f32,
    pub scale: Vector3<f32>,
}

/// Lighting coefficients and texture files of one material.
///
/// Paths are relative to the `assets` directory.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialConfig {
    pub name: String,
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub shininess: u32,
    pub textures: Vec<(u32, String)>,
}

impl MaterialConfig {
    fn terrain(name: &str, shininess: u32) -> Self {
        use crate::data_structures::model::{
            TEXTURE_SLOT_DIFFUSE, TEXTURE_SLOT_NORMAL, TEXTURE_SLOT_SPECULAR,
        };
        Self {
            name: name.to_string(),
            ka: 0.1,
            kd: 0.9,
            ks: 1.0,
            shininess,
            textures: vec![
                (TEXTURE_SLOT_DIFFUSE, format!("textures/{}_diff.png", name)),
                (TEXTURE_SLOT_NORMAL, format!("textures/{}_norm.png", name)),
                (TEXTURE_SLOT_SPECULAR, format!("textures/{}_spec.png", name)),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub rotate_x: i32,
    pub rotate_y: i32,
    pub scale_percent: i32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub terrain: TerrainConfig,
    pub water: WaterConfig,
    /// Terrain materials in blend order: flat ground, slopes, shore.
    pub terrain_materials: Vec<MaterialConfig>,
    pub water_material: MaterialConfig,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        use crate::data_structures::model::TEXTURE_SLOT_DUDV;
        Self {
            terrain: TerrainConfig {
                levels: 9,
                spike: SpikeConfig {
                    min: -2.0,
                    max: 1.0,
                    coarseness: 3,
                },
                octaves: OctaveConfig {
                    count: 5,
                    amplitude: 1.0,
                    coarseness: 4,
                },
                translation: Vector3::new(0.0, -1.0, 0.0),
                scale: Vector3::new(1.0, 8.5, 1.0),
            },
            water: WaterConfig {
                levels: 1,
                height: -2.0,
                scale: Vector3::new(1000.0, 1.0, 1000.0),
            },
            terrain_materials: vec![
                MaterialConfig::terrain("grass", 3),
                MaterialConfig::terrain("rock", 12),
                MaterialConfig::terrain("sand", 8),
            ],
            water_material: MaterialConfig {
                name: "water".to_string(),
                ka: 0.1,
                kd: 0.9,
                ks: 0.58,
                shininess: 91,
                textures: vec![(TEXTURE_SLOT_DUDV, "textures/water_dudv.png".to_string())],
            },
            camera: CameraConfig {
                rotate_x: 354,
                rotate_y: 0,
                scale_percent: 30,
                fovy: 60.0,
                znear: 0.1,
                zfar: 100.0,
            },
        }
    }
}

impl SceneConfig {
    /// Reject parameters the heightfield would panic on.
    pub fn validate(&self) -> anyhow::Result<()> {
        let terrain = &self.terrain;
        ensure!(
            terrain.spike.coarseness <= terrain.levels,
            "spike coarseness {} exceeds the terrain level {}",
            terrain.spike.coarseness,
            terrain.levels
        );
        if terrain.octaves.count > 0 {
            let finest = terrain.octaves.coarseness + terrain.octaves.count - 1;
            ensure!(
                finest <= terrain.levels,
                "octaves reach coarseness {} but the terrain level is {}",
                finest,
                terrain.levels
            );
        }
        ensure!(
            !self.terrain_materials.is_empty()
                && self.terrain_materials.len() <= crate::data_structures::object::MAX_OBJECT_MATERIALS,
            "the terrain needs between 1 and {} materials, got {}",
            crate::data_structures::object::MAX_OBJECT_MATERIALS,
            self.terrain_materials.len()
        );
        ensure!(
            self.camera.znear > 0.0 && self.camera.znear < self.camera.zfar,
            "invalid clip planes near {} far {}",
            self.camera.znear,
            self.camera.zfar
        );
        Ok(())
    }
}
