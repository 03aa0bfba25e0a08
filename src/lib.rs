//! terra-ngin
//!
//! Fractal terrain synthesis with a water surface rendered through a
//! reflection, refraction and composite pass per frame. Runs natively and on
//! WASM through wgpu.
//!
//! High-level modules
//! - `terrain`: heightfield synthesis and mesh extraction (CPU only)
//! - `data_structures`: GPU meshes, materials, textures, objects and the handle registry
//! - `camera`: orbit camera, its mirror image and the projection
//! - `pipelines`: terrain and water render pipelines and their uniform layouts
//! - `render`: the per-frame pass plan and the render coordinator
//! - `resources`: texture loading with generated fallbacks
//! - `config`: scene parameters
//! - `context`: GPU device, queue and window surface
//! - `flow`: window and event loop
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod terrain;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use wgpu;
