//! Engine data structures: meshes, materials, textures and scene objects.
//!
//! - `model` contains the vertex layout, GPU meshes and materials
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `object` places a mesh with its materials in the world
//! - `registry` stores shared meshes and materials behind typed handles

pub mod model;
pub mod object;
pub mod registry;
pub mod texture;
