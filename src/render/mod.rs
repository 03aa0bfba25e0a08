//! Frame composition for the terrain and water scene.
//!
//! Every frame runs three passes in a fixed order:
//!
//! 1. reflection: mirrored camera, geometry above the water, into an offscreen target
//! 2. refraction: main camera, geometry below the water, into an offscreen target
//! 3. composite: main camera, everything including the water, into the output
//!
//! - `pass` holds the GPU-free frame plan, per-pass context and schedule
//! - `lighting` computes the day cycle
//! - `target` wraps the offscreen color and depth attachments
//! - `scene` stores meshes, materials, objects and their bind groups
//! - `coordinator` ties all of the above to the device
//! - `readback` copies a rendered texture back into an image

pub mod coordinator;
pub mod lighting;
pub mod pass;
pub mod readback;
pub mod scene;
pub mod target;

pub use coordinator::RenderCoordinator;
