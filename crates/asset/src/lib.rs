//! CPU-side scene assets: procedural meshes and RGBA8 textures.

pub mod mesh;
pub mod primitives;
pub mod texture;
