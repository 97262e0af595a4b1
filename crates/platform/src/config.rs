use std::path::PathBuf;

use corelib::OrbitSettings;
use renderer::ProjectionSettings;

/// Everything the viewer needs to start.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub backends: wgpu::Backends,
    pub show_fps: bool,
    pub width: u32,
    pub height: u32,
    pub projection: ProjectionSettings,
    pub orbit: OrbitSettings,
    /// PNG used for every object; a procedural UV grid when unset.
    pub texture: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            show_fps: false,
            width: 1280,
            height: 720,
            projection: ProjectionSettings::default(),
            orbit: OrbitSettings::default(),
            texture: None,
        }
    }
}
