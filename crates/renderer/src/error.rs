use corelib::{MathError, MeshHandle, ShaderHandle, TextureHandle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Surface must be reconfigured before the next frame.
    #[error("Surface lost or outdated")]
    SurfaceLost,

    #[error("Surface error: {0}")]
    Surface(wgpu::SurfaceError),

    #[error("Unknown mesh {0:?}")]
    UnknownMesh(MeshHandle),

    #[error("Unknown texture {0:?}")]
    UnknownTexture(TextureHandle),

    #[error("Unknown shader {0:?}")]
    UnknownShader(ShaderHandle),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            other => RenderError::Surface(other),
        }
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
