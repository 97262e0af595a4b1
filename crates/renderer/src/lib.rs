//! Renderer: frame orchestration over a backend seam, plus the wgpu backend.

pub mod error;
pub mod frame;
pub mod gpu;

pub use error::{RenderError, RenderResult};
pub use frame::{
    BlendMode, ClearColor, DrawContext, FrameOrchestrator, FrameOutcome, FrameSettings,
    ProjectionSettings, RenderBackend, sort_back_to_front,
};
pub use gpu::GpuState;
