//! Core types: math kernel, transforms, orbit camera, input queue, frame
//! clock and scene objects. Renderer-agnostic.

pub mod camera;
pub mod error;
pub mod input;
pub mod math;
pub mod scene;
pub mod time;
pub mod transform;

pub use camera::{OrbitCamera, OrbitSettings};
pub use error::{CoreError, CoreResult, MathError};
pub use input::{InputEvent, InputQueue};
pub use math::{Matrix3, Matrix4, Vec3};
pub use scene::{MeshHandle, Renderable, Scene, SceneObject, ShaderHandle, TextureHandle};
pub use time::FrameClock;
pub use transform::Transform;
