//! Linear algebra kernel.
//!
//! Thin, strongly-typed layer over `glam`: column-major storage, column
//! vectors, angles in degrees at the API surface. Vectors are plain
//! [`Vec3`]; the kernel normalises with `normalize_or_zero`, so a zero vector
//! stays zero instead of turning into NaNs.

mod matrix3;
mod matrix4;

pub use glam::Vec3;
pub use matrix3::Matrix3;
pub use matrix4::{Matrix4, SINGULAR_EPSILON};

/// World up axis used by the orbit camera.
pub const WORLD_UP: Vec3 = Vec3::Y;
