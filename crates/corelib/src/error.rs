//! Error types shared by the math kernel and the camera.

use thiserror::Error;

/// Failures of the linear algebra kernel.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MathError {
    #[error("matrix is singular (determinant {determinant})")]
    SingularMatrix { determinant: f32 },

    /// Eye and target coincide, or the view direction is parallel to `up`.
    #[error("look-at basis is degenerate")]
    DegenerateLookAt,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
