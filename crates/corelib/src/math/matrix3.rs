use std::ops::Mul;

use glam::{Mat3, Vec3};

/// 3x3 linear transform, column-major with column vectors like
/// [`Matrix4`](super::Matrix4).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3(Mat3);

impl Matrix3 {
    pub const IDENTITY: Self = Self(Mat3::IDENTITY);

    #[inline]
    pub fn rotation_x_degrees(degrees: f32) -> Self {
        Self(Mat3::from_rotation_x(degrees.to_radians()))
    }

    #[inline]
    pub fn rotation_y_degrees(degrees: f32) -> Self {
        Self(Mat3::from_rotation_y(degrees.to_radians()))
    }

    #[inline]
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self(Mat3::from_diagonal(Vec3::new(x, y, z)))
    }

    #[inline]
    pub fn multiply_vector(&self, v: Vec3) -> Vec3 {
        self.0 * v
    }

    /// `self = self * rhs`.
    #[inline]
    pub fn multiply_right_side(&mut self, rhs: &Matrix3) -> &mut Self {
        self.0 *= rhs.0;
        self
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.0.determinant()
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    #[inline]
    fn mul(self, rhs: Matrix3) -> Matrix3 {
        Self(self.0 * rhs.0)
    }
}
