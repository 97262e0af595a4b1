use std::ops::Mul;

use glam::{Mat4, Vec3, Vec4};

use crate::error::MathError;

/// Determinants at or below this magnitude are treated as singular.
pub const SINGULAR_EPSILON: f32 = 1e-12;

/// 4x4 affine/projective transform.
///
/// Storage is column-major and vectors are columns (`v' = M * v`), so the
/// translation of an affine matrix lives in the fourth column
/// (`elements()[12..15]`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4(Mat4);

impl Matrix4 {
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    /// Elements in column-major order.
    #[inline]
    pub fn elements(&self) -> [f32; 16] {
        self.0.to_cols_array()
    }

    /// Column-major 2D array, the layout WGSL `mat4x4<f32>` expects.
    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.0.to_cols_array_2d()
    }

    /// Rotation about +X, angle in degrees.
    #[inline]
    pub fn rotation_x_degrees(degrees: f32) -> Self {
        Self(Mat4::from_rotation_x(degrees.to_radians()))
    }

    /// Rotation about +Y, angle in degrees.
    #[inline]
    pub fn rotation_y_degrees(degrees: f32) -> Self {
        Self(Mat4::from_rotation_y(degrees.to_radians()))
    }

    /// Rotation about +Z, angle in degrees.
    #[inline]
    pub fn rotation_z_degrees(degrees: f32) -> Self {
        Self(Mat4::from_rotation_z(degrees.to_radians()))
    }

    #[inline]
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self(Mat4::from_scale(Vec3::new(x, y, z)))
    }

    #[inline]
    pub fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s, s)
    }

    #[inline]
    pub fn translation(offset: Vec3) -> Self {
        Self(Mat4::from_translation(offset))
    }

    /// Right-handed perspective projection with depth mapped to [0, 1].
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self(Mat4::perspective_rh(
            fov_y_degrees.to_radians(),
            aspect.max(1e-6),
            near,
            far,
        ))
    }

    /// `self = self * rhs`: `rhs` is applied first, in the object's local
    /// space.
    #[inline]
    pub fn multiply_right_side(&mut self, rhs: &Matrix4) -> &mut Self {
        self.0 *= rhs.0;
        self
    }

    /// `self = lhs * self`: `lhs` is applied last, in world space.
    #[inline]
    pub fn multiply_left_side(&mut self, lhs: &Matrix4) -> &mut Self {
        self.0 = lhs.0 * self.0;
        self
    }

    /// Moves the transform by `offset` in world space, leaving rotation and
    /// scale untouched.
    #[inline]
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.multiply_left_side(&Matrix4::translation(offset))
    }

    #[inline]
    pub fn determinant(&self) -> f32 {
        self.0.determinant()
    }

    /// Inverse transform, or [`MathError::SingularMatrix`] when the
    /// determinant is zero, tiny or not finite.
    pub fn try_inverse(&self) -> Result<Matrix4, MathError> {
        let determinant = self.determinant();
        if !determinant.is_finite() || determinant.abs() <= SINGULAR_EPSILON {
            return Err(MathError::SingularMatrix { determinant });
        }
        Ok(Self(self.0.inverse()))
    }

    /// Builds the world matrix of a viewer at `eye` looking at `target`.
    ///
    /// Columns are `right`, `true_up` and `-forward` (the viewer looks down
    /// its local -Z), translation is `eye`. Its inverse is the usual
    /// right-handed view matrix.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Result<Matrix4, MathError> {
        let forward = (target - eye).normalize_or_zero();
        if forward == Vec3::ZERO {
            return Err(MathError::DegenerateLookAt);
        }
        let right = forward.cross(up).normalize_or_zero();
        if right == Vec3::ZERO {
            return Err(MathError::DegenerateLookAt);
        }
        let true_up = right.cross(forward);

        Ok(Self(Mat4::from_cols(
            right.extend(0.0),
            true_up.extend(0.0),
            (-forward).extend(0.0),
            eye.extend(1.0),
        )))
    }

    /// In-place [`Matrix4::look_at`]. The matrix is left unchanged on error.
    pub fn set_look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) -> Result<&mut Self, MathError> {
        *self = Self::look_at(eye, target, up)?;
        Ok(self)
    }

    /// Column `index` (0..4) as a 4-vector.
    #[inline]
    pub fn column(&self, index: usize) -> Vec4 {
        self.0.col(index)
    }

    /// Translation stored in the fourth column.
    #[inline]
    pub fn translation_part(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.0.transform_point3(point)
    }

    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.0.transform_vector3(vector)
    }

    /// Element-wise comparison with an absolute tolerance.
    #[inline]
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.0.abs_diff_eq(other.0, epsilon)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    #[inline]
    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Self(self.0 * rhs.0)
    }
}

impl From<Mat4> for Matrix4 {
    fn from(m: Mat4) -> Self {
        Self(m)
    }
}

impl From<Matrix4> for Mat4 {
    fn from(m: Matrix4) -> Self {
        m.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn right_side_multiplication_applies_rhs_first() {
        let mut m = Matrix4::translation(Vec3::new(5.0, 0.0, 0.0));
        m.multiply_right_side(&Matrix4::uniform_scale(2.0));
        // Scale first, then translate.
        let p = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(7.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn translate_is_world_space() {
        let mut m = Matrix4::uniform_scale(0.5);
        m.translate(Vec3::new(0.0, 1.5, -5.0));
        assert!(m.translation_part().abs_diff_eq(Vec3::new(0.0, 1.5, -5.0), EPS));
        let e = m.elements();
        assert!((e[0] - 0.5).abs() < EPS);
        assert!((e[12] - 0.0).abs() < EPS);
        assert!((e[13] - 1.5).abs() < EPS);
        assert!((e[14] + 5.0).abs() < EPS);
    }

    #[test]
    fn rotation_about_x_by_degrees() {
        let r = Matrix4::rotation_x_degrees(-90.0);
        let n = r.transform_vector(Vec3::Z);
        assert!(n.abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn rotation_about_y_by_degrees() {
        let r = Matrix4::rotation_y_degrees(90.0);
        let v = r.transform_vector(Vec3::Z);
        assert!(v.abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn inverse_of_scaled_rigid_transform() {
        let mut m = Matrix4::translation(Vec3::new(1.0, -2.0, 3.0));
        m.multiply_right_side(&Matrix4::rotation_y_degrees(30.0))
            .multiply_right_side(&Matrix4::rotation_x_degrees(-45.0))
            .multiply_right_side(&Matrix4::scale(2.0, 0.5, 3.0));
        let inv = m.try_inverse().expect("invertible");
        assert!((m * inv).approx_eq(&Matrix4::IDENTITY, EPS));
        assert!((inv * m).approx_eq(&Matrix4::IDENTITY, EPS));
    }

    #[test]
    fn singular_matrix_fails_to_invert() {
        let m = Matrix4::scale(1.0, 0.0, 1.0);
        match m.try_inverse() {
            Err(MathError::SingularMatrix { determinant }) => assert_eq!(determinant, 0.0),
            other => panic!("expected singular error, got {other:?}"),
        }
    }

    #[test]
    fn look_at_inverse_matches_glam_view() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let target = Vec3::new(0.0, 1.0, 0.0);
        let world = Matrix4::look_at(eye, target, Vec3::Y).unwrap();
        let view = world.try_inverse().unwrap();
        let expected = Matrix4::from(Mat4::look_at_rh(eye, target, Vec3::Y));
        assert!(view.approx_eq(&expected, 1e-4));
        assert!(world.translation_part().abs_diff_eq(eye, EPS));
    }

    #[test]
    fn look_at_basis_is_orthonormal() {
        let world = Matrix4::look_at(Vec3::new(-2.0, 7.0, 1.0), Vec3::ZERO, Vec3::Y).unwrap();
        let x = world.column(0).truncate();
        let y = world.column(1).truncate();
        let z = world.column(2).truncate();
        for v in [x, y, z] {
            assert!((v.length() - 1.0).abs() < EPS);
        }
        assert!(x.dot(y).abs() < EPS);
        assert!(y.dot(z).abs() < EPS);
        assert!(z.dot(x).abs() < EPS);
        // Right-handed: x cross y = z.
        assert!(x.cross(y).abs_diff_eq(z, EPS));
    }

    #[test]
    fn look_at_rejects_degenerate_input() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Matrix4::look_at(p, p, Vec3::Y), Err(MathError::DegenerateLookAt));
        assert_eq!(
            Matrix4::look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y),
            Err(MathError::DegenerateLookAt)
        );

        let mut m = Matrix4::uniform_scale(2.0);
        assert!(m.set_look_at(p, p, Vec3::Y).is_err());
        assert_eq!(m, Matrix4::uniform_scale(2.0));
    }

    #[test]
    fn copies_do_not_alias() {
        let original = Matrix4::rotation_y_degrees(10.0);
        let mut copy = original;
        copy.translate(Vec3::ONE);
        assert_ne!(original, copy);
        assert_eq!(original.translation_part(), Vec3::ZERO);
    }
}
