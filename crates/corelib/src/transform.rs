use crate::math::{Matrix4, Vec3};

/// Translation, rotation (degrees) and scale of a scene object.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec3,
    /// Rotation about X, Y and Z in degrees.
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_degrees,
            scale,
        }
    }

    #[inline]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    #[inline]
    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    /// Build matrix = T * Ry * Rx * Rz * S, composed by right-side
    /// multiplication so scale applies first.
    pub fn matrix(&self) -> Matrix4 {
        let mut m = Matrix4::translation(self.translation);
        m.multiply_right_side(&Matrix4::rotation_y_degrees(self.rotation_degrees.y))
            .multiply_right_side(&Matrix4::rotation_x_degrees(self.rotation_degrees.x))
            .multiply_right_side(&Matrix4::rotation_z_degrees(self.rotation_degrees.z))
            .multiply_right_side(&Matrix4::scale(self.scale.x, self.scale.y, self.scale.z));
        m
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
