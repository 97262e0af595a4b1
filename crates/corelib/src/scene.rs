//! Flat scene: opaque and translucent objects, no hierarchy.

use crate::math::{Matrix4, Vec3};
use crate::transform::Transform;

/// GPU mesh id handed out by the render backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// GPU texture id handed out by the render backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Shader program id, passed through to the backend untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

impl ShaderHandle {
    pub const TEXTURED: ShaderHandle = ShaderHandle(0);
}

/// What the frame loop needs from a drawable object.
pub trait Renderable {
    fn world_matrix(&self) -> &Matrix4;

    fn alpha(&self) -> f32;

    /// World-space position, read from the world matrix translation.
    fn position(&self) -> Vec3 {
        self.world_matrix().translation_part()
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub mesh: MeshHandle,
    pub texture: TextureHandle,
    pub world_matrix: Matrix4,
    pub alpha: f32,
}

impl SceneObject {
    pub fn new(mesh: MeshHandle, texture: TextureHandle, world_matrix: Matrix4) -> Self {
        Self {
            mesh,
            texture,
            world_matrix,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

impl Renderable for SceneObject {
    #[inline]
    fn world_matrix(&self) -> &Matrix4 {
        &self.world_matrix
    }

    #[inline]
    fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// Objects split by pass: opaque ones draw first without blending.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub opaque: Vec<SceneObject>,
    pub translucent: Vec<SceneObject>,
}

impl Scene {
    pub const SPHERE_COUNT: usize = 3;
    pub const SPHERE_RADIUS: f32 = 1.5;
    pub const GROUND_HALF_EXTENT: f32 = 10.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Ground plane plus a row of spheres resting on it, fading from
    /// alpha 0.2 (far end) to 1.0.
    ///
    /// `ground_mesh` is a unit quad in the XY plane facing +Z; `sphere_mesh`
    /// a unit sphere.
    pub fn reference(ground_mesh: MeshHandle, sphere_mesh: MeshHandle, texture: TextureHandle) -> Self {
        let mut ground = Transform::identity().with_uniform_scale(Self::GROUND_HALF_EXTENT);
        ground.rotation_degrees.x = -90.0;

        let translucent = (0..Self::SPHERE_COUNT)
            .map(|i| {
                let world = Transform::identity()
                    .with_uniform_scale(Self::SPHERE_RADIUS)
                    .with_translation(Vec3::new(0.0, Self::SPHERE_RADIUS, -5.0 + i as f32 * 5.0))
                    .matrix();
                let t = i as f32 / (Self::SPHERE_COUNT - 1) as f32;
                SceneObject::new(sphere_mesh, texture, world).with_alpha(0.2 + 0.8 * t)
            })
            .collect();

        Self {
            opaque: vec![SceneObject::new(ground_mesh, texture, ground.matrix())],
            translucent,
        }
    }

    pub fn len(&self) -> usize {
        self.opaque.len() + self.translucent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
