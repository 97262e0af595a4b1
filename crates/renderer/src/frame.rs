//! Per-frame orchestration: time, camera, projection, then an opaque pass
//! followed by a back-to-front blended pass.

use corelib::{
    FrameClock, InputQueue, MathError, Matrix4, OrbitCamera, Renderable, Scene, SceneObject,
    ShaderHandle, Vec3,
};

use crate::error::RenderResult;

/// How fragments combine with the colour target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    /// Blending disabled, fragments replace the target.
    Opaque,
    /// `src * src_alpha + dst * (1 - src_alpha)`.
    AlphaBlend,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ClearColor {
    pub const SKY: ClearColor = ClearColor {
        r: 0.707,
        g: 0.707,
        b: 1.0,
        a: 1.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionSettings {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl ProjectionSettings {
    /// Projection for a `width` x `height` viewport; zero sizes count as 1.
    pub fn matrix(&self, width: u32, height: u32) -> Matrix4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Matrix4::perspective(self.fov_y_degrees, aspect, self.near, self.far)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSettings {
    pub projection: ProjectionSettings,
    pub clear_color: ClearColor,
    pub shader: ShaderHandle,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            projection: ProjectionSettings::default(),
            clear_color: ClearColor::SKY,
            shader: ShaderHandle::TEXTURED,
        }
    }
}

/// Everything a draw call needs besides the object itself.
#[derive(Clone, Copy, Debug)]
pub struct DrawContext {
    pub view: Matrix4,
    pub camera_position: Vec3,
    pub projection: Matrix4,
    pub shader: ShaderHandle,
}

/// Graphics API seam. Calls arrive in frame order:
/// `clear`, then `set_blend_mode`/`draw` any number of times, then `present`.
pub trait RenderBackend {
    /// Current drawable size in pixels.
    fn viewport_size(&self) -> (u32, u32);

    /// Clear colour and depth for a new frame.
    fn clear(&mut self, color: ClearColor) -> RenderResult<()>;

    fn set_blend_mode(&mut self, mode: BlendMode);

    fn draw(&mut self, object: &SceneObject, ctx: &DrawContext) -> RenderResult<()>;

    fn present(&mut self) -> RenderResult<()>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    Rendered { opaque: usize, translucent: usize },
    /// The camera could not produce a usable view; nothing was drawn.
    Skipped(MathError),
}

/// Sort back to front: descending distance to `camera_position`.
///
/// Stable, so equidistant objects keep their scene order.
pub fn sort_back_to_front<R: Renderable>(objects: &mut [&R], camera_position: Vec3) {
    objects.sort_by(|a, b| {
        let da = a.position().distance_squared(camera_position);
        let db = b.position().distance_squared(camera_position);
        db.total_cmp(&da)
    });
}

/// Drives one frame at a time against a [`RenderBackend`].
pub struct FrameOrchestrator {
    camera: OrbitCamera,
    clock: FrameClock,
    settings: FrameSettings,
    projection: Matrix4,
}

impl FrameOrchestrator {
    pub fn new(camera: OrbitCamera, clock: FrameClock, settings: FrameSettings) -> Self {
        Self {
            camera,
            clock,
            settings,
            projection: Matrix4::IDENTITY,
        }
    }

    #[inline]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    #[inline]
    pub fn settings(&self) -> &FrameSettings {
        &self.settings
    }

    /// Projection used by the most recent frame.
    #[inline]
    pub fn projection(&self) -> &Matrix4 {
        &self.projection
    }

    /// Render one frame.
    ///
    /// Every queued input event is applied before the camera updates. A math
    /// failure skips the frame with a warning; backend errors propagate.
    pub fn render_frame<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        scene: &Scene,
        input: &mut InputQueue,
    ) -> RenderResult<FrameOutcome> {
        self.clock.update();
        for event in input.drain() {
            self.camera.apply(&event);
        }

        let view = match self.prepare_camera() {
            Ok(view) => view,
            Err(err) => {
                log::warn!("Skipping frame {}: {err}", self.clock.frame_count());
                return Ok(FrameOutcome::Skipped(err));
            }
        };

        let (width, height) = backend.viewport_size();
        self.projection = self.settings.projection.matrix(width, height);

        let ctx = DrawContext {
            view,
            camera_position: self.camera.position(),
            projection: self.projection,
            shader: self.settings.shader,
        };

        backend.clear(self.settings.clear_color)?;

        backend.set_blend_mode(BlendMode::Opaque);
        for object in &scene.opaque {
            backend.draw(object, &ctx)?;
        }

        backend.set_blend_mode(BlendMode::AlphaBlend);
        let mut sorted: Vec<&SceneObject> = scene.translucent.iter().collect();
        sort_back_to_front(&mut sorted, ctx.camera_position);
        for object in &sorted {
            backend.draw(object, &ctx)?;
        }
        backend.set_blend_mode(BlendMode::Opaque);

        backend.present()?;

        Ok(FrameOutcome::Rendered {
            opaque: scene.opaque.len(),
            translucent: sorted.len(),
        })
    }

    fn prepare_camera(&mut self) -> Result<Matrix4, MathError> {
        self.camera.update(
            self.clock.delta_time(),
            self.clock.seconds_elapsed_since_start(),
        )?;
        self.camera.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{InputEvent, MeshHandle, OrbitSettings, TextureHandle};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Blend(BlendMode),
        Draw { mesh: MeshHandle, z: f32 },
        Present,
    }

    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
        last_ctx: Option<DrawContext>,
    }

    impl RenderBackend for RecordingBackend {
        fn viewport_size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn clear(&mut self, _color: ClearColor) -> RenderResult<()> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn set_blend_mode(&mut self, mode: BlendMode) {
            self.calls.push(Call::Blend(mode));
        }

        fn draw(&mut self, object: &SceneObject, ctx: &DrawContext) -> RenderResult<()> {
            self.calls.push(Call::Draw {
                mesh: object.mesh,
                z: object.position().z,
            });
            self.last_ctx = Some(*ctx);
            Ok(())
        }

        fn present(&mut self) -> RenderResult<()> {
            self.calls.push(Call::Present);
            Ok(())
        }
    }

    const GROUND: MeshHandle = MeshHandle(0);
    const SPHERE: MeshHandle = MeshHandle(1);

    fn sphere_at(z: f32) -> SceneObject {
        SceneObject::new(SPHERE, TextureHandle(0), Matrix4::translation(Vec3::new(0.0, 0.0, z)))
            .with_alpha(0.5)
    }

    fn orchestrator() -> FrameOrchestrator {
        FrameOrchestrator::new(OrbitCamera::default(), FrameClock::new(), FrameSettings::default())
    }

    #[test]
    fn sorts_farthest_first() {
        let near = sphere_at(1.0);
        let far = sphere_at(10.0);
        let mid = sphere_at(5.0);
        let mut objects = vec![&near, &far, &mid];
        sort_back_to_front(&mut objects, Vec3::ZERO);
        let zs: Vec<f32> = objects.iter().map(|o| o.position().z).collect();
        assert_eq!(zs, vec![10.0, 5.0, 1.0]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let a = sphere_at(3.0).with_alpha(0.1);
        let b = sphere_at(-3.0).with_alpha(0.2);
        let c = sphere_at(3.0).with_alpha(0.3);
        let mut objects = vec![&a, &b, &c];
        sort_back_to_front(&mut objects, Vec3::ZERO);
        let alphas: Vec<f32> = objects.iter().map(|o| o.alpha()).collect();
        assert_eq!(alphas, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn frame_draws_opaque_then_blended_back_to_front() {
        let mut scene = Scene::new();
        scene
            .opaque
            .push(SceneObject::new(GROUND, TextureHandle(0), Matrix4::IDENTITY));
        scene.translucent = vec![sphere_at(-5.0), sphere_at(0.0), sphere_at(5.0)];

        let mut backend = RecordingBackend::default();
        let mut frames = orchestrator();
        let outcome = frames
            .render_frame(&mut backend, &scene, &mut InputQueue::new())
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Rendered { opaque: 1, translucent: 3 });

        // Default camera sits at +Z above the origin, so -5 is farthest.
        assert_eq!(
            backend.calls,
            vec![
                Call::Clear,
                Call::Blend(BlendMode::Opaque),
                Call::Draw { mesh: GROUND, z: 0.0 },
                Call::Blend(BlendMode::AlphaBlend),
                Call::Draw { mesh: SPHERE, z: -5.0 },
                Call::Draw { mesh: SPHERE, z: 0.0 },
                Call::Draw { mesh: SPHERE, z: 5.0 },
                Call::Blend(BlendMode::Opaque),
                Call::Present,
            ]
        );
    }

    #[test]
    fn queued_input_is_applied_before_the_camera_updates() {
        let scene = Scene::reference(GROUND, SPHERE, TextureHandle(0));
        let mut backend = RecordingBackend::default();
        let mut frames = orchestrator();

        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        input.push(InputEvent::PointerMove { x: 360.0, y: 0.0 });
        input.push(InputEvent::PointerUp);
        frames.render_frame(&mut backend, &scene, &mut input).unwrap();
        assert!(input.is_empty());

        // Yawed half a turn: the camera now sits behind -Z, so the z = 5
        // sphere is the farthest.
        let ctx = backend.last_ctx.expect("drawn");
        assert!(ctx.camera_position.z < 0.0);
        let sphere_draws: Vec<&Call> = backend
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Draw { mesh, .. } if *mesh == SPHERE))
            .collect();
        assert_eq!(sphere_draws[0], &Call::Draw { mesh: SPHERE, z: 5.0 });
        assert!(
            ctx.view
                .approx_eq(&frames.camera().view_matrix().unwrap(), 1e-6)
        );
    }

    #[test]
    fn projection_tracks_viewport_aspect() {
        let mut backend = RecordingBackend::default();
        let mut frames = orchestrator();
        frames
            .render_frame(&mut backend, &Scene::new(), &mut InputQueue::new())
            .unwrap();
        let expected = ProjectionSettings::default().matrix(800, 600);
        assert!(frames.projection().approx_eq(&expected, 1e-6));
        assert_eq!(backend.calls.first(), Some(&Call::Clear));
        assert_eq!(backend.calls.last(), Some(&Call::Present));
    }

    #[test]
    fn degenerate_camera_skips_the_frame() {
        let camera = OrbitCamera::new(OrbitSettings::default()).unwrap();
        let mut frames = FrameOrchestrator::new(camera, FrameClock::new(), FrameSettings::default());
        frames.camera_mut().set_target(Vec3::splat(f32::MAX));

        let mut backend = RecordingBackend::default();
        let outcome = frames
            .render_frame(&mut backend, &Scene::new(), &mut InputQueue::new())
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped(MathError::DegenerateLookAt));
        assert!(backend.calls.is_empty());

        // Recovers once the camera is sane again.
        frames.camera_mut().set_target(Vec3::ZERO);
        let outcome = frames
            .render_frame(&mut backend, &Scene::new(), &mut InputQueue::new())
            .unwrap();
        assert!(matches!(outcome, FrameOutcome::Rendered { .. }));
    }

    #[test]
    fn zero_height_viewport_still_yields_finite_projection() {
        let m = ProjectionSettings::default().matrix(640, 0);
        assert!(m.elements().iter().all(|f| f.is_finite()));
    }
}
