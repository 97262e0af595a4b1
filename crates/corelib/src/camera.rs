//! Orbit camera: yaw/pitch/zoom around a target point.

use crate::error::{CoreError, CoreResult, MathError};
use crate::input::InputEvent;
use crate::math::{Matrix3, Matrix4, Vec3, WORLD_UP};

/// Degrees of yaw/pitch per pixel of pointer drag.
pub const DRAG_SENSITIVITY: f32 = 0.5;
/// Zoom scale change per wheel unit.
pub const ZOOM_SENSITIVITY: f32 = 0.001;
/// Pitch stays inside [-PITCH_LIMIT, PITCH_LIMIT] degrees.
pub const PITCH_LIMIT_DEGREES: f32 = 85.0;

/// Initial orbit parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSettings {
    pub target: Vec3,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub zoom_scale: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw_degrees: 0.0,
            pitch_degrees: -45.0,
            zoom_scale: 1.0,
            min_distance: 1.0,
            max_distance: 30.0,
        }
    }
}

impl OrbitSettings {
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.min_distance.is_finite() && self.max_distance.is_finite()) {
            return Err(CoreError::InvalidSettings(
                "orbit distances must be finite".into(),
            ));
        }
        if self.min_distance <= 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "min distance must be positive, got {}",
                self.min_distance
            )));
        }
        if self.max_distance < self.min_distance {
            return Err(CoreError::InvalidSettings(format!(
                "max distance {} is below min distance {}",
                self.max_distance, self.min_distance
            )));
        }
        if !self.target.is_finite() {
            return Err(CoreError::InvalidSettings("orbit target must be finite".into()));
        }
        if !(self.yaw_degrees.is_finite()
            && self.pitch_degrees.is_finite()
            && self.zoom_scale.is_finite())
        {
            return Err(CoreError::InvalidSettings(
                "orbit angles and zoom must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Dragging { last_x: f32, last_y: f32 },
}

/// Camera orbiting `target` at a distance interpolated between the min and
/// max distance by `zoom_scale`.
///
/// Input handlers only change the orbit parameters. [`OrbitCamera::update`]
/// turns them into the world matrix once per frame, so between the two the
/// matrix (and every query derived from it) is stale.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    yaw_degrees: f32,
    pitch_degrees: f32,
    zoom_scale: f32,
    min_distance: f32,
    max_distance: f32,
    target: Vec3,
    world_matrix: Matrix4,
    drag: DragState,
}

impl OrbitCamera {
    pub fn new(settings: OrbitSettings) -> CoreResult<Self> {
        settings.validate()?;
        Ok(Self::from_validated(settings))
    }

    /// `settings` must already have passed [`OrbitSettings::validate`].
    fn from_validated(settings: OrbitSettings) -> Self {
        Self {
            yaw_degrees: settings.yaw_degrees,
            pitch_degrees: clamp_pitch(settings.pitch_degrees),
            zoom_scale: clamp_zoom(settings.zoom_scale),
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            target: settings.target,
            world_matrix: Matrix4::IDENTITY,
            drag: DragState::Idle,
        }
    }

    #[inline]
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    #[inline]
    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    #[inline]
    pub fn zoom_scale(&self) -> f32 {
        self.zoom_scale
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Non-finite targets are ignored.
    pub fn set_target(&mut self, target: Vec3) {
        if target.is_finite() {
            self.target = target;
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// World matrix as of the last successful [`OrbitCamera::update`].
    #[inline]
    pub fn world_matrix(&self) -> &Matrix4 {
        &self.world_matrix
    }

    /// Target-to-eye distance implied by the current zoom.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.min_distance + (self.max_distance - self.min_distance) * self.zoom_scale
    }

    /// Events with non-finite coordinates are dropped.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.drag = DragState::Dragging { last_x: x, last_y: y };
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let DragState::Dragging { last_x, last_y } = self.drag else {
            return;
        };
        self.yaw_degrees -= (x - last_x) * DRAG_SENSITIVITY;
        self.pitch_degrees = clamp_pitch(self.pitch_degrees - (y - last_y) * DRAG_SENSITIVITY);
        self.drag = DragState::Dragging { last_x: x, last_y: y };
    }

    pub fn on_pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Out-of-range results clamp to [0, 1]; non-finite deltas are dropped.
    pub fn on_zoom(&mut self, wheel_delta: f32) {
        if !wheel_delta.is_finite() {
            return;
        }
        self.zoom_scale = clamp_zoom(self.zoom_scale - wheel_delta * ZOOM_SENSITIVITY);
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => self.on_pointer_down(x, y),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::Wheel { delta } => self.on_zoom(delta),
        }
    }

    /// Recompute the world matrix from yaw, pitch, zoom and target.
    ///
    /// The tether `(0, 0, distance)` is pitched about X, then yawed about Y,
    /// and the eye sits at `target + tether` looking at the target. On error
    /// the previous world matrix is kept.
    pub fn update(&mut self, _delta_time: f32, _elapsed: f32) -> Result<(), MathError> {
        let tether = Vec3::new(0.0, 0.0, self.distance());
        let pitched = Matrix3::rotation_x_degrees(self.pitch_degrees).multiply_vector(tether);
        let tether = Matrix3::rotation_y_degrees(self.yaw_degrees).multiply_vector(pitched);

        let position = self.target + tether;
        self.world_matrix.set_look_at(position, self.target, WORLD_UP)?;
        log::trace!(
            "camera yaw={:.1} pitch={:.1} zoom={:.3} eye={position}",
            self.yaw_degrees,
            self.pitch_degrees,
            self.zoom_scale
        );
        Ok(())
    }

    /// Inverse of the world matrix, as a fresh value.
    pub fn view_matrix(&self) -> Result<Matrix4, MathError> {
        self.world_matrix.try_inverse()
    }

    /// Eye position read straight from the stored world matrix.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.world_matrix.translation_part()
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.world_matrix.column(0).truncate().normalize_or_zero()
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.world_matrix.column(1).truncate().normalize_or_zero()
    }

    /// Viewing direction; the world matrix stores it negated in column 2.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        (-self.world_matrix.column(2).truncate()).normalize_or_zero()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_validated(OrbitSettings::default())
    }
}

#[inline]
fn clamp_pitch(degrees: f32) -> f32 {
    degrees.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES)
}

#[inline]
fn clamp_zoom(scale: f32) -> f32 {
    scale.clamp(0.0, 1.0)
}
