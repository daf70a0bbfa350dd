use super::accumulator::{InputHandle, InputScale};
use super::change::ParameterSnapshot;
use super::core::CameraFrame;
use super::patch::CameraPatch;
use super::state::{
    clamp_phi, CameraState, ViewDelta, MAX_DISTANCE, MAX_FOV_Y, MIN_DISTANCE,
    MIN_FOV_Y, MIN_NEAR,
};
use super::view::{apply_view_change, clamp_zoom};
use crate::error::CameraError;
use crate::options::CameraOptions;
use crate::util::math::{
    least_parallel_axis, orbit_offset, try_invert,
};

/// Orbit camera controller.
///
/// Interaction entry points ([`pan`](Self::pan), [`zoom`](Self::zoom),
/// [`pivot`](Self::pivot), [`rotate`](Self::rotate)) only record deltas
/// and may be called any number of times per frame, also from other
/// threads through an [`InputHandle`]. [`update`](Self::update) runs once
/// per rendered frame and is the only place matrices are recomputed.
pub struct OrbitCamera {
    state: CameraState,
    frame: CameraFrame,
    previous: ParameterSnapshot,
    input: InputHandle,
    committed_aspect: f32,
    last_timestamp_ms: Option<f64>,
    tainted: bool,
    corrections: Vec<CameraError>,
}

impl OrbitCamera {
    /// Create a controller from configuration. Out-of-range options are
    /// clamped the same way as runtime edits.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let state = CameraState::from_options(options);
        let fallback = ParameterSnapshot::capture(&CameraState::default());
        let mut controller = Self {
            input: InputHandle::new(InputScale::from_state(&state)),
            committed_aspect: CameraOptions::default().aspect_ratio,
            state,
            frame: CameraFrame::IDENTITY,
            previous: fallback,
            last_timestamp_ms: None,
            tainted: true,
            corrections: Vec::new(),
        };
        controller.sanitize();
        controller.committed_aspect = controller.state.aspect_ratio;
        controller.rebuild();
        controller.previous = ParameterSnapshot::capture(&controller.state);
        controller.refresh_input_scale();
        controller.frame.dirty = true;
        controller
    }

    /// Pan in screen space; `dx` is a fraction of viewport width, `dy` of
    /// viewport height.
    pub fn pan(&self, dx: f32, dy: f32) {
        self.input.pan(dx, dy);
    }

    /// Zoom by `delta` (relative distance change) anchored at
    /// (`mouse_x`, `mouse_y`) in normalized device coordinates.
    pub fn zoom(&self, mouse_x: f32, mouse_y: f32, delta: f32) {
        self.input.zoom(mouse_x, mouse_y, delta);
    }

    /// Turn the view about the eye; arguments are fractions of the
    /// viewport, scaled by the field of view.
    pub fn pivot(&self, yaw: f32, pitch: f32) {
        self.input.pivot(yaw, pitch);
    }

    /// Orbit by raw azimuth/elevation deltas in radians.
    pub fn rotate(&self, d_theta: f32, d_phi: f32) {
        self.input.rotate(d_theta, d_phi);
    }

    /// A handle for recording interactions from another thread.
    #[must_use]
    pub fn input_handle(&self) -> InputHandle {
        self.input.clone()
    }

    /// Change the viewport aspect ratio. The projection is rebuilt
    /// immediately and the next frame reports dirty; the view is untouched.
    pub fn resize(&mut self, aspect_ratio: f32) {
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            self.record(CameraError::DegenerateProjection {
                fov_y: self.state.fov_y,
                aspect: aspect_ratio,
                near: self.state.near,
                far: self.state.far,
            });
            self.state.aspect_ratio = self.committed_aspect;
            return;
        }
        self.state.aspect_ratio = aspect_ratio;
        self.committed_aspect = aspect_ratio;
        match CameraFrame::build_projection(&self.state) {
            Ok(projection) => {
                self.frame.projection = projection;
                if let Some(inverse) = try_invert(&projection) {
                    self.frame.projection_inverse = inverse;
                }
            }
            Err(e) => self.record(e),
        }
        self.refresh_input_scale();
        self.taint();
        log::debug!("camera resized to aspect {aspect_ratio}");
    }

    /// Force the next update to report a dirty frame.
    pub fn taint(&mut self) {
        self.tainted = true;
        self.frame.dirty = true;
    }

    /// Advance the camera by one frame.
    ///
    /// `now_ms` is the frame timestamp in milliseconds; only differences
    /// between calls matter. `patch` carries optional explicit overrides
    /// (see [`CameraPatch`]).
    ///
    /// Order: drain input, merge the patch, replay direct parameter edits
    /// as motion, apply or settle this frame's motion, decay residual
    /// motion, snapshot.
    pub fn update(
        &mut self,
        now_ms: f64,
        patch: Option<&CameraPatch>,
    ) -> CameraFrame {
        self.corrections.clear();
        let mut changed = std::mem::take(&mut self.tainted);

        self.input.lock().drain_into(&mut self.state.delta);
        if let Some(patch) = patch {
            patch.apply(&mut self.state);
        }
        self.sanitize();

        if self.state.aspect_ratio != self.committed_aspect {
            self.resize(self.state.aspect_ratio);
            changed = true;
        }

        if self.previous.differs_from(&self.state) {
            log::debug!("camera parameters edited directly; replaying");
            let mut passive = self.previous.rewind(&mut self.state);
            self.apply(&mut passive);
            changed = true;
        }

        if self.state.delta.is_moving() {
            let mut delta = self.state.delta;
            self.apply(&mut delta);
            self.state.delta.zoom = delta.zoom;
            changed = true;
        } else {
            if self.state.delta.magnitude() > 0.0 {
                log::debug!("camera motion settled");
            }
            self.state.delta.halt();
        }

        if let Some(last) = self.last_timestamp_ms {
            let half_lives = self.state.decay_times();
            self.state.delta.decay(now_ms - last, half_lives);
        }
        self.last_timestamp_ms = Some(now_ms);

        self.previous = ParameterSnapshot::capture(&self.state);
        self.refresh_input_scale();
        self.tainted = false;
        self.frame.dirty = changed;
        self.frame
    }

    /// Current parameters.
    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Mutable parameters. Edits to the orbit parameters are picked up and
    /// replayed as motion by the next [`update`](Self::update).
    pub fn state_mut(&mut self) -> &mut CameraState {
        &mut self.state
    }

    /// Matrices from the most recent update or resize.
    #[must_use]
    pub fn frame(&self) -> CameraFrame {
        self.frame
    }

    /// Whether the matrices changed in the last update, or a resize/taint
    /// happened since.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.frame.dirty
    }

    /// Numeric corrections applied since the start of the last update.
    #[must_use]
    pub fn corrections(&self) -> &[CameraError] {
        &self.corrections
    }

    fn record(&mut self, error: CameraError) {
        log::warn!("camera correction: {error}");
        self.corrections.push(error);
    }

    fn refresh_input_scale(&self) {
        self.input.lock().set_scale(InputScale::from_state(&self.state));
    }

    /// Clamp or restore parameters that would produce degenerate matrices.
    fn sanitize(&mut self) {
        let prev = self.previous;
        let s = &mut self.state;
        let mut projection_fixed = false;
        let mut view_fixed = false;

        let distance_range = MIN_DISTANCE..=MAX_DISTANCE;
        let mut distance_fixed = None;
        if !distance_range.contains(&s.distance) {
            distance_fixed = Some(s.distance);
            s.distance = if distance_range.contains(&prev.distance) {
                prev.distance
            } else {
                CameraOptions::default().distance
            };
        }
        if !s.phi.is_finite() {
            s.phi = prev.phi;
        }
        s.phi = clamp_phi(s.phi);
        if !s.theta.is_finite() {
            s.theta = prev.theta;
        }
        if !s.center.is_finite() {
            s.center = prev.center;
            view_fixed = true;
        }
        if !s.rotation_center.is_finite() {
            s.rotation_center = s.center;
            view_fixed = true;
        }
        if !s.up.is_finite() || s.up.length_squared() == 0.0 {
            s.up = prev.up;
            view_fixed = true;
        }

        let requested = (s.fov_y, s.aspect_ratio, s.near, s.far);
        if s.fov_y.is_nan() {
            s.fov_y = prev.fov_y;
            projection_fixed = true;
        } else if !(MIN_FOV_Y..=MAX_FOV_Y).contains(&s.fov_y) {
            s.fov_y = s.fov_y.clamp(MIN_FOV_Y, MAX_FOV_Y);
            projection_fixed = true;
        }
        if !(s.near >= MIN_NEAR && s.near.is_finite()) {
            s.near = if prev.near >= MIN_NEAR { prev.near } else { MIN_NEAR };
            projection_fixed = true;
        }
        if !(s.far > s.near && s.far.is_finite()) {
            s.far = if prev.far > s.near { prev.far } else { s.near * 2.0 };
            projection_fixed = true;
        }
        if !(s.aspect_ratio > 0.0 && s.aspect_ratio.is_finite()) {
            s.aspect_ratio = self.committed_aspect;
            projection_fixed = true;
        }

        if projection_fixed {
            let (fov_y, aspect, near, far) = requested;
            self.record(CameraError::DegenerateProjection {
                fov_y,
                aspect,
                near,
                far,
            });
        }
        if view_fixed {
            self.record(CameraError::SingularViewMatrix);
        }
        if let Some(requested) = distance_fixed {
            self.record(if requested > MAX_DISTANCE {
                CameraError::ExcessiveDistance { requested }
            } else {
                CameraError::NonPositiveDistance { requested }
            });
        }
    }

    fn apply(&mut self, delta: &mut ViewDelta) {
        if let Some(error) = clamp_zoom(delta, self.state.distance) {
            self.record(error);
        }
        apply_view_change(&mut self.state, &self.frame, delta);
        self.rebuild();
    }

    /// Recompute the frame from the state. A singular view falls back to
    /// the previous up vector, then to the world axis least parallel to
    /// the viewing direction. If no frame can be built the tracked
    /// parameters revert to the previous snapshot, so the state never
    /// runs ahead of the matrices.
    fn rebuild(&mut self) {
        if self.rebuild_with_fallback_up() {
            return;
        }
        self.record(CameraError::SingularViewMatrix);
        self.previous.restore(&mut self.state);
        if !self.rebuild_with_fallback_up() {
            log::warn!("camera frame kept from the last valid state");
        }
    }

    fn rebuild_with_fallback_up(&mut self) -> bool {
        let requested_up = self.state.up;
        let axis = orbit_offset(1.0, self.state.phi, self.state.theta);
        let candidates =
            [requested_up, self.previous.up, least_parallel_axis(axis)];
        for up in candidates {
            self.state.up = up;
            match CameraFrame::build(&self.state) {
                Ok(frame) => {
                    if up != requested_up {
                        self.record(CameraError::SingularViewMatrix);
                    }
                    self.frame = frame;
                    return true;
                }
                Err(CameraError::SingularViewMatrix) => {}
                Err(error) => {
                    self.record(error);
                    break;
                }
            }
        }
        self.state.up = requested_up;
        false
    }
}
