//! Same-frame accumulation of interaction deltas.
//!
//! Input events can arrive at any rate, from any thread. Each entry point
//! only adds into a small fixed table behind a mutex; the controller drains
//! the table exactly once per update. Scale factors that depend on camera
//! state (distance, field of view, aspect) are cached next to the table and
//! refreshed by the controller, so producers never touch the state itself.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;

use super::state::{CameraState, ViewDelta};

/// Kind of motion an interaction contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    /// Relative distance change.
    Zoom,
    /// View-space horizontal pan.
    PanX,
    /// View-space vertical pan.
    PanY,
    /// View-space depth pan.
    PanZ,
    /// Azimuth change.
    Theta,
    /// Elevation change.
    Phi,
    /// Pivot yaw.
    Yaw,
    /// Pivot pitch.
    Pitch,
}

impl DeltaKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 8] = [
        Self::Zoom,
        Self::PanX,
        Self::PanY,
        Self::PanZ,
        Self::Theta,
        Self::Phi,
        Self::Yaw,
        Self::Pitch,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Zoom => 0,
            Self::PanX => 1,
            Self::PanY => 2,
            Self::PanZ => 3,
            Self::Theta => 4,
            Self::Phi => 5,
            Self::Yaw => 6,
            Self::Pitch => 7,
        }
    }

    /// Mutable access to the matching field of a [`ViewDelta`].
    pub fn field_mut(self, delta: &mut ViewDelta) -> &mut f32 {
        match self {
            Self::Zoom => &mut delta.zoom,
            Self::PanX => &mut delta.pan_x,
            Self::PanY => &mut delta.pan_y,
            Self::PanZ => &mut delta.pan_z,
            Self::Theta => &mut delta.d_theta,
            Self::Phi => &mut delta.d_phi,
            Self::Yaw => &mut delta.yaw,
            Self::Pitch => &mut delta.pitch,
        }
    }
}

/// State-derived multipliers applied when an interaction is recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputScale {
    /// Full visible height at the orbit center: `2 · distance · tan(fov/2)`.
    pub pan: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
}

impl InputScale {
    /// Scale factors for the given committed state.
    #[must_use]
    pub fn from_state(state: &CameraState) -> Self {
        Self {
            pan: 2.0 * state.half_height(),
            fov_y: state.fov_y,
            aspect: state.aspect_ratio,
        }
    }
}

/// Additive per-kind sums for the current frame plus the zoom anchor.
#[derive(Debug, Clone)]
pub struct InteractionAccumulator {
    sums: [f32; DeltaKind::ALL.len()],
    anchor: Option<Vec2>,
    scale: InputScale,
}

impl InteractionAccumulator {
    /// Empty accumulator using `scale` for subsequent interactions.
    #[must_use]
    pub fn new(scale: InputScale) -> Self {
        Self {
            sums: [0.0; DeltaKind::ALL.len()],
            anchor: None,
            scale,
        }
    }

    /// Add `value` to the running sum for `kind`.
    pub fn add(&mut self, kind: DeltaKind, value: f32) {
        self.sums[kind.index()] += value;
    }

    /// Current sum for `kind`.
    #[must_use]
    pub fn get(&self, kind: DeltaKind) -> f32 {
        self.sums[kind.index()]
    }

    /// Zoom anchor recorded this frame, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Cached scale factors.
    #[must_use]
    pub fn scale(&self) -> InputScale {
        self.scale
    }

    /// Replace the cached scale factors.
    pub fn set_scale(&mut self, scale: InputScale) {
        self.scale = scale;
    }

    /// Screen-space pan; `dx` is a fraction of viewport width, `dy` of
    /// viewport height.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.add(DeltaKind::PanX, dx * self.scale.pan * self.scale.aspect);
        self.add(DeltaKind::PanY, dy * self.scale.pan);
    }

    /// Zoom by `delta` anchored at (`mouse_x`, `mouse_y`) in NDC. The
    /// anchor of the latest call wins.
    pub fn zoom(&mut self, mouse_x: f32, mouse_y: f32, delta: f32) {
        self.add(DeltaKind::Zoom, delta);
        self.anchor = Some(Vec2::new(mouse_x, mouse_y));
    }

    /// Pivot the view about the eye.
    pub fn pivot(&mut self, yaw: f32, pitch: f32) {
        self.add(DeltaKind::Yaw, yaw * self.scale.fov_y * self.scale.aspect);
        self.add(DeltaKind::Pitch, pitch * self.scale.fov_y);
    }

    /// Orbit by raw angle deltas (radians).
    pub fn rotate(&mut self, d_theta: f32, d_phi: f32) {
        self.add(DeltaKind::Theta, d_theta);
        self.add(DeltaKind::Phi, d_phi);
    }

    /// Move this frame's sums into `delta` and reset.
    ///
    /// Kinds with a nonzero sum overwrite the matching field; kinds with no
    /// input leave residual (decaying) motion alone.
    pub fn drain_into(&mut self, delta: &mut ViewDelta) {
        for kind in DeltaKind::ALL {
            let sum = std::mem::take(&mut self.sums[kind.index()]);
            if sum != 0.0 {
                *kind.field_mut(delta) = sum;
            }
        }
        if let Some(anchor) = self.anchor.take() {
            delta.mouse_x = anchor.x;
            delta.mouse_y = anchor.y;
        }
    }

    /// Whether nothing has been recorded since the last drain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor.is_none() && self.sums.iter().all(|v| *v == 0.0)
    }
}

/// Cloneable, thread-safe producer side of the accumulator.
///
/// Hand a clone to an input thread; interactions recorded before an
/// `update` call are visible to it, later ones wait for the next frame.
#[derive(Debug, Clone)]
pub struct InputHandle {
    shared: Arc<Mutex<InteractionAccumulator>>,
}

impl InputHandle {
    /// Wrap a fresh accumulator.
    #[must_use]
    pub fn new(scale: InputScale) -> Self {
        Self {
            shared: Arc::new(Mutex::new(InteractionAccumulator::new(scale))),
        }
    }

    /// Lock the accumulator, recovering from a poisoned lock.
    pub fn lock(&self) -> MutexGuard<'_, InteractionAccumulator> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`InteractionAccumulator::pan`].
    pub fn pan(&self, dx: f32, dy: f32) {
        self.lock().pan(dx, dy);
    }

    /// See [`InteractionAccumulator::zoom`].
    pub fn zoom(&self, mouse_x: f32, mouse_y: f32, delta: f32) {
        self.lock().zoom(mouse_x, mouse_y, delta);
    }

    /// See [`InteractionAccumulator::pivot`].
    pub fn pivot(&self, yaw: f32, pitch: f32) {
        self.lock().pivot(yaw, pitch);
    }

    /// See [`InteractionAccumulator::rotate`].
    pub fn rotate(&self, d_theta: f32, d_phi: f32) {
        self.lock().rotate(d_theta, d_phi);
    }
}
