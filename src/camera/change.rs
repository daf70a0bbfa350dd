//! Detection of direct parameter edits between frames.
//!
//! A host may assign `state.distance = 5.0` from a slider instead of going
//! through the interaction entry points. The snapshot taken at the end of
//! each update lets the next update notice such edits and replay them as
//! the equivalent incremental motion.

use glam::Vec3;

use super::state::{CameraState, ViewDelta};
use crate::util::math::{approx_eq_vec3, VEC3_EPSILON};

/// Orbit parameters as committed by the previous update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    /// Up vector.
    pub up: Vec3,
    /// Look-at target.
    pub center: Vec3,
    /// Near plane.
    pub near: f32,
    /// Far plane.
    pub far: f32,
    /// Orbit distance.
    pub distance: f32,
    /// Elevation.
    pub phi: f32,
    /// Azimuth.
    pub theta: f32,
    /// Vertical field of view.
    pub fov_y: f32,
}

impl ParameterSnapshot {
    /// Copy the tracked fields of `state`.
    #[must_use]
    pub fn capture(state: &CameraState) -> Self {
        Self {
            up: state.up,
            center: state.center,
            near: state.near,
            far: state.far,
            distance: state.distance,
            phi: state.phi,
            theta: state.theta,
            fov_y: state.fov_y,
        }
    }

    /// Whether any tracked field of `state` differs from the snapshot.
    /// Vectors compare within [`VEC3_EPSILON`], scalars exactly.
    #[must_use]
    pub fn differs_from(&self, state: &CameraState) -> bool {
        !approx_eq_vec3(self.up, state.up, VEC3_EPSILON)
            || !approx_eq_vec3(self.center, state.center, VEC3_EPSILON)
            || self.near != state.near
            || self.far != state.far
            || self.phi != state.phi
            || self.theta != state.theta
            || self.distance != state.distance
            || self.fov_y != state.fov_y
    }

    /// Convert edits of `phi`, `theta` and `distance` into motion.
    ///
    /// Restores those three fields to their snapshot values and returns the
    /// delta that reproduces the edit when applied. Pan, pivot and the zoom
    /// anchor are zero, so a distance edit zooms about the view center.
    pub fn rewind(&self, state: &mut CameraState) -> ViewDelta {
        let delta = ViewDelta {
            d_phi: state.phi - self.phi,
            d_theta: state.theta - self.theta,
            zoom: state.distance / self.distance - 1.0,
            ..ViewDelta::default()
        };
        state.phi = self.phi;
        state.theta = self.theta;
        state.distance = self.distance;
        delta
    }

    /// Put every tracked field of `state` back to the snapshot.
    pub fn restore(&self, state: &mut CameraState) {
        state.up = self.up;
        state.center = self.center;
        state.near = self.near;
        state.far = self.far;
        state.distance = self.distance;
        state.phi = self.phi;
        state.theta = self.theta;
        state.fov_y = self.fov_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_undoes_every_tracked_edit() {
        let mut state = CameraState::default();
        let snapshot = ParameterSnapshot::capture(&state);
        state.center = Vec3::splat(4.0);
        state.distance = 0.5;
        state.fov_y = 1.2;
        snapshot.restore(&mut state);
        assert!(!snapshot.differs_from(&state));
    }

    #[test]
    fn untouched_state_is_unchanged() {
        let state = CameraState::default();
        let snapshot = ParameterSnapshot::capture(&state);
        assert!(!snapshot.differs_from(&state));
    }

    #[test]
    fn vector_noise_below_epsilon_is_ignored() {
        let mut state = CameraState::default();
        let snapshot = ParameterSnapshot::capture(&state);
        state.center += Vec3::splat(1e-7);
        assert!(!snapshot.differs_from(&state));
        state.center += Vec3::X * 1e-3;
        assert!(snapshot.differs_from(&state));
    }

    #[test]
    fn scalar_edits_are_detected_exactly() {
        let mut state = CameraState::default();
        let snapshot = ParameterSnapshot::capture(&state);
        state.fov_y += 1e-6;
        assert!(snapshot.differs_from(&state));
    }

    #[test]
    fn rewind_produces_equivalent_delta() {
        let mut state = CameraState::default();
        let snapshot = ParameterSnapshot::capture(&state);
        state.distance = 20.0;
        state.phi = 0.25;
        state.theta = -0.5;
        state.delta.pan_x = 3.0;

        let delta = snapshot.rewind(&mut state);

        assert_eq!(delta.zoom, 1.0);
        assert_eq!(delta.d_phi, 0.25);
        assert_eq!(delta.d_theta, -0.5);
        assert_eq!(delta.pan_x, 0.0);
        assert_eq!(state.distance, 10.0);
        assert_eq!(state.phi, 0.0);
        assert_eq!(state.theta, 0.0);
        assert_eq!(state.delta.pan_x, 3.0);
    }
}
