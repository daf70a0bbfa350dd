//! Geometry that turns one frame of motion into new orbit parameters.
//!
//! Pan and zoom are expressed in view space of the *current* frame and
//! move `center`; the eye is always re-derived from `center`, `distance`
//! and the two angles afterwards.

use glam::{Mat4, Vec3};

use super::core::CameraFrame;
use super::state::{
    clamp_phi, CameraState, ViewDelta, MAX_DISTANCE, MIN_DISTANCE,
};
use crate::error::CameraError;
use crate::util::math::{
    normalize_or, rotate_about, scale_about, scale_and_add,
};

/// Limit `delta.zoom` so the resulting distance stays within
/// [`MIN_DISTANCE`]..=[`MAX_DISTANCE`]. A NaN zoom is dropped.
pub fn clamp_zoom(
    delta: &mut ViewDelta,
    distance: f32,
) -> Option<CameraError> {
    let requested = distance * (1.0 + delta.zoom);
    if requested.is_nan() {
        delta.zoom = 0.0;
        Some(CameraError::NonPositiveDistance { requested })
    } else if requested < MIN_DISTANCE {
        delta.zoom = MIN_DISTANCE / distance - 1.0;
        Some(CameraError::NonPositiveDistance { requested })
    } else if requested > MAX_DISTANCE {
        delta.zoom = MAX_DISTANCE / distance - 1.0;
        Some(CameraError::ExcessiveDistance { requested })
    } else {
        None
    }
}

/// View-space transform for this frame's pan and zoom.
///
/// With `zoom_about_cursor` the x/y scale is centered on the anchor, so
/// the point under the cursor keeps its screen position.
#[must_use]
pub fn view_space_delta(state: &CameraState, delta: &ViewDelta) -> Mat4 {
    let scale = Vec3::new(1.0 + delta.zoom, 1.0 + delta.zoom, 1.0);
    let mut d_view = if state.zoom_about_cursor {
        let h = state.half_height();
        let anchor = Vec3::new(
            delta.mouse_x * state.aspect_ratio * h,
            delta.mouse_y * h,
            0.0,
        );
        scale_about(anchor, scale)
    } else {
        Mat4::from_scale(scale)
    };
    d_view.w_axis.x += delta.pan_x;
    d_view.w_axis.y += delta.pan_y;
    d_view.w_axis.z += delta.pan_z;
    d_view
}

/// Apply `delta` to `state`, using `frame` as the current view.
///
/// `delta.zoom` must already be clamped with [`clamp_zoom`]. The caller
/// is responsible for rebuilding the frame afterwards.
pub fn apply_view_change(
    state: &mut CameraState,
    frame: &CameraFrame,
    delta: &ViewDelta,
) {
    let d_view = view_space_delta(state, delta);
    state.center = (frame.view_inverse * d_view * frame.view)
        .transform_point3(state.center);

    if state.rotate_about_center {
        state.rotation_center = state.center;
    }
    let pivot = state.rotation_center;

    state.center = rotate_about(state.center, pivot, Vec3::Y, -delta.d_theta);
    state.distance = (state.distance * (1.0 + delta.zoom))
        .clamp(MIN_DISTANCE, MAX_DISTANCE);
    state.theta += delta.d_theta;

    let previous_phi = state.phi;
    state.phi = clamp_phi(state.phi + delta.d_phi);
    let d_phi = state.phi - previous_phi;

    // Elevation turns about the view-right axis: rotate into the theta = 0
    // frame, tilt about world X, rotate back.
    state.center = rotate_about(state.center, pivot, Vec3::Y, state.theta);
    state.center = rotate_about(state.center, pivot, Vec3::X, -d_phi);
    state.center = rotate_about(state.center, pivot, Vec3::Y, -state.theta);

    if delta.yaw != 0.0 || delta.pitch != 0.0 {
        apply_pivot(state, frame, delta.yaw, delta.pitch);
    }
}

/// Small-angle rotation of the view about the eye, performed by moving
/// the look-at target along the current view basis.
fn apply_pivot(
    state: &mut CameraState,
    frame: &CameraFrame,
    yaw: f32,
    pitch: f32,
) {
    let right = normalize_or(frame.right(), Vec3::X);
    let up = normalize_or(frame.up(), Vec3::Y);
    let back = normalize_or(frame.back(), Vec3::Z);
    let half_yaw = yaw * 0.5;
    let previous_phi = state.phi;
    state.phi = clamp_phi(state.phi - pitch * 0.5);
    let half_pitch = previous_phi - state.phi;
    let d = state.distance;

    let mut center = state.center;
    center = scale_and_add(center, right, half_yaw.sin() * d);
    center = scale_and_add(center, up, half_pitch.sin() * d);
    center = scale_and_add(
        center,
        back,
        (2.0 - half_yaw.cos() - half_pitch.cos()) * d,
    );
    state.center = center;
    state.theta += half_yaw;
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_8;

    use super::*;
    use crate::camera::state::{MAX_PHI, MIN_PHI};
    use crate::util::math::approx_eq_vec3;

    fn frame_for(state: &CameraState) -> CameraFrame {
        CameraFrame::build(state).unwrap()
    }

    #[test]
    fn pan_moves_center_along_view_right() {
        let mut state = CameraState::default();
        let frame = frame_for(&state);
        let delta = ViewDelta {
            pan_x: 2.0,
            ..ViewDelta::default()
        };
        apply_view_change(&mut state, &frame, &delta);
        assert!(approx_eq_vec3(state.center, Vec3::new(2.0, 0.0, 0.0), 1e-5));
        assert_eq!(state.distance, 10.0);
    }

    #[test]
    fn zoom_about_view_center_keeps_center() {
        let mut state = CameraState::default();
        let frame = frame_for(&state);
        let delta = ViewDelta {
            zoom: 0.5,
            ..ViewDelta::default()
        };
        apply_view_change(&mut state, &frame, &delta);
        assert!(approx_eq_vec3(state.center, Vec3::ZERO, 1e-5));
        assert!((state.distance - 15.0).abs() < 1e-5);
    }

    #[test]
    fn zoom_about_cursor_shifts_center_towards_anchor() {
        let mut state = CameraState::default();
        let frame = frame_for(&state);
        let delta = ViewDelta {
            zoom: -0.5,
            mouse_x: 1.0,
            ..ViewDelta::default()
        };
        apply_view_change(&mut state, &frame, &delta);
        // anchor.x = 1 * aspect * 10 * tan(pi/8); center moves half way.
        let expected = 0.5 * 10.0 * FRAC_PI_8.tan();
        assert!((state.center.x - expected).abs() < 1e-4);
        assert!((state.distance - 5.0).abs() < 1e-5);
    }

    #[test]
    fn zoom_without_cursor_ignores_anchor() {
        let mut state = CameraState {
            zoom_about_cursor: false,
            ..CameraState::default()
        };
        let frame = frame_for(&state);
        let delta = ViewDelta {
            zoom: -0.5,
            mouse_x: 1.0,
            mouse_y: 1.0,
            ..ViewDelta::default()
        };
        apply_view_change(&mut state, &frame, &delta);
        assert!(approx_eq_vec3(state.center, Vec3::ZERO, 1e-5));
    }

    #[test]
    fn phi_is_clamped_and_center_rotates_rigidly() {
        let mut state = CameraState {
            rotation_center: Vec3::new(0.0, 0.0, -4.0),
            ..CameraState::default()
        };
        let frame = frame_for(&state);
        let delta = ViewDelta {
            d_phi: 10.0,
            ..ViewDelta::default()
        };
        apply_view_change(&mut state, &frame, &delta);
        assert_eq!(state.phi, MAX_PHI);
        // The center keeps its distance from the pivot.
        let radius = (state.center - state.rotation_center).length();
        assert!((radius - 4.0).abs() < 1e-4);
    }

    #[test]
    fn orbit_about_center_leaves_center_fixed() {
        let mut state = CameraState {
            rotate_about_center: true,
            center: Vec3::new(1.0, 2.0, 3.0),
            rotation_center: Vec3::ZERO,
            ..CameraState::default()
        };
        let frame = frame_for(&state);
        let delta = ViewDelta {
            d_theta: 0.7,
            d_phi: -0.3,
            ..ViewDelta::default()
        };
        apply_view_change(&mut state, &frame, &delta);
        assert!(approx_eq_vec3(state.center, Vec3::new(1.0, 2.0, 3.0), 1e-5));
        assert_eq!(state.rotation_center, state.center);
        assert!((state.theta - 0.7).abs() < 1e-6);
        assert!((state.phi + 0.3).abs() < 1e-6);
    }

    #[test]
    fn pivot_keeps_eye_in_place_for_small_yaw() {
        let mut state = CameraState::default();
        let frame = frame_for(&state);
        let delta = ViewDelta {
            yaw: 0.02,
            ..ViewDelta::default()
        };
        apply_view_change(&mut state, &frame, &delta);
        let moved = frame_for(&state);
        assert!((moved.eye - frame.eye).length() < 1e-3);
        assert!((state.theta - 0.01).abs() < 1e-6);
    }

    #[test]
    fn pivot_pitch_at_pole_moves_center_by_clamped_amount() {
        let mut state = CameraState {
            phi: MIN_PHI + 0.001,
            ..CameraState::default()
        };
        let frame = frame_for(&state);
        let delta = ViewDelta {
            pitch: 0.5,
            ..ViewDelta::default()
        };
        apply_view_change(&mut state, &frame, &delta);
        assert_eq!(state.phi, MIN_PHI);
        let moved = frame_for(&state);
        assert!((moved.eye - frame.eye).length() < 1e-3);
    }

    #[test]
    fn clamp_zoom_caps_and_drops_nan() {
        let mut huge = ViewDelta {
            zoom: f32::MAX,
            ..ViewDelta::default()
        };
        let err = clamp_zoom(&mut huge, 10.0);
        assert!(matches!(err, Some(CameraError::ExcessiveDistance { .. })));
        assert!((10.0 * (1.0 + huge.zoom)) <= MAX_DISTANCE * 1.0001);

        let mut nan = ViewDelta {
            zoom: f32::NAN,
            ..ViewDelta::default()
        };
        assert!(clamp_zoom(&mut nan, 10.0).is_some());
        assert_eq!(nan.zoom, 0.0);
    }

    #[test]
    fn clamp_zoom_floors_distance() {
        let mut delta = ViewDelta {
            zoom: -1.5,
            ..ViewDelta::default()
        };
        let err = clamp_zoom(&mut delta, 10.0);
        assert!(matches!(err, Some(CameraError::NonPositiveDistance { .. })));
        assert!(delta.zoom > -1.0);
        let mut ok = ViewDelta {
            zoom: -0.5,
            ..ViewDelta::default()
        };
        assert!(clamp_zoom(&mut ok, 10.0).is_none());
        assert_eq!(ok.zoom, -0.5);
    }
}
