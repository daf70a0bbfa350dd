//! Explicit per-frame overrides.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::CameraState;

/// Partial camera update passed alongside a frame's timestamp.
///
/// Motion fields (`zoom`, `pan_*`, `d_theta`, `d_phi`, `yaw`, `pitch`) are
/// added onto whatever user input produced this frame, so a programmatic
/// nudge composes with a concurrent drag instead of clobbering it. All
/// other fields replace the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPatch {
    /// Replacement orbit distance.
    pub distance: Option<f32>,
    /// Replacement elevation.
    pub phi: Option<f32>,
    /// Replacement azimuth.
    pub theta: Option<f32>,
    /// Replacement vertical field of view (radians).
    pub fov_y: Option<f32>,
    /// Replacement near plane.
    pub near: Option<f32>,
    /// Replacement far plane.
    pub far: Option<f32>,
    /// Replacement up vector.
    pub up: Option<[f32; 3]>,
    /// Replacement look-at target.
    pub center: Option<[f32; 3]>,
    /// Replacement rotation pivot.
    pub rotation_center: Option<[f32; 3]>,
    /// Replacement zoom-about-cursor flag.
    pub zoom_about_cursor: Option<bool>,
    /// Replacement rotate-about-center flag.
    pub rotate_about_center: Option<bool>,
    /// Replacement pan half-life.
    pub pan_decay_time: Option<f32>,
    /// Replacement zoom half-life.
    pub zoom_decay_time: Option<f32>,
    /// Replacement rotation half-life.
    pub rotation_decay_time: Option<f32>,
    /// Replacement zoom anchor, horizontal NDC.
    pub mouse_x: Option<f32>,
    /// Replacement zoom anchor, vertical NDC.
    pub mouse_y: Option<f32>,
    /// Additional zoom.
    pub zoom: Option<f32>,
    /// Additional horizontal pan.
    pub pan_x: Option<f32>,
    /// Additional vertical pan.
    pub pan_y: Option<f32>,
    /// Additional depth pan.
    pub pan_z: Option<f32>,
    /// Additional azimuth motion.
    pub d_theta: Option<f32>,
    /// Additional elevation motion.
    pub d_phi: Option<f32>,
    /// Additional pivot yaw.
    pub yaw: Option<f32>,
    /// Additional pivot pitch.
    pub pitch: Option<f32>,
}

fn overwrite<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn add_back(target: &mut f32, value: Option<f32>) {
    if let Some(v) = value {
        *target += v;
    }
}

impl CameraPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `state`.
    pub fn apply(&self, state: &mut CameraState) {
        overwrite(&mut state.distance, self.distance);
        overwrite(&mut state.phi, self.phi);
        overwrite(&mut state.theta, self.theta);
        overwrite(&mut state.fov_y, self.fov_y);
        overwrite(&mut state.near, self.near);
        overwrite(&mut state.far, self.far);
        overwrite(&mut state.up, self.up.map(Vec3::from_array));
        overwrite(&mut state.center, self.center.map(Vec3::from_array));
        overwrite(
            &mut state.rotation_center,
            self.rotation_center.map(Vec3::from_array),
        );
        overwrite(&mut state.zoom_about_cursor, self.zoom_about_cursor);
        overwrite(&mut state.rotate_about_center, self.rotate_about_center);
        overwrite(&mut state.pan_decay_time, self.pan_decay_time);
        overwrite(&mut state.zoom_decay_time, self.zoom_decay_time);
        overwrite(&mut state.rotation_decay_time, self.rotation_decay_time);

        let delta = &mut state.delta;
        overwrite(&mut delta.mouse_x, self.mouse_x);
        overwrite(&mut delta.mouse_y, self.mouse_y);
        add_back(&mut delta.zoom, self.zoom);
        add_back(&mut delta.pan_x, self.pan_x);
        add_back(&mut delta.pan_y, self.pan_y);
        add_back(&mut delta.pan_z, self.pan_z);
        add_back(&mut delta.d_theta, self.d_theta);
        add_back(&mut delta.d_phi, self.d_phi);
        add_back(&mut delta.yaw, self.yaw);
        add_back(&mut delta.pitch, self.pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_fields_compose_with_existing_motion() {
        let mut state = CameraState::default();
        state.delta.d_theta = 0.2;
        state.delta.pan_x = -1.0;
        let patch = CameraPatch {
            d_theta: Some(0.05),
            pan_y: Some(0.5),
            ..CameraPatch::default()
        };
        patch.apply(&mut state);
        assert!((state.delta.d_theta - 0.25).abs() < 1e-6);
        assert_eq!(state.delta.pan_x, -1.0);
        assert_eq!(state.delta.pan_y, 0.5);
    }

    #[test]
    fn parameters_are_overwritten() {
        let mut state = CameraState::default();
        let patch = CameraPatch {
            distance: Some(3.0),
            center: Some([1.0, 0.0, -1.0]),
            zoom_about_cursor: Some(false),
            ..CameraPatch::default()
        };
        patch.apply(&mut state);
        assert_eq!(state.distance, 3.0);
        assert_eq!(state.center, Vec3::new(1.0, 0.0, -1.0));
        assert!(!state.zoom_about_cursor);
        assert_eq!(state.fov_y, std::f32::consts::FRAC_PI_4);
    }

    #[test]
    fn deserializes_partial_json() {
        let patch: CameraPatch =
            serde_json::from_str(r#"{ "zoom": 0.5, "theta": 1.0 }"#).unwrap();
        assert_eq!(patch.zoom, Some(0.5));
        assert_eq!(patch.theta, Some(1.0));
        assert!(patch.distance.is_none());
        assert!(!patch.is_empty());
        assert!(CameraPatch::default().is_empty());
    }
}
