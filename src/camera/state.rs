//! Camera parameters and transient per-frame motion.

use std::f32::consts::{FRAC_PI_2, PI};
use std::f64::consts::LN_2;

use glam::Vec3;

use crate::options::CameraOptions;

/// Margin kept between `phi` and the poles so the look-at basis never
/// degenerates.
pub const PHI_MARGIN: f32 = 1e-4;
/// Lowest allowed elevation.
pub const MIN_PHI: f32 = -FRAC_PI_2 + PHI_MARGIN;
/// Highest allowed elevation.
pub const MAX_PHI: f32 = FRAC_PI_2 - PHI_MARGIN;
/// Floor for the orbit distance.
pub const MIN_DISTANCE: f32 = 1e-4;
/// Ceiling for the orbit distance.
pub const MAX_DISTANCE: f32 = 1e9;
/// Smallest accepted vertical field of view (radians).
pub const MIN_FOV_Y: f32 = 1e-3;
/// Largest accepted vertical field of view (radians).
pub const MAX_FOV_Y: f32 = PI - 1e-3;
/// Floor for the near clipping plane.
pub const MIN_NEAR: f32 = 1e-6;
/// Deltas at or below this magnitude are treated as settled.
pub const MOTION_THRESHOLD: f32 = 1e-4;

/// Clamp an elevation angle into `[MIN_PHI, MAX_PHI]`.
#[inline]
#[must_use]
pub fn clamp_phi(phi: f32) -> f32 {
    phi.clamp(MIN_PHI, MAX_PHI)
}

/// Transient motion for one frame.
///
/// Pan values are view-space offsets, zoom is a relative distance change
/// (`distance *= 1 + zoom`), angles are radians. `mouse_x`/`mouse_y` anchor
/// zoom in normalized device coordinates and are never decayed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewDelta {
    /// Relative distance change.
    pub zoom: f32,
    /// View-space horizontal pan.
    pub pan_x: f32,
    /// View-space vertical pan.
    pub pan_y: f32,
    /// View-space depth pan.
    pub pan_z: f32,
    /// Azimuth change.
    pub d_theta: f32,
    /// Elevation change.
    pub d_phi: f32,
    /// Pivot yaw.
    pub yaw: f32,
    /// Pivot pitch.
    pub pitch: f32,
    /// Zoom anchor, horizontal NDC.
    pub mouse_x: f32,
    /// Zoom anchor, vertical NDC.
    pub mouse_y: f32,
}

impl ViewDelta {
    /// Largest absolute motion component.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        [
            self.zoom,
            self.pan_x,
            self.pan_y,
            self.pan_z,
            self.d_theta,
            self.d_phi,
            self.yaw,
            self.pitch,
        ]
        .into_iter()
        .fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Whether any motion component exceeds [`MOTION_THRESHOLD`].
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.magnitude() > MOTION_THRESHOLD
    }

    /// Zero every motion component, keeping the anchor.
    pub fn halt(&mut self) {
        *self = Self {
            mouse_x: self.mouse_x,
            mouse_y: self.mouse_y,
            ..Self::default()
        };
    }

    /// Exponentially decay residual motion over `dt_ms` milliseconds.
    pub fn decay(&mut self, dt_ms: f64, half_lives: DecayTimes) {
        let pan = decay_factor(dt_ms, half_lives.pan);
        let zoom = decay_factor(dt_ms, half_lives.zoom);
        let rotation = decay_factor(dt_ms, half_lives.rotation);
        self.zoom *= zoom;
        self.pan_x *= pan;
        self.pan_y *= pan;
        self.pan_z *= pan;
        self.d_theta *= rotation;
        self.d_phi *= rotation;
        self.yaw *= rotation;
        self.pitch *= rotation;
    }
}

/// Per-channel inertia half-lives in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayTimes {
    /// Half-life for pan motion.
    pub pan: f32,
    /// Half-life for zoom motion.
    pub zoom: f32,
    /// Half-life for rotation and pivot motion.
    pub rotation: f32,
}

/// Multiplier that halves a value every `half_life` milliseconds.
/// A non-positive half-life means no inertia.
#[must_use]
pub fn decay_factor(dt_ms: f64, half_life: f32) -> f32 {
    if half_life > 0.0 {
        (-dt_ms.max(0.0) * LN_2 / f64::from(half_life)).exp() as f32
    } else {
        0.0
    }
}

/// Full mutable camera parameter set.
///
/// Every field may be written between frames; the controller detects
/// edits to the orbit parameters and replays them as incremental motion on
/// the next update.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Distance from eye to `center`.
    pub distance: f32,
    /// Elevation in radians.
    pub phi: f32,
    /// Azimuth in radians.
    pub theta: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// World up direction.
    pub up: Vec3,
    /// Look-at target.
    pub center: Vec3,
    /// Pivot for rotations.
    pub rotation_center: Vec3,
    /// Zoom keeps the point under the anchor fixed.
    pub zoom_about_cursor: bool,
    /// Keep `rotation_center` locked to `center`.
    pub rotate_about_center: bool,
    /// Viewport width / height.
    pub aspect_ratio: f32,
    /// Pan inertia half-life (ms).
    pub pan_decay_time: f32,
    /// Zoom inertia half-life (ms).
    pub zoom_decay_time: f32,
    /// Rotation inertia half-life (ms).
    pub rotation_decay_time: f32,
    /// Motion being applied this frame.
    pub delta: ViewDelta,
}

impl CameraState {
    /// Build the initial state from configuration.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let center = Vec3::from_array(options.center);
        Self {
            distance: options.distance,
            phi: clamp_phi(options.phi),
            theta: options.theta,
            fov_y: options.fov_y,
            near: options.near,
            far: options.far,
            up: Vec3::from_array(options.up),
            center,
            rotation_center: options
                .rotation_center
                .map_or(center, Vec3::from_array),
            zoom_about_cursor: options.zoom_about_cursor,
            rotate_about_center: options.rotate_about_center,
            aspect_ratio: options.aspect_ratio,
            pan_decay_time: options.pan_decay_time,
            zoom_decay_time: options.zoom_decay_time,
            rotation_decay_time: options.rotation_decay_time,
            delta: ViewDelta::default(),
        }
    }

    /// Inertia half-lives.
    #[must_use]
    pub fn decay_times(&self) -> DecayTimes {
        DecayTimes {
            pan: self.pan_decay_time,
            zoom: self.zoom_decay_time,
            rotation: self.rotation_decay_time,
        }
    }

    /// Half the visible height of the view plane through `center`.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        self.distance * (self.fov_y * 0.5).tan()
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_halves_after_one_half_life() {
        assert!((decay_factor(100.0, 100.0) - 0.5).abs() < 1e-7);
        assert!((decay_factor(200.0, 100.0) - 0.25).abs() < 1e-7);
    }

    #[test]
    fn zero_half_life_snaps() {
        assert_eq!(decay_factor(1.0, 0.0), 0.0);
        assert_eq!(decay_factor(0.0, 0.0), 0.0);
    }

    #[test]
    fn negative_elapsed_time_does_not_grow() {
        assert_eq!(decay_factor(-50.0, 100.0), 1.0);
    }

    #[test]
    fn halt_keeps_anchor() {
        let mut delta = ViewDelta {
            zoom: 0.3,
            pan_x: 1.0,
            yaw: -0.2,
            mouse_x: 0.5,
            mouse_y: -0.25,
            ..ViewDelta::default()
        };
        delta.halt();
        assert!(!delta.is_moving());
        assert_eq!((delta.mouse_x, delta.mouse_y), (0.5, -0.25));
    }

    #[test]
    fn decay_uses_independent_channels() {
        let mut delta = ViewDelta {
            zoom: 1.0,
            pan_x: 1.0,
            d_theta: 1.0,
            ..ViewDelta::default()
        };
        delta.decay(
            100.0,
            DecayTimes {
                pan: 100.0,
                zoom: 0.0,
                rotation: 200.0,
            },
        );
        assert!((delta.pan_x - 0.5).abs() < 1e-6);
        assert_eq!(delta.zoom, 0.0);
        assert!((delta.d_theta - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn magnitude_ignores_anchor() {
        let delta = ViewDelta {
            mouse_x: 0.9,
            pitch: -0.01,
            ..ViewDelta::default()
        };
        assert_eq!(delta.magnitude(), 0.01);
    }

    #[test]
    fn rotation_center_defaults_to_center() {
        let options = CameraOptions {
            center: [1.0, 2.0, 3.0],
            ..CameraOptions::default()
        };
        let state = CameraState::from_options(&options);
        assert_eq!(state.rotation_center, Vec3::new(1.0, 2.0, 3.0));
    }
}
