use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial orbit parameters and inertia tuning.
///
/// Angles are radians, times are milliseconds.
pub struct CameraOptions {
    /// Distance from the eye to the look-at target.
    #[schemars(title = "Distance", range(min = 0.0001), extend("step" = 0.1))]
    pub distance: f32,
    /// Elevation above the horizontal plane.
    #[schemars(
        title = "Elevation",
        range(min = -1.5707, max = 1.5707),
        extend("step" = 0.01)
    )]
    pub phi: f32,
    /// Azimuth about the up axis.
    #[schemars(title = "Azimuth", extend("step" = 0.01))]
    pub theta: f32,
    /// Vertical field of view.
    #[schemars(
        title = "Field of View",
        range(min = 0.001, max = 3.14),
        extend("step" = 0.01)
    )]
    pub fov_y: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub near: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub far: f32,
    /// World up direction.
    #[schemars(skip)]
    pub up: [f32; 3],
    /// Look-at target.
    #[schemars(skip)]
    pub center: [f32; 3],
    /// Rotation pivot; the look-at target when absent.
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_center: Option<[f32; 3]>,
    /// Zoom keeps the point under the cursor fixed on screen.
    #[schemars(title = "Zoom About Cursor")]
    pub zoom_about_cursor: bool,
    /// Orbit about the look-at target instead of `rotation_center`.
    #[schemars(title = "Rotate About Center")]
    pub rotate_about_center: bool,
    /// Viewport width / height.
    #[schemars(skip)]
    pub aspect_ratio: f32,
    /// Pan inertia half-life.
    #[schemars(
        title = "Pan Inertia",
        range(min = 0.0, max = 1000.0),
        extend("step" = 10.0)
    )]
    pub pan_decay_time: f32,
    /// Zoom inertia half-life.
    #[schemars(
        title = "Zoom Inertia",
        range(min = 0.0, max = 1000.0),
        extend("step" = 10.0)
    )]
    pub zoom_decay_time: f32,
    /// Rotation inertia half-life.
    #[schemars(
        title = "Rotation Inertia",
        range(min = 0.0, max = 1000.0),
        extend("step" = 10.0)
    )]
    pub rotation_decay_time: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance: 10.0,
            phi: 0.0,
            theta: 0.0,
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 100.0,
            up: [0.0, 1.0, 0.0],
            center: [0.0; 3],
            rotation_center: None,
            zoom_about_cursor: true,
            rotate_about_center: false,
            aspect_ratio: 1.0,
            pan_decay_time: 100.0,
            zoom_decay_time: 100.0,
            rotation_decay_time: 100.0,
        }
    }
}
