use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Gesture enable flags and sensitivities.
pub struct InputOptions {
    /// Accept wheel and pinch zoom.
    #[schemars(title = "Zoom")]
    pub enable_zoom: bool,
    /// Accept pan drags and pinch pan.
    #[schemars(title = "Pan")]
    pub enable_pan: bool,
    /// Accept pivot drags.
    #[schemars(title = "Pivot")]
    pub enable_pivot: bool,
    /// Accept orbit drags.
    #[schemars(title = "Rotation")]
    pub enable_rotation: bool,
    /// Wheel zoom sensitivity multiplier.
    #[schemars(
        title = "Wheel Speed",
        range(min = 0.1, max = 5.0),
        extend("step" = 0.1)
    )]
    pub wheel_speed: f32,
    /// Orbit drag sensitivity multiplier.
    #[schemars(
        title = "Rotation Speed",
        range(min = 0.1, max = 5.0),
        extend("step" = 0.1)
    )]
    pub rotation_speed: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            enable_zoom: true,
            enable_pan: true,
            enable_pivot: true,
            enable_rotation: true,
            wheel_speed: 1.0,
            rotation_speed: 1.0,
        }
    }
}
