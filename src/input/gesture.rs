//! Maps normalized pointer gestures onto camera interactions.
//!
//! Device parsing (modifier keys, button state, touch tracking) stays
//! with the host; it reports already-classified gestures in viewport
//! fractions, and the mapper applies sensitivities and enable flags.

use serde::{Deserialize, Serialize};

use crate::camera::accumulator::InputHandle;
use crate::options::InputOptions;

/// Orbit radians per full viewport height of drag.
pub const ROTATE_PER_VIEWPORT: f32 = 4.0;

/// Exponential wheel zoom rate per wheel unit.
pub const WHEEL_ZOOM_RATE: f32 = 0.002;

/// What a pointer drag does.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Orbit about the rotation center.
    #[default]
    Rotate,
    /// Slide the view in its own plane.
    Pan,
    /// Turn the view about the eye.
    Pivot,
}

/// One already-classified pointer gesture.
///
/// Drag offsets are fractions of the viewport (`dx` of width, `dy` of
/// height, y growing downwards); anchors are normalized device
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    /// Pointer drag.
    Drag {
        /// Horizontal offset.
        dx: f32,
        /// Vertical offset.
        dy: f32,
        /// Interpretation of the drag.
        mode: DragMode,
    },
    /// Scroll wheel; positive `delta` zooms out.
    Wheel {
        /// Anchor, horizontal NDC.
        x: f32,
        /// Anchor, vertical NDC.
        y: f32,
        /// Wheel travel in line-normalized pixels.
        delta: f32,
    },
    /// Two-finger pinch with simultaneous translation.
    Pinch {
        /// Anchor, horizontal NDC.
        x: f32,
        /// Anchor, vertical NDC.
        y: f32,
        /// Horizontal offset of the pinch midpoint.
        dx: f32,
        /// Vertical offset of the pinch midpoint.
        dy: f32,
        /// Finger spread ratio since the previous event.
        scale: f32,
    },
}

/// Feeds gestures into a camera's [`InputHandle`].
#[derive(Debug, Clone)]
pub struct GestureMapper {
    options: InputOptions,
    handle: InputHandle,
}

impl GestureMapper {
    /// Mapper writing into `handle` with the given sensitivities.
    #[must_use]
    pub fn new(options: InputOptions, handle: InputHandle) -> Self {
        Self { options, handle }
    }

    /// Current sensitivities and enable flags.
    #[must_use]
    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    /// Replace sensitivities and enable flags.
    pub fn set_options(&mut self, options: InputOptions) {
        self.options = options;
    }

    /// Record `gesture`. Returns `false` when its kind is disabled or the
    /// gesture carries unusable values, so the host can let the event
    /// propagate.
    #[must_use]
    pub fn apply(&self, gesture: &Gesture) -> bool {
        match *gesture {
            Gesture::Drag { dx, dy, mode } => self.drag(dx, dy, mode),
            Gesture::Wheel { x, y, delta } => {
                if !self.options.enable_zoom {
                    return false;
                }
                let rate = WHEEL_ZOOM_RATE * self.options.wheel_speed;
                self.handle.zoom(x, y, (delta * rate).exp() - 1.0);
                true
            }
            Gesture::Pinch {
                x,
                y,
                dx,
                dy,
                scale,
            } => {
                let zoom = self.options.enable_zoom
                    && scale > 0.0
                    && scale.is_finite();
                if zoom {
                    self.handle.zoom(x, y, 1.0 / scale - 1.0);
                }
                if self.options.enable_pan {
                    self.handle.pan(-dx, dy);
                }
                zoom || self.options.enable_pan
            }
        }
    }

    fn drag(&self, dx: f32, dy: f32, mode: DragMode) -> bool {
        match mode {
            DragMode::Rotate if self.options.enable_rotation => {
                let aspect = self.handle.lock().scale().aspect;
                let rate = ROTATE_PER_VIEWPORT * self.options.rotation_speed;
                self.handle.rotate(dx * aspect * rate, dy * rate);
                true
            }
            DragMode::Pan if self.options.enable_pan => {
                self.handle.pan(-dx, dy);
                true
            }
            DragMode::Pivot if self.options.enable_pivot => {
                self.handle.pivot(-dx, dy);
                true
            }
            _ => {
                log::trace!("ignoring disabled {mode:?} drag");
                false
            }
        }
    }
}
