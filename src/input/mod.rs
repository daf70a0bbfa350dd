//! Pointer gesture mapping onto camera interactions.

/// Gesture types and the gesture-to-interaction mapper.
pub mod gesture;

pub use gesture::{DragMode, Gesture, GestureMapper};
