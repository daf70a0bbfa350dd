//! Orbit camera.
//!
//! The camera orbits a look-at target at a given distance, elevation and
//! azimuth. Interactions are accumulated between frames and applied once
//! per [`OrbitCamera::update`], with exponentially decaying inertia.

/// Same-frame interaction accumulator and its thread-safe handle.
pub mod accumulator;
/// Detection of direct parameter edits between frames.
pub mod change;
/// Per-frame update driver.
pub mod controller;
/// Derived matrices and the GPU uniform layout.
pub mod core;
/// Explicit per-frame overrides.
pub mod patch;
/// Orbit parameters and per-frame motion.
pub mod state;
/// Motion-to-parameter geometry.
pub mod view;

pub use controller::OrbitCamera;
