//! Shared utilities: the matrix/vector kernel and frame timing.

/// Millisecond frame clock for hosts without their own timestamps.
pub mod frame_timing;
pub mod math;
