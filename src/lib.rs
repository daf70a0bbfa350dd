// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit camera controller for interactive 3D viewers.
//!
//! The camera orbits a look-at target at a given distance, elevation and
//! azimuth. Input (pan, zoom, pivot, rotate) is accumulated between frames
//! from any thread and applied once per frame with exponentially decaying
//! inertia. Hosts may also edit parameters directly; those edits are
//! replayed as the equivalent motion on the next update.
//!
//! # Key entry points
//!
//! - [`OrbitCamera`] - the per-frame controller
//! - [`CameraFrame`] - view/projection matrices returned by each update
//! - [`CameraPatch`] - optional per-frame overrides
//! - [`input::GestureMapper`] - maps pointer gestures onto interactions
//! - [`options::Options`] - camera and input configuration with TOML
//!   presets
//!
//! # Frame cycle
//!
//! ```ignore
//! let mut camera = OrbitCamera::new(&options.camera);
//! let clock = FrameClock::new(0);
//! loop {
//!     // from event handlers, possibly on another thread:
//!     camera.rotate(0.01, 0.0);
//!
//!     let frame = camera.update(clock.now_ms(), None);
//!     if frame.dirty {
//!         queue.write_buffer(&buffer, 0, bytemuck::bytes_of(
//!             &frame.to_uniform(),
//!         ));
//!     }
//! }
//! ```

pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod util;

pub use camera::core::{CameraFrame, CameraUniform};
pub use camera::patch::CameraPatch;
pub use camera::state::CameraState;
pub use camera::OrbitCamera;
pub use error::{CameraError, OrbitError};
