//! Crate-level error types.

use std::fmt;

/// Errors produced by the fallible I/O surfaces of the crate (option
/// presets). The per-frame camera path never returns these.
#[derive(Debug)]
pub enum OrbitError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for OrbitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<std::io::Error> for OrbitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Numeric degeneracies detected while updating the camera.
///
/// Every variant is recoverable: the controller clamps or falls back to a
/// previous valid value, logs the correction, and keeps rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    /// Projection parameters outside their valid ranges.
    DegenerateProjection {
        /// Requested vertical field of view in radians.
        fov_y: f32,
        /// Requested aspect ratio.
        aspect: f32,
        /// Requested near plane distance.
        near: f32,
        /// Requested far plane distance.
        far: f32,
    },
    /// `up` parallel to the eye-center axis, or eye and center coincide.
    SingularViewMatrix,
    /// A zoom delta would have pushed the orbit distance to or below zero.
    NonPositiveDistance {
        /// Distance the unclamped zoom would have produced.
        requested: f32,
    },
    /// A zoom delta or edit would have pushed the orbit distance past the
    /// largest distance that still yields finite matrices.
    ExcessiveDistance {
        /// Distance the unclamped zoom or edit would have produced.
        requested: f32,
    },
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateProjection {
                fov_y,
                aspect,
                near,
                far,
            } => write!(
                f,
                "degenerate projection (fov_y={fov_y}, aspect={aspect}, \
                 near={near}, far={far})"
            ),
            Self::SingularViewMatrix => {
                write!(f, "singular view matrix: up is parallel to view axis")
            }
            Self::NonPositiveDistance { requested } => {
                write!(f, "zoom would make distance non-positive ({requested})")
            }
            Self::ExcessiveDistance { requested } => {
                write!(f, "distance {requested} exceeds the supported range")
            }
        }
    }
}

impl std::error::Error for CameraError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_is_exposed_as_source() {
        let err = OrbitError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn camera_error_display_names_values() {
        let msg =
            CameraError::NonPositiveDistance { requested: -2.5 }.to_string();
        assert!(msg.contains("-2.5"));
    }
}
