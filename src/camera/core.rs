use glam::{Mat4, Vec3};

use super::state::CameraState;
use crate::error::CameraError;
use crate::util::math::{look_at, orbit_offset, perspective, try_invert};

/// Derived matrices for one committed camera state.
///
/// Returned by value from every update so callers never alias the
/// controller's internal copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// World-to-view transform.
    pub view: Mat4,
    /// View-to-clip transform.
    pub projection: Mat4,
    /// View-to-world transform.
    pub view_inverse: Mat4,
    /// Clip-to-view transform.
    pub projection_inverse: Mat4,
    /// Eye position in world space.
    pub eye: Vec3,
    /// Whether the matrices changed since the previous update.
    pub dirty: bool,
}

impl CameraFrame {
    /// Identity placeholder used before the first build.
    pub const IDENTITY: Self = Self {
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
        view_inverse: Mat4::IDENTITY,
        projection_inverse: Mat4::IDENTITY,
        eye: Vec3::ZERO,
        dirty: true,
    };

    /// Compute every derived output from `state`.
    ///
    /// The eye sits at `center + orbit_offset(distance, phi, theta)`.
    ///
    /// # Errors
    ///
    /// Returns the first degeneracy found in the view or projection.
    pub fn build(state: &CameraState) -> Result<Self, CameraError> {
        let eye =
            state.center + orbit_offset(state.distance, state.phi, state.theta);
        let view = look_at(eye, state.center, state.up)?;
        let view_inverse =
            try_invert(&view).ok_or(CameraError::SingularViewMatrix)?;
        let projection = Self::build_projection(state)?;
        let projection_inverse = try_invert(&projection).ok_or(
            CameraError::DegenerateProjection {
                fov_y: state.fov_y,
                aspect: state.aspect_ratio,
                near: state.near,
                far: state.far,
            },
        )?;
        Ok(Self {
            view,
            projection,
            view_inverse,
            projection_inverse,
            eye,
            dirty: true,
        })
    }

    /// Projection matrix alone, for resizes that leave the view untouched.
    ///
    /// # Errors
    ///
    /// [`CameraError::DegenerateProjection`] for out-of-range parameters.
    pub fn build_projection(state: &CameraState) -> Result<Mat4, CameraError> {
        perspective(state.fov_y, state.aspect_ratio, state.near, state.far)
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Unit view-space x axis expressed in world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.view.row(0).truncate()
    }

    /// Unit view-space y axis expressed in world space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.view.row(1).truncate()
    }

    /// Unit view-space z axis (pointing from center towards the eye)
    /// expressed in world space.
    #[must_use]
    pub fn back(&self) -> Vec3 {
        self.view.row(2).truncate()
    }

    /// Pack into the GPU uniform layout.
    #[must_use]
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            view_proj: self.view_projection().to_cols_array_2d(),
            eye: self.eye.to_array(),
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the camera matrices and eye position.
pub struct CameraUniform {
    /// View matrix.
    pub view: [[f32; 4]; 4],
    /// Projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub eye: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0; 3],
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::math::approx_eq_vec3;

    #[test]
    fn default_state_looks_down_negative_z() {
        let frame = CameraFrame::build(&CameraState::default()).unwrap();
        assert!(approx_eq_vec3(frame.eye, Vec3::new(0.0, 0.0, 10.0), 1e-6));
        assert!(approx_eq_vec3(frame.right(), Vec3::X, 1e-6));
        assert!(approx_eq_vec3(frame.up(), Vec3::Y, 1e-6));
        assert!(approx_eq_vec3(frame.back(), Vec3::Z, 1e-6));
    }

    #[test]
    fn inverses_are_consistent() {
        let state = CameraState {
            phi: 0.4,
            theta: 1.3,
            center: Vec3::new(2.0, -1.0, 0.5),
            ..CameraState::default()
        };
        let frame = CameraFrame::build(&state).unwrap();
        assert!((frame.view * frame.view_inverse)
            .abs_diff_eq(Mat4::IDENTITY, 1e-5));
        assert!((frame.projection * frame.projection_inverse)
            .abs_diff_eq(Mat4::IDENTITY, 1e-4));
        let eye_in_view = frame.view.transform_point3(frame.eye);
        assert!(approx_eq_vec3(eye_in_view, Vec3::ZERO, 1e-5));
    }

    #[test]
    fn degenerate_projection_is_reported() {
        let state = CameraState {
            near: 5.0,
            far: 1.0,
            ..CameraState::default()
        };
        assert!(matches!(
            CameraFrame::build(&state),
            Err(CameraError::DegenerateProjection { .. })
        ));
    }

    #[test]
    fn uniform_is_plain_bytes() {
        let frame = CameraFrame::build(&CameraState::default()).unwrap();
        let uniform = frame.to_uniform();
        let bytes: &[u8] = bytemuck::bytes_of(&uniform);
        // three 4x4 matrices, eye and padding
        assert_eq!(bytes.len(), (3 * 16 + 4) * 4);
        assert_eq!(uniform.eye, frame.eye.to_array());
    }
}
