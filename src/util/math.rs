//! Matrix and vector kernel for the orbit camera.
//!
//! Thin, pure helpers over [`glam`] types. Everything here is stateless;
//! fallible constructors report degenerate input through [`CameraError`]
//! instead of producing NaN-filled matrices.

use glam::{Mat4, Quat, Vec3};

use crate::error::CameraError;

/// Absolute per-component tolerance for vector change detection.
pub const VEC3_EPSILON: f32 = 1e-6;

/// Squared length below which a direction is considered degenerate.
const DEGENERATE_LENGTH_SQ: f32 = 1e-12;

/// Right-handed look-at view matrix.
///
/// # Errors
///
/// [`CameraError::SingularViewMatrix`] when `eye == center` or when `up`
/// is parallel to the viewing axis.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Result<Mat4, CameraError> {
    let forward = center - eye;
    let side = forward.normalize_or_zero().cross(up.normalize_or_zero());
    if !forward.is_finite()
        || forward.length_squared() < DEGENERATE_LENGTH_SQ
        || side.length_squared() < DEGENERATE_LENGTH_SQ
    {
        return Err(CameraError::SingularViewMatrix);
    }
    Ok(Mat4::look_at_rh(eye, center, up))
}

/// Right-handed perspective projection with a `[0, 1]` depth range
/// (wgpu/Vulkan convention).
///
/// # Errors
///
/// [`CameraError::DegenerateProjection`] on out-of-range input.
pub fn perspective(
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
) -> Result<Mat4, CameraError> {
    let valid = fov_y > 0.0
        && fov_y < std::f32::consts::PI
        && aspect > 0.0
        && aspect.is_finite()
        && near > 0.0
        && far > near
        && far.is_finite();
    if !valid {
        return Err(CameraError::DegenerateProjection {
            fov_y,
            aspect,
            near,
            far,
        });
    }
    Ok(Mat4::perspective_rh(fov_y, aspect, near, far))
}

/// Invert `m`, or `None` if it is singular or contains non-finite values.
#[must_use]
pub fn try_invert(m: &Mat4) -> Option<Mat4> {
    let det = m.determinant();
    if !det.is_normal() {
        return None;
    }
    let inverse = m.inverse();
    inverse.is_finite().then_some(inverse)
}

/// `a + b * scale`.
#[inline]
#[must_use]
pub fn scale_and_add(a: Vec3, b: Vec3, scale: f32) -> Vec3 {
    a + b * scale
}

/// Normalize `v`, falling back to `fallback` for zero-length input.
#[inline]
#[must_use]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Rotate `point` by `angle` radians about the axis through `pivot`.
///
/// `axis` need not be normalized; a zero axis leaves the point unchanged.
#[must_use]
pub fn rotate_about(point: Vec3, pivot: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let Some(axis) = axis.try_normalize() else {
        return point;
    };
    pivot + Quat::from_axis_angle(axis, angle) * (point - pivot)
}

/// Offset from the orbit center to the eye for spherical coordinates.
///
/// `phi` is elevation (positive raises the eye along +Y), `theta` is
/// azimuth; `theta = phi = 0` places the eye on +Z.
#[must_use]
pub fn orbit_offset(distance: f32, phi: f32, theta: f32) -> Vec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        -distance * cos_phi * sin_theta,
        distance * sin_phi,
        distance * cos_phi * cos_theta,
    )
}

/// World axis (X, Y or Z) least parallel to `direction`.
#[must_use]
pub fn least_parallel_axis(direction: Vec3) -> Vec3 {
    let d = direction.abs();
    if d.x <= d.y && d.x <= d.z {
        Vec3::X
    } else if d.y <= d.z {
        Vec3::Y
    } else {
        Vec3::Z
    }
}

/// Component-wise equality within an absolute tolerance.
#[inline]
#[must_use]
pub fn approx_eq_vec3(a: Vec3, b: Vec3, epsilon: f32) -> bool {
    (a - b).abs().max_element() <= epsilon
}

/// Translation-scale-translation that scales about `anchor`.
#[must_use]
pub fn scale_about(anchor: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(anchor)
        * Mat4::from_scale(scale)
        * Mat4::from_translation(-anchor)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;

    #[test]
    fn orbit_offset_matches_axis_rotations() {
        let (d, phi, theta) = (7.0, 0.3, -1.1);
        let expected = Quat::from_rotation_y(-theta)
            * Quat::from_rotation_x(-phi)
            * Vec3::new(0.0, 0.0, d);
        assert!(approx_eq_vec3(orbit_offset(d, phi, theta), expected, 1e-5));
    }

    #[test]
    fn orbit_offset_default_is_on_positive_z() {
        assert_eq!(orbit_offset(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn look_at_rejects_parallel_up() {
        let err = look_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(err, Err(CameraError::SingularViewMatrix));
        assert!(look_at(Vec3::ZERO, Vec3::ZERO, Vec3::Y).is_err());
    }

    #[test]
    fn look_at_maps_center_onto_negative_z() {
        let view =
            look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y).unwrap();
        let p = view.transform_point3(Vec3::ZERO);
        assert!(approx_eq_vec3(p, Vec3::new(0.0, 0.0, -10.0), 1e-6));
    }

    #[test]
    fn perspective_rejects_out_of_range_input() {
        assert!(perspective(0.0, 1.0, 0.1, 100.0).is_err());
        assert!(perspective(std::f32::consts::PI, 1.0, 0.1, 100.0).is_err());
        assert!(perspective(FRAC_PI_4, 0.0, 0.1, 100.0).is_err());
        assert!(perspective(FRAC_PI_4, 1.0, 0.0, 100.0).is_err());
        assert!(perspective(FRAC_PI_4, 1.0, 1.0, 1.0).is_err());
        assert!(perspective(FRAC_PI_4, 1.5, 0.1, 100.0).is_ok());
    }

    #[test]
    fn try_invert_detects_singular() {
        assert!(try_invert(&Mat4::ZERO).is_none());
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let inv = try_invert(&m).unwrap();
        assert!((m * inv).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn rotate_about_uses_pivot() {
        let p = rotate_about(
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::Y,
            FRAC_PI_2,
        );
        assert!(approx_eq_vec3(p, Vec3::new(1.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn rotate_about_zero_axis_is_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(rotate_about(p, Vec3::ZERO, Vec3::ZERO, 1.0), p);
    }

    #[test]
    fn scale_about_keeps_anchor_fixed() {
        let anchor = Vec3::new(1.5, -0.5, 0.0);
        let m = scale_about(anchor, Vec3::new(2.0, 2.0, 1.0));
        assert!(approx_eq_vec3(m.transform_point3(anchor), anchor, 1e-6));
    }

    #[test]
    fn least_parallel_axis_prefers_smallest_component() {
        assert_eq!(least_parallel_axis(Vec3::new(0.0, 0.0, 1.0)), Vec3::X);
        assert_eq!(least_parallel_axis(Vec3::new(1.0, 0.1, 0.5)), Vec3::Y);
        assert_eq!(least_parallel_axis(Vec3::new(-1.0, 2.0, 0.0)), Vec3::Z);
    }

    #[test]
    fn approx_eq_is_absolute() {
        let a = Vec3::ONE;
        assert!(approx_eq_vec3(a, a + Vec3::splat(5e-7), VEC3_EPSILON));
        assert!(!approx_eq_vec3(a, a + Vec3::X * 0.001, VEC3_EPSILON));
    }
}
