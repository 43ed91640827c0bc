//! Homogeneous 4-component vector operations.
//!
//! Positions carry `w = 1`, directions carry `w = 0`. The helpers here only
//! ever touch the `xyz` part when measuring or normalizing, so the homogeneous
//! coordinate survives every operation unchanged.

use glam::{Vec3, Vec4};

/// Linear interpolation between `a` and `b` at factor `t`, all four components.
pub fn mix(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a + (b - a) * t
}

/// Midpoint of the segment `ab` (interpolation at factor 0.5).
pub fn midpoint(a: Vec4, b: Vec4) -> Vec4 {
    mix(a, b, 0.5)
}

/// Scale the `xyz` part of `v` to unit length, leaving `w` untouched.
///
/// A zero-length input is returned as-is rather than producing NaNs.
pub fn normalize_direction(v: Vec4) -> Vec4 {
    let xyz = v.truncate();
    let len = xyz.length();
    if len <= f32::EPSILON {
        return v;
    }
    (xyz / len).extend(v.w)
}

/// Dot product of the `xyz` parts.
pub fn dot3(a: Vec4, b: Vec4) -> f32 {
    a.truncate().dot(b.truncate())
}

/// Cross product of the `xyz` parts, returned as a direction (`w = 0`).
pub fn cross3(a: Vec4, b: Vec4) -> Vec4 {
    a.truncate().cross(b.truncate()).extend(0.0)
}

/// Spherical to Cartesian conversion with `theta` as the polar angle from +Z
/// and `phi` as the azimuth in the XY plane.
///
/// `radius * (sin θ cos φ, sin θ sin φ, cos θ)`
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(
        radius * sin_theta * cos_phi,
        radius * sin_theta * sin_phi,
        radius * cos_theta,
    )
}

/// Returns `true` if `value` is an exact power of two. Zero is not.
pub fn is_power_of_two(value: u32) -> bool {
    value.is_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    #[test]
    fn test_mix_endpoints_and_middle() {
        let a = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let b = Vec4::new(2.0, 4.0, -6.0, 1.0);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
        assert_eq!(mix(a, b, 0.5), Vec4::new(1.0, 2.0, -3.0, 1.0));
    }

    #[test]
    fn test_midpoint_keeps_homogeneous_w() {
        let a = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let b = Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(midpoint(a, b).w, 1.0);
    }

    #[test]
    fn test_normalize_direction_ignores_w() {
        let v = Vec4::new(3.0, 0.0, 4.0, 1.0);
        let n = normalize_direction(v);
        assert!((n.truncate().length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.z - 0.8).abs() < 1e-6);
        assert_eq!(n.w, 1.0);
    }

    #[test]
    fn test_normalize_zero_vector_is_identity() {
        let v = Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(normalize_direction(v), v);
    }

    #[test]
    fn test_dot_and_cross_use_xyz_only() {
        let x = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let y = Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(dot3(x, y), 0.0);
        assert_eq!(dot3(x, x), 1.0);
        assert_eq!(cross3(x, y), Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_spherical_theta_zero_is_plus_z() {
        let eye = spherical_to_cartesian(1.5, 0.0, 0.0);
        assert!((eye - Vec3::new(0.0, 0.0, 1.5)).length() < 1e-6);
    }

    #[test]
    fn test_spherical_equator_axes() {
        let x = spherical_to_cartesian(2.0, FRAC_PI_2, 0.0);
        assert!((x - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        let y = spherical_to_cartesian(2.0, FRAC_PI_2, FRAC_PI_2);
        assert!((y - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_spherical_length_equals_radius() {
        let angles = [0.0, 0.1, FRAC_PI_3, FRAC_PI_2, PI, 4.0, -2.5, 100.0];
        for &radius in &[0.5_f32, 1.0, 1.5, 10.0] {
            for &theta in &angles {
                for &phi in &angles {
                    let eye = spherical_to_cartesian(radius, theta, phi);
                    assert!(
                        (eye.length() - radius).abs() < 1e-5 * radius,
                        "|eye| = {} for r={radius} θ={theta} φ={phi}",
                        eye.length()
                    );
                }
            }
        }
    }

    #[test]
    fn test_power_of_two() {
        for v in [1, 2, 4, 8, 128, 256, 1024] {
            assert!(is_power_of_two(v), "{v} should be a power of two");
        }
        for v in [0, 3, 5, 100, 127, 129, 1000] {
            assert!(!is_power_of_two(v), "{v} should not be a power of two");
        }
    }
}
