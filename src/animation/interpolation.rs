//! Centralized interpolation utilities for per-frame motion.
//!
//! All frame-rate-dependent approaches in the crate are of the form
//! `lerp(current, target, delta * rate)`: an exponential approach that can
//! be interrupted and resumed from any intermediate state.

use glam::Vec3;

/// `a + (b - a) * clamp(t, 0, 1)`.
#[inline]
#[must_use]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Component-wise [`lerp_f32`] on positions.
#[inline]
#[must_use]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// One frame of an exponential approach toward `target` at `rate` per
/// second.
#[inline]
#[must_use]
pub fn approach(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    lerp_f32(current, target, delta * rate)
}

/// Rotate `p` about the vertical (Y) axis by `angle` radians.
///
/// Only the horizontal components change:
/// `x' = x cos a − z sin a`, `z' = x sin a + z cos a`.
#[inline]
#[must_use]
pub fn rotate_about_y(p: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(p.x * cos - p.z * sin, p.y, p.x * sin + p.z * cos)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(lerp_f32(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp_f32(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp_f32(0.0, 10.0, 4.0), 10.0);
        let v = lerp_vec3(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0), 2.0);
        assert_eq!(v, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn approach_with_zero_delta_is_identity() {
        assert_eq!(approach(0.3, 1.0, 0.44, 0.0), 0.3);
    }

    #[test]
    fn approach_is_resumable() {
        // Reversing mid-way continues from the current value, no restart.
        let mut v = 0.0;
        for _ in 0..30 {
            v = approach(v, 1.0, 2.0, 1.0 / 60.0);
        }
        let mid = v;
        v = approach(v, 0.0, 2.0, 1.0 / 60.0);
        assert!(v < mid && v > mid * 0.9);
    }

    #[test]
    fn rotation_keeps_height_and_radius() {
        let p = Vec3::new(3.0, 1.5, 0.0);
        let r = rotate_about_y(p, FRAC_PI_2);
        assert!((r - Vec3::new(0.0, 1.5, 3.0)).length() < 1e-5);
        assert!((r.x.hypot(r.z) - 3.0).abs() < 1e-5);
        assert_eq!(rotate_about_y(p, 0.0), p);
    }
}
