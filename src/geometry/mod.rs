//! Small vector helpers on `[f64; 3]` tuples.
//!
//! Everything here is plain IEEE-754 arithmetic; no result is clamped or
//! sanitized, so a non-finite input propagates to the output.

use crate::Vec3;

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

/// `a + s * b`.
#[inline]
pub fn add_scaled(a: Vec3, b: Vec3, s: f64) -> Vec3 {
    [a[0] + s * b[0], a[1] + s * b[1], a[2] + s * b[2]]
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    norm(sub(a, b))
}

#[inline]
pub fn is_finite(a: Vec3) -> bool {
    a.iter().all(|c| c.is_finite())
}

/// Cosine of the angle between `a` and `b`; NaN when either is zero-length.
pub fn cosine(a: Vec3, b: Vec3) -> f64 {
    dot(a, b) / (norm(a) * norm(b))
}

/// Rotate `point` by `angle` radians about the axis through `origin` along `direction`.
///
/// `direction` need not be normalized but must be non-zero; a zero direction
/// yields NaN coordinates.
pub fn rotate_about_axis(point: Vec3, origin: Vec3, direction: Vec3, angle: f64) -> Vec3 {
    let len = norm(direction);
    let [u, v, w] = scale(direction, 1.0 / len);
    let [a, b, c] = origin;
    let [x, y, z] = point;
    let (sin_t, cos_t) = angle.sin_cos();
    let one_minus = 1.0 - cos_t;
    let along = u * x + v * y + w * z;
    [
        (a * (v * v + w * w) - u * (b * v + c * w - along)) * one_minus
            + x * cos_t
            + (-c * v + b * w - w * y + v * z) * sin_t,
        (b * (u * u + w * w) - v * (a * u + c * w - along)) * one_minus
            + y * cos_t
            + (c * u - a * w + w * x - u * z) * sin_t,
        (c * (u * u + v * v) - w * (a * u + b * v - along)) * one_minus
            + z * cos_t
            + (-b * u + a * v - v * x + u * y) * sin_t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        distance(a, b) < 1e-12
    }

    #[test]
    fn quarter_turn_about_z() {
        let p = rotate_about_axis([1.0, 0.0, 0.5], [0.0; 3], [0.0, 0.0, 2.0], FRAC_PI_2);
        assert!(close(p, [0.0, 1.0, 0.5]));
    }

    #[test]
    fn rotation_about_offset_axis_keeps_axis_points() {
        let origin = [1.0, 2.0, 3.0];
        let dir = [1.0, 1.0, 0.0];
        let on_axis = add(origin, scale(dir, 4.0));
        assert!(close(rotate_about_axis(on_axis, origin, dir, 1.234), on_axis));
    }

    #[test]
    fn cosine_of_opposite_vectors() {
        assert!((cosine([1.0, 0.0, 0.0], [-2.0, 0.0, 0.0]) + 1.0).abs() < 1e-15);
        assert!(cosine([0.0; 3], [1.0, 0.0, 0.0]).is_nan());
    }
}
