//! Random per-point "Brownian" vectors.

use crate::Vec3;
use crate::geometry;
use crate::mesh_error::MeshError;
use rand::Rng;

/// Draw `n` vectors with a uniformly random direction and a magnitude uniform
/// in `[min_speed, max_speed]`.
///
/// The sequence is fully determined by the state of `rng`.
pub fn brownian_vectors<R: Rng + ?Sized>(
    n: usize,
    min_speed: f64,
    max_speed: f64,
    rng: &mut R,
) -> Result<Vec<Vec3>, MeshError> {
    if !(min_speed >= 0.0 && min_speed <= max_speed && max_speed.is_finite()) {
        return Err(MeshError::InvalidParameter(format!(
            "brownian speeds must satisfy 0 <= min <= max, got [{min_speed}, {max_speed}]"
        )));
    }
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let direction = loop {
            let d = [
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
            ];
            let len = geometry::norm(d);
            if len > 1e-12 && len <= 1.0 {
                break geometry::scale(d, 1.0 / len);
            }
        };
        let speed = if max_speed > min_speed {
            rng.gen_range(min_speed..=max_speed)
        } else {
            min_speed
        };
        out.push(geometry::scale(direction, speed));
    }
    Ok(out)
}
