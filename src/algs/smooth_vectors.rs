//! Laplacian smoothing of a per-point vector array.
//!
//! Each pass moves every vector toward the mean of its neighbours:
//! `v_i += relaxation_factor * (mean(v_j) - v_i)`. Passes are Jacobi style
//! (all updates read the previous pass), so the result does not depend on
//! point order. Points without neighbours keep their vector.

use crate::Vec3;
use crate::data::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::adjacency::PointAdjacency;

/// Options for [`smooth_vectors`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmoothVectorsOptions {
    /// Number of smoothing passes.
    pub iterations: usize,
    /// Fraction of the Laplacian applied per pass.
    pub relaxation_factor: f64,
}

impl Default for SmoothVectorsOptions {
    fn default() -> Self {
        Self {
            iterations: 20,
            relaxation_factor: 0.01,
        }
    }
}

/// Smooth the point array `array` of `mesh` over its point adjacency.
///
/// The mesh is not modified; the smoothed vectors are returned.
pub fn smooth_vectors(
    mesh: &Mesh,
    array: &str,
    options: &SmoothVectorsOptions,
) -> Result<Vec<Vec3>, MeshError> {
    if !options.relaxation_factor.is_finite() {
        return Err(MeshError::InvalidParameter(format!(
            "relaxation factor must be finite, got {}",
            options.relaxation_factor
        )));
    }
    let source = mesh.point_data().try_array(array)?;
    if source.len() != mesh.n_points() {
        return Err(MeshError::ArrayLengthMismatch {
            name: array.to_owned(),
            expected: mesh.n_points(),
            found: source.len(),
        });
    }
    let adjacency = PointAdjacency::from_mesh(mesh);
    Ok(smooth_with_adjacency(&adjacency, source, options))
}

/// [`smooth_vectors`] over a prebuilt adjacency.
pub fn smooth_with_adjacency(
    adjacency: &PointAdjacency,
    vectors: &[Vec3],
    options: &SmoothVectorsOptions,
) -> Vec<Vec3> {
    let mut current = vectors.to_vec();
    let mut next = current.clone();
    let relax = options.relaxation_factor;

    for _ in 0..options.iterations {
        for (i, out) in next.iter_mut().enumerate() {
            let nbrs = adjacency.neighbors(i);
            if nbrs.is_empty() {
                *out = current[i];
                continue;
            }
            let mut mean = [0.0; 3];
            for &j in nbrs {
                for c in 0..3 {
                    mean[c] += current[j][c];
                }
            }
            let inv = 1.0 / nbrs.len() as f64;
            for c in 0..3 {
                out[c] = current[i][c] + relax * (mean[c] * inv - current[i][c]);
            }
        }
        std::mem::swap(&mut current, &mut next);
    }
    current
}
