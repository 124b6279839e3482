//! Sample a vector field at mesh points.

use crate::Vec3;
use crate::data::field::VectorField;
use crate::data::mesh::Mesh;

/// Field samples for a set of points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbeResult {
    /// One vector per probed point; zero where the point fell outside the field.
    pub vectors: Vec<Vec3>,
    /// `valid[i]` is false when point `i` lay outside the field domain.
    pub valid: Vec<bool>,
}

impl ProbeResult {
    /// Number of points that landed outside the field.
    pub fn n_invalid(&self) -> usize {
        self.valid.iter().filter(|v| !**v).count()
    }
}

/// Sample `field` at every point.
pub fn probe<F>(field: &F, points: &[Vec3]) -> ProbeResult
where
    F: VectorField + ?Sized,
{
    let mut vectors = Vec::with_capacity(points.len());
    let mut valid = Vec::with_capacity(points.len());
    for &p in points {
        match field.sample(p) {
            Some(v) => {
                vectors.push(v);
                valid.push(true);
            }
            None => {
                vectors.push([0.0; 3]);
                valid.push(false);
            }
        }
    }
    ProbeResult { vectors, valid }
}

/// Probe `field` at the points of `mesh` and store the samples as the point
/// array `name`, which also becomes the active vectors.
pub fn probe_mesh<F>(field: &F, mesh: &mut Mesh, name: &str) -> ProbeResult
where
    F: VectorField + ?Sized,
{
    let result = probe(field, mesh.points());
    if result.n_invalid() > 0 {
        log::trace!(
            "probe: {} of {} points outside the field",
            result.n_invalid(),
            mesh.n_points()
        );
    }
    let point_data = mesh.point_data_mut();
    point_data.set_array(name, result.vectors.clone());
    // `name` was inserted just above.
    let _ = point_data.set_active_vectors(name);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::field::{GridGeometry, ImageField};

    #[test]
    fn outside_points_get_zero_and_invalid() {
        let geometry = GridGeometry::new([2, 2, 2], [0.0; 3], [1.0; 3]).unwrap();
        let field = ImageField::from_fn(geometry, |_| [1.0, 2.0, 3.0]);
        let result = probe(&field, &[[0.5; 3], [4.0, 0.0, 0.0]]);
        assert_eq!(result.vectors, vec![[1.0, 2.0, 3.0], [0.0; 3]]);
        assert_eq!(result.valid, vec![true, false]);
        assert_eq!(result.n_invalid(), 1);
    }

    #[test]
    fn probe_mesh_sets_active_vectors() {
        let field = crate::data::field::FnField::new(|p: Vec3| [p[0], 0.0, 0.0]);
        let mut mesh = Mesh::from_points(vec![[1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        probe_mesh(&field, &mut mesh, "Magnitude");
        assert_eq!(mesh.point_data().active_vectors_name(), Some("Magnitude"));
        assert_eq!(mesh.point_data().vectors().unwrap()[1], [2.0, 0.0, 0.0]);
    }
}
