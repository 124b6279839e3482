//! Basic mesh generators: circle polylines and UV spheres with meridian
//! polylines, the usual test inputs of the recursive filter and the
//! iterative steps.

use crate::Vec3;
use crate::data::mesh::Mesh;
use crate::mesh_error::MeshError;
use crate::topology::cell_array::CellArray;
use std::f64::consts::{PI, TAU};

fn invalid_geometry(message: impl Into<String>) -> MeshError {
    MeshError::InvalidParameter(message.into())
}

/// `n` points evenly spaced on a circle of `radius` around `center` in the
/// plane `z = center.z`, joined by one polyline.
///
/// With `closed` the polyline repeats its first point at the end.
pub fn circle_polyline(
    n: usize,
    radius: f64,
    center: Vec3,
    closed: bool,
) -> Result<Mesh, MeshError> {
    if n < 2 {
        return Err(invalid_geometry("circle polyline requires at least 2 points"));
    }
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(invalid_geometry("radius must be positive"));
    }
    let points: Vec<Vec3> = (0..n)
        .map(|i| {
            let phi = TAU * i as f64 / n as f64;
            [
                center[0] + radius * phi.cos(),
                center[1] + radius * phi.sin(),
                center[2],
            ]
        })
        .collect();
    let mut line: Vec<usize> = (0..n).collect();
    if closed {
        line.push(0);
    }
    Ok(Mesh::from_points(points).with_lines(CellArray::from_cells([line])))
}

/// Options for [`uv_sphere`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UvSphereOptions {
    pub radius: f64,
    pub center: Vec3,
    /// Number of latitude bands between the poles.
    pub meridian_resolution: usize,
    /// Number of meridians.
    pub parallel_resolution: usize,
    /// When set, unit outward normals are attached as the active vectors
    /// under this name.
    pub vector_array: Option<String>,
}

impl Default for UvSphereOptions {
    fn default() -> Self {
        Self {
            radius: 0.5,
            center: [0.0; 3],
            meridian_resolution: 8,
            parallel_resolution: 8,
            vector_array: None,
        }
    }
}

/// Generate a UV sphere.
///
/// Point 0 is the south pole and point 1 the north pole; the remaining
/// points are stored latitude by latitude from north to south. The mesh carries
/// * one polyline per meridian, running from the north to the south pole,
/// * one closed vertex list per parallel (first point repeated at the end),
/// * the triangulated surface as polygons.
pub fn uv_sphere(options: &UvSphereOptions) -> Result<Mesh, MeshError> {
    let UvSphereOptions {
        radius,
        center,
        meridian_resolution: m,
        parallel_resolution: p,
        ..
    } = *options;
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(invalid_geometry("radius must be positive"));
    }
    if m < 2 || p < 3 {
        return Err(invalid_geometry(
            "uv sphere requires meridian_resolution >= 2 and parallel_resolution >= 3",
        ));
    }

    const SOUTH: usize = 0;
    const NORTH: usize = 1;
    let ring_point = |lat: usize, lon: usize| 2 + (lat - 1) * p + lon;

    let mut points = Vec::with_capacity(2 + (m - 1) * p);
    points.push([center[0], center[1], center[2] - radius]);
    points.push([center[0], center[1], center[2] + radius]);
    for lat in 1..m {
        let phi = PI * lat as f64 / m as f64;
        let (sin_p, cos_p) = phi.sin_cos();
        for lon in 0..p {
            let theta = TAU * lon as f64 / p as f64;
            let (sin_t, cos_t) = theta.sin_cos();
            points.push([
                center[0] + radius * cos_t * sin_p,
                center[1] + radius * sin_t * sin_p,
                center[2] + radius * cos_p,
            ]);
        }
    }

    let mut lines = CellArray::new();
    for lon in 0..p {
        let mut meridian = Vec::with_capacity(m + 1);
        meridian.push(NORTH);
        meridian.extend((1..m).map(|lat| ring_point(lat, lon)));
        meridian.push(SOUTH);
        lines.push_cell(&meridian);
    }

    let mut verts = CellArray::new();
    for lat in 1..m {
        let mut parallel: Vec<usize> = (0..p).map(|lon| ring_point(lat, lon)).collect();
        parallel.push(ring_point(lat, 0));
        verts.push_cell(&parallel);
    }

    let mut polys = CellArray::new();
    for lon in 0..p {
        let next = (lon + 1) % p;
        polys.push_cell(&[NORTH, ring_point(1, lon), ring_point(1, next)]);
    }
    for lat in 1..m - 1 {
        for lon in 0..p {
            let next = (lon + 1) % p;
            let a0 = ring_point(lat, lon);
            let a1 = ring_point(lat, next);
            let b0 = ring_point(lat + 1, lon);
            let b1 = ring_point(lat + 1, next);
            polys.push_cell(&[a0, b0, b1]);
            polys.push_cell(&[a0, b1, a1]);
        }
    }
    for lon in 0..p {
        let next = (lon + 1) % p;
        polys.push_cell(&[ring_point(m - 1, lon), SOUTH, ring_point(m - 1, next)]);
    }

    let normals: Vec<Vec3> = points
        .iter()
        .map(|q| {
            [
                (q[0] - center[0]) / radius,
                (q[1] - center[1]) / radius,
                (q[2] - center[2]) / radius,
            ]
        })
        .collect();
    let mesh = Mesh::from_points(points)
        .with_verts(verts)
        .with_lines(lines)
        .with_polys(polys);
    match &options.vector_array {
        Some(name) => mesh.with_vectors(name, normals),
        None => Ok(mesh),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_invariants::DebugInvariants;
    use crate::geometry;

    #[test]
    fn closed_circle_repeats_first_point() {
        let mesh = circle_polyline(6, 2.0, [1.0, 0.0, 0.0], true).unwrap();
        assert_eq!(mesh.n_points(), 6);
        assert_eq!(mesh.lines().cell(0).unwrap(), &[0, 1, 2, 3, 4, 5, 0]);
        for p in mesh.points() {
            assert!((geometry::distance(*p, [1.0, 0.0, 0.0]) - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn sphere_layout() {
        let options = UvSphereOptions {
            radius: 1.0,
            meridian_resolution: 4,
            parallel_resolution: 6,
            vector_array: Some("normals".into()),
            ..UvSphereOptions::default()
        };
        let mesh = uv_sphere(&options).unwrap();
        assert_eq!(mesh.n_points(), 2 + 3 * 6);
        assert_eq!(mesh.point(0).unwrap(), [0.0, 0.0, -1.0]);
        assert_eq!(mesh.point(1).unwrap(), [0.0, 0.0, 1.0]);
        assert_eq!(mesh.lines().len(), 6);
        assert_eq!(mesh.verts().len(), 3);
        assert_eq!(mesh.polys().len(), 2 * 6 + 2 * 6 * 2);
        let meridian = mesh.lines().cell(0).unwrap();
        assert_eq!(meridian.first(), Some(&1));
        assert_eq!(meridian.last(), Some(&0));
        assert_eq!(meridian.len(), 5);
        let parallel = mesh.verts().cell(0).unwrap();
        assert_eq!(parallel.first(), parallel.last());
        for p in mesh.points() {
            assert!((geometry::norm(*p) - 1.0).abs() < 1e-12);
        }
        assert!(mesh.validate_invariants().is_ok());
        assert_eq!(mesh.point_data().active_vectors_name(), Some("normals"));
    }

    #[test]
    fn rejects_coarse_sphere() {
        let options = UvSphereOptions {
            parallel_resolution: 2,
            ..UvSphereOptions::default()
        };
        assert!(uv_sphere(&options).is_err());
        assert!(circle_polyline(1, 1.0, [0.0; 3], false).is_err());
    }
}
