#![allow(dead_code)]
use iterative_mesh::{
    Vec3,
    data::mesh::Mesh,
    geometry,
    topology::cell_array::CellArray,
};

/// Regular polygon of `n` points on the unit circle, as one explicitly closed polyline.
pub fn polygon(n: usize) -> Mesh {
    iterative_mesh::algs::meshgen::circle_polyline(n, 1.0, [0.0; 3], true).unwrap()
}

/// Open polyline through `points` in order.
pub fn polyline(points: Vec<Vec3>) -> Mesh {
    let ids: Vec<usize> = (0..points.len()).collect();
    Mesh::from_points(points).with_lines(CellArray::from_cells([ids]))
}

/// Distance of `p` from the z axis.
pub fn radial(p: Vec3) -> f64 {
    (p[0] * p[0] + p[1] * p[1]).sqrt()
}

/// Mean of [`radial`] over all points.
pub fn mean_radius(mesh: &Mesh) -> f64 {
    mesh.points().iter().map(|&p| radial(p)).sum::<f64>() / mesh.n_points() as f64
}

/// Assert two point sets agree within `tol`, point by point.
pub fn assert_points_close(got: &[Vec3], want: &[Vec3], tol: f64) {
    assert_eq!(got.len(), want.len(), "point count differs");
    for (i, (g, w)) in got.iter().zip(want).enumerate() {
        assert!(
            geometry::distance(*g, *w) <= tol,
            "point {i}: got {g:?}, want {w:?} (tol {tol})"
        );
    }
}
