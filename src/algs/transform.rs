//! Point transformation helpers: coordinate updates that leave topology and
//! point data untouched.

use crate::Vec3;
use crate::data::mesh::Mesh;
use crate::geometry;
use crate::mesh_error::MeshError;

/// Coordinate update strategies for [`transform_points`].
pub enum PointTransform<'a> {
    /// Update coordinates using a user-supplied function.
    ///
    /// The function receives the point id and a mutable reference to its
    /// coordinates.
    Function(&'a mut dyn FnMut(usize, &mut Vec3) -> Result<(), MeshError>),
    /// Add `scale * vectors[i]` to point `i`.
    ///
    /// `vectors` must hold one tuple per point.
    Displacement { vectors: &'a [Vec3], scale: f64 },
}

/// Hook set for updating derived data after a transform.
#[derive(Default)]
pub struct TransformHooks<'a> {
    /// Invoked after coordinates are updated.
    pub after_update: Option<&'a mut dyn FnMut(&Mesh) -> Result<(), MeshError>>,
}

/// Apply a coordinate transformation to `mesh` in place.
pub fn transform_points(
    mesh: &mut Mesh,
    transform: PointTransform<'_>,
    mut hooks: TransformHooks<'_>,
) -> Result<(), MeshError> {
    match transform {
        PointTransform::Function(update) => {
            for (id, point) in mesh.points_mut().iter_mut().enumerate() {
                update(id, point)?;
            }
        }
        PointTransform::Displacement { vectors, scale } => {
            if vectors.len() != mesh.n_points() {
                return Err(MeshError::ArrayLengthMismatch {
                    name: "displacement".into(),
                    expected: mesh.n_points(),
                    found: vectors.len(),
                });
            }
            for (point, v) in mesh.points_mut().iter_mut().zip(vectors) {
                *point = geometry::add_scaled(*point, *v, scale);
            }
        }
    }

    if let Some(after_update) = hooks.after_update.as_mut() {
        after_update(&*mesh)?;
    }

    Ok(())
}

/// Warp a copy of `mesh`: `p' = p + scale * v` for every point.
///
/// `vectors` names a point array; `None` uses the active vectors. Point data
/// and cells are carried over unchanged. Non-finite results are logged, not
/// rejected.
pub fn warp(mesh: &Mesh, vectors: Option<&str>, scale: f64) -> Result<Mesh, MeshError> {
    let displacement = mesh.point_data().resolve(vectors)?.to_vec();
    let mut out = mesh.clone();
    let mut report = |warped: &Mesh| -> Result<(), MeshError> {
        if let Some(point) = warped.first_non_finite_point() {
            log::warn!("warp produced non-finite coordinates at point {point} (scale {scale})");
        }
        Ok(())
    };
    transform_points(
        &mut out,
        PointTransform::Displacement {
            vectors: &displacement,
            scale,
        },
        TransformHooks {
            after_update: Some(&mut report),
        },
    )?;
    Ok(out)
}
