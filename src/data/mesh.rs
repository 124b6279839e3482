//! Indexed point/cell mesh.
//!
//! A [`Mesh`] owns an ordered point array, three cell lists (vertex lists,
//! polylines, polygons) and named per-point vector arrays. Cloning is a deep
//! copy; [`Mesh::copy_from`] overwrites an existing mesh while reusing its
//! allocations, which is how the iterative engine refreshes its cache.

use crate::Vec3;
use crate::data::point_data::PointData;
use crate::debug_invariants::DebugInvariants;
use crate::geometry;
use crate::mesh_error::MeshError;
use crate::topology::cell_array::CellArray;

/// Which cell list carries the signals of a polyline algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SignalContainer {
    /// Vertex lists (point clouds grouped into ordered runs).
    Verts,
    /// Polylines.
    #[default]
    Lines,
}

/// Indexed polygonal mesh.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    points: Vec<Vec3>,
    verts: CellArray,
    lines: CellArray,
    polys: CellArray,
    point_data: PointData,
}

impl Mesh {
    /// A mesh with points and no cells.
    pub fn from_points(points: Vec<Vec3>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Builder: replace the vertex lists.
    pub fn with_verts(mut self, verts: CellArray) -> Self {
        self.verts = verts;
        self
    }

    /// Builder: replace the polylines.
    pub fn with_lines(mut self, lines: CellArray) -> Self {
        self.lines = lines;
        self
    }

    /// Builder: replace the polygons.
    pub fn with_polys(mut self, polys: CellArray) -> Self {
        self.polys = polys;
        self
    }

    /// Builder: attach a vector array and make it the active vectors.
    pub fn with_vectors(mut self, name: &str, tuples: Vec<Vec3>) -> Result<Self, MeshError> {
        if tuples.len() != self.points.len() {
            return Err(MeshError::ArrayLengthMismatch {
                name: name.to_owned(),
                expected: self.points.len(),
                found: tuples.len(),
            });
        }
        self.point_data.set_array(name, tuples);
        self.point_data.set_active_vectors(name)?;
        Ok(self)
    }

    #[inline]
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut [Vec3] {
        &mut self.points
    }

    pub fn point(&self, id: usize) -> Result<Vec3, MeshError> {
        self.points
            .get(id)
            .copied()
            .ok_or(MeshError::PointOutOfRange {
                point: id,
                n_points: self.points.len(),
            })
    }

    pub fn set_point(&mut self, id: usize, value: Vec3) -> Result<(), MeshError> {
        let n_points = self.points.len();
        let slot = self
            .points
            .get_mut(id)
            .ok_or(MeshError::PointOutOfRange { point: id, n_points })?;
        *slot = value;
        Ok(())
    }

    /// Append points, padding every point array with zero tuples. Returns the first new id.
    pub fn append_points(&mut self, points: &[Vec3]) -> usize {
        let first = self.points.len();
        self.points.extend_from_slice(points);
        self.point_data.extend_with_zeros(points.len());
        first
    }

    pub fn verts(&self) -> &CellArray {
        &self.verts
    }

    pub fn verts_mut(&mut self) -> &mut CellArray {
        &mut self.verts
    }

    pub fn lines(&self) -> &CellArray {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut CellArray {
        &mut self.lines
    }

    pub fn polys(&self) -> &CellArray {
        &self.polys
    }

    pub fn polys_mut(&mut self) -> &mut CellArray {
        &mut self.polys
    }

    /// The cell list selected by `container`.
    pub fn signals(&self, container: SignalContainer) -> &CellArray {
        match container {
            SignalContainer::Verts => &self.verts,
            SignalContainer::Lines => &self.lines,
        }
    }

    pub fn signals_mut(&mut self, container: SignalContainer) -> &mut CellArray {
        match container {
            SignalContainer::Verts => &mut self.verts,
            SignalContainer::Lines => &mut self.lines,
        }
    }

    pub fn point_data(&self) -> &PointData {
        &self.point_data
    }

    pub fn point_data_mut(&mut self) -> &mut PointData {
        &mut self.point_data
    }

    /// Deep-copy `other` into `self`, reusing allocations.
    pub fn copy_from(&mut self, other: &Mesh) {
        self.clone_from(other);
    }

    /// Number of cells across all three cell lists.
    pub fn n_cells(&self) -> usize {
        self.verts.len() + self.lines.len() + self.polys.len()
    }

    /// First point id whose coordinates or vector tuples are not finite.
    pub fn first_non_finite_point(&self) -> Option<usize> {
        let in_points = self.points.iter().position(|p| !geometry::is_finite(*p));
        let in_arrays = self
            .point_data
            .iter()
            .filter_map(|a| a.tuples().iter().position(|t| !geometry::is_finite(*t)))
            .min();
        match (in_points, in_arrays) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.first_non_finite_point().is_none()
    }
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Mesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        crate::topology::validation::validate_mesh(self)
    }
}
