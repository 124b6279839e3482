//! Compact storage for lists of cells.
//!
//! A [`CellArray`] stores every cell as a run of point indices inside one
//! connectivity buffer, addressed through an offsets table (CSR layout, the
//! same shape as [`PointAdjacency`](crate::topology::adjacency::PointAdjacency)).
//! Cells keep their insertion order; the cell id is the insertion position.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;

/// Ordered list of cells, each an ordered sequence of point indices.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CellArray {
    /// `offsets[c]..offsets[c + 1]` is the connectivity range of cell `c`.
    offsets: Vec<usize>,
    connectivity: Vec<usize>,
}

impl Default for CellArray {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            connectivity: Vec::new(),
        }
    }
}

impl CellArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cell array from any sequence of index lists.
    pub fn from_cells<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[usize]>,
    {
        let mut out = Self::default();
        for cell in cells {
            out.push_cell(cell.as_ref());
        }
        out
    }

    /// Append a cell and return its id.
    pub fn push_cell(&mut self, points: &[usize]) -> usize {
        if self.offsets.is_empty() {
            self.offsets.push(self.connectivity.len());
        }
        self.connectivity.extend_from_slice(points);
        self.offsets.push(self.connectivity.len());
        self.offsets.len() - 2
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of stored point references.
    #[inline]
    pub fn connectivity_len(&self) -> usize {
        self.connectivity.len()
    }

    /// Point indices of cell `id`.
    pub fn cell(&self, id: usize) -> Result<&[usize], MeshError> {
        if id >= self.len() {
            return Err(MeshError::CellOutOfRange {
                cell: id,
                n_cells: self.len(),
            });
        }
        Ok(&self.connectivity[self.offsets[id]..self.offsets[id + 1]])
    }

    /// Iterate over all cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.offsets
            .windows(2)
            .map(move |w| &self.connectivity[w[0]..w[1]])
    }

    /// Reverse the point order of cell `id` in place.
    pub fn reverse_cell(&mut self, id: usize) -> Result<(), MeshError> {
        if id >= self.len() {
            return Err(MeshError::CellOutOfRange {
                cell: id,
                n_cells: self.len(),
            });
        }
        self.connectivity[self.offsets[id]..self.offsets[id + 1]].reverse();
        Ok(())
    }

    /// Remove every cell.
    pub fn clear(&mut self) {
        self.offsets.clear();
        self.offsets.push(0);
        self.connectivity.clear();
    }

    /// Largest referenced point index, if any cell is non-empty.
    pub fn max_point_index(&self) -> Option<usize> {
        self.connectivity.iter().copied().max()
    }

    /// Check that every index is below `n_points`.
    pub fn validate_indices(&self, n_points: usize) -> Result<(), MeshError> {
        for (cell, points) in self.iter().enumerate() {
            if let Some(&point) = points.iter().find(|&&p| p >= n_points) {
                return Err(MeshError::PointIndexOutOfRange {
                    cell,
                    point,
                    n_points,
                });
            }
        }
        Ok(())
    }
}

impl DebugInvariants for CellArray {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "CellArray");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        let monotone = self.offsets.windows(2).all(|w| w[0] <= w[1]);
        let anchored = self.offsets.first() == Some(&0)
            && self.offsets.last() == Some(&self.connectivity.len());
        if monotone && anchored {
            Ok(())
        } else {
            Err(MeshError::InvalidParameter(
                "cell offsets are not a monotone prefix of the connectivity".into(),
            ))
        }
    }
}
