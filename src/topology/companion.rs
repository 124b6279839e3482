//! Companion cells and curve-coordinate extrapolation for polyline signals.
//!
//! A signal is read along a cell at integer *curve coordinates*. Coordinates
//! outside `0..n` are folded back onto real points by the extrapolation rule:
//!
//! * [`ExtrapolationMode::Closed`]: the cell is periodic.
//! * [`ExtrapolationMode::Sphere`]: the cell is one half of a great circle;
//!   past either end the signal continues along a *companion* cell that
//!   shares the starting pole and leaves it in the most opposite direction
//!   (the other half of the circle), then comes back along the origin, and
//!   so on.
//!
//! [`SymmetricCellResolver`] picks the companion of a cell.

use crate::Vec3;
use crate::geometry;
use crate::mesh_error::MeshError;
use crate::topology::cell_array::CellArray;

/// How a signal is extended beyond the ends of its cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExtrapolationMode {
    /// Continue through the starting pole along the companion cell.
    #[default]
    Sphere,
    /// Wrap around; the cell is a closed curve.
    Closed,
}

/// Which of the two cells a folded coordinate landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellSide {
    Origin,
    Companion,
}

/// Result of folding a curve coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePosition {
    pub side: CellSide,
    /// Position inside the selected cell.
    pub index: usize,
}

/// Fold curve coordinate `k` of an origin cell of `origin_len` points onto a
/// position of the origin or its companion (`companion_len` points).
///
/// In [`ExtrapolationMode::Closed`] the period is the number of distinct
/// points: `origin_len - 1` when the cell repeats its first point at the end
/// (`explicitly_closed`), `origin_len` otherwise.
///
/// Both lengths must be at least 2.
pub fn map_curve_coordinate(
    mode: ExtrapolationMode,
    origin_len: usize,
    companion_len: usize,
    explicitly_closed: bool,
    k: i64,
) -> CurvePosition {
    let n = origin_len as i64;
    let m = companion_len as i64;
    match mode {
        ExtrapolationMode::Closed => {
            let period = if explicitly_closed { n - 1 } else { n }.max(1);
            CurvePosition {
                side: CellSide::Origin,
                index: k.rem_euclid(period) as usize,
            }
        }
        ExtrapolationMode::Sphere if k >= 0 => {
            let folded = k % (2 * n);
            if folded < n {
                CurvePosition {
                    side: CellSide::Origin,
                    index: folded as usize,
                }
            } else {
                CurvePosition {
                    side: CellSide::Companion,
                    index: (m - 1 - (folded - n)).rem_euclid(m) as usize,
                }
            }
        }
        ExtrapolationMode::Sphere => {
            let s = -k / (n - 1);
            if s % 2 == 0 {
                CurvePosition {
                    side: CellSide::Companion,
                    index: (-k + s).rem_euclid(m) as usize,
                }
            } else {
                CurvePosition {
                    side: CellSide::Origin,
                    index: (n - 1 - (-k + s).rem_euclid(n)) as usize,
                }
            }
        }
    }
}

/// Companion lookup over one cell list and its point coordinates.
pub struct SymmetricCellResolver<'a> {
    cells: &'a CellArray,
    points: &'a [Vec3],
}

impl<'a> SymmetricCellResolver<'a> {
    pub fn new(cells: &'a CellArray, points: &'a [Vec3]) -> Self {
        Self { cells, points }
    }

    fn first_edge(&self, cell: usize, points: &[usize]) -> Result<Vec3, MeshError> {
        let lookup = |p: usize| {
            self.points.get(p).copied().ok_or(MeshError::PointIndexOutOfRange {
                cell,
                point: p,
                n_points: self.points.len(),
            })
        };
        Ok(geometry::sub(lookup(points[1])?, lookup(points[0])?))
    }

    /// The cell that best continues `origin` through its starting pole.
    ///
    /// Candidates are the cells starting at the same point (`origin`
    /// included); the one whose first edge makes the smallest cosine with the
    /// origin's first edge wins. Ties keep the earliest cell and are logged as
    /// a non-manifold pole. Candidates with a zero-length first edge are
    /// skipped.
    pub fn resolve(&self, origin: usize) -> Result<usize, MeshError> {
        let origin_points = self.cells.cell(origin)?;
        if origin_points.len() < 2 {
            return Err(MeshError::DegenerateCell {
                cell: origin,
                len: origin_points.len(),
                min: 2,
            });
        }
        let pole = origin_points[0];
        let reference = self.first_edge(origin, origin_points)?;

        let mut best: Option<(usize, f64)> = None;
        let mut tied = 0usize;
        for (id, points) in self.cells.iter().enumerate() {
            if points.len() < 2 || points[0] != pole {
                continue;
            }
            let cos = geometry::cosine(reference, self.first_edge(id, points)?);
            if !cos.is_finite() {
                continue;
            }
            match best {
                Some((_, min)) if cos < min => {
                    best = Some((id, cos));
                    tied = 0;
                }
                Some((_, min)) if cos == min => tied += 1,
                Some(_) => {}
                None => best = Some((id, cos)),
            }
        }

        let (companion, cos) = best.ok_or(MeshError::MissingCompanion { cell: origin, pole })?;
        if tied > 0 {
            log::warn!(
                "non-manifold pole {pole}: {} cells tie as companion of cell {origin} (cos {cos}); keeping cell {companion}",
                tied + 1
            );
        }
        Ok(companion)
    }

    /// Fold curve coordinate `k` of `origin` and return `(cell id, position)`.
    pub fn map_index(
        &self,
        mode: ExtrapolationMode,
        origin: usize,
        companion: usize,
        k: i64,
    ) -> Result<(usize, usize), MeshError> {
        let origin_points = self.cells.cell(origin)?;
        let companion_points = self.cells.cell(companion)?;
        for (cell, len) in [(origin, origin_points.len()), (companion, companion_points.len())] {
            if len < 2 {
                return Err(MeshError::DegenerateCell { cell, len, min: 2 });
            }
        }
        let explicitly_closed = origin_points.first() == origin_points.last();
        let pos = map_curve_coordinate(
            mode,
            origin_points.len(),
            companion_points.len(),
            explicitly_closed,
            k,
        );
        Ok(match pos.side {
            CellSide::Origin => (origin, pos.index),
            CellSide::Companion => (companion, pos.index),
        })
    }

    /// Number of cells starting at `point`.
    pub fn point_role(&self, point: usize) -> usize {
        self.cells
            .iter()
            .filter(|c| c.first() == Some(&point))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(index: usize) -> CurvePosition {
        CurvePosition {
            side: CellSide::Origin,
            index,
        }
    }

    fn companion(index: usize) -> CurvePosition {
        CurvePosition {
            side: CellSide::Companion,
            index,
        }
    }

    #[test]
    fn closed_wraps_on_distinct_points() {
        let map = |k| map_curve_coordinate(ExtrapolationMode::Closed, 7, 7, true, k);
        assert_eq!(map(6), origin(0));
        assert_eq!(map(-1), origin(5));
        assert_eq!(map(-13), origin(5));
        let implicit = |k| map_curve_coordinate(ExtrapolationMode::Closed, 6, 6, false, k);
        assert_eq!(implicit(6), origin(0));
        assert_eq!(implicit(-1), origin(5));
    }

    #[test]
    fn sphere_forward_runs_back_along_companion() {
        let map = |k| map_curve_coordinate(ExtrapolationMode::Sphere, 5, 5, false, k);
        assert_eq!(map(4), origin(4));
        assert_eq!(map(5), companion(4));
        assert_eq!(map(9), companion(0));
        assert_eq!(map(10), origin(0));
    }

    #[test]
    fn sphere_backward_reflects_through_pole() {
        let map = |k| map_curve_coordinate(ExtrapolationMode::Sphere, 5, 5, false, k);
        assert_eq!(map(-1), companion(1));
        assert_eq!(map(-3), companion(3));
        assert_eq!(map(-4), origin(4));
        assert_eq!(map(-5), origin(3));
    }

    fn star() -> (CellArray, Vec<Vec3>) {
        let points = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.1, 0.0],
            [2.0, 0.0, 0.0],
        ];
        let cells = CellArray::from_cells([vec![0, 1, 4], vec![0, 2], vec![0, 3]]);
        (cells, points)
    }

    #[test]
    fn companion_is_most_opposite_branch() {
        let (cells, points) = star();
        let resolver = SymmetricCellResolver::new(&cells, &points);
        assert_eq!(resolver.resolve(0).unwrap(), 2);
        assert_eq!(resolver.point_role(0), 3);
        assert_eq!(resolver.point_role(1), 0);
        assert_eq!(
            resolver.map_index(ExtrapolationMode::Sphere, 0, 2, -1).unwrap(),
            (2, 1)
        );
    }

    #[test]
    fn lonely_cell_is_its_own_companion() {
        let points = vec![[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let cells = CellArray::from_cells([[0usize, 1, 2]]);
        let resolver = SymmetricCellResolver::new(&cells, &points);
        assert_eq!(resolver.resolve(0).unwrap(), 0);
    }

    #[test]
    fn ties_keep_first_cell() {
        let points = vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, -1.0, 0.0]];
        let cells = CellArray::from_cells([vec![0, 1], vec![0, 2], vec![0, 3]]);
        let resolver = SymmetricCellResolver::new(&cells, &points);
        assert_eq!(resolver.resolve(0).unwrap(), 1);
    }

    #[test]
    fn degenerate_and_missing_companions_fail() {
        let points = vec![[0.0; 3], [0.0; 3]];
        let cells = CellArray::from_cells([vec![0usize], vec![0, 1]]);
        let resolver = SymmetricCellResolver::new(&cells, &points);
        assert!(matches!(
            resolver.resolve(0),
            Err(MeshError::DegenerateCell { cell: 0, len: 1, min: 2 })
        ));
        assert_eq!(
            resolver.resolve(1),
            Err(MeshError::MissingCompanion { cell: 1, pole: 0 })
        );
    }
}
