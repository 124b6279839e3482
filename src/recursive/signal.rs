//! Signals read along a cell with extrapolation past its ends.

use crate::Vec3;
use crate::geometry;
use crate::topology::companion::{CellSide, ExtrapolationMode, map_curve_coordinate};

/// The point sequence a filter pass walks, together with its continuation.
///
/// `companion == None` means the cell continues into itself (a lonely cell
/// in sphere mode, or any cell in closed mode).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalPath {
    mode: ExtrapolationMode,
    origin: Vec<usize>,
    companion: Option<Vec<usize>>,
}

impl SignalPath {
    /// Build a path over `origin`; both cells must hold at least 2 points.
    pub fn new(mode: ExtrapolationMode, origin: &[usize], companion: Option<&[usize]>) -> Self {
        Self {
            mode,
            origin: origin.to_vec(),
            companion: companion.map(<[usize]>::to_vec),
        }
    }

    /// The path walked in the opposite direction.
    ///
    /// A distinct companion is reversed only when `reverse_companion` is set;
    /// a self-companion always follows the origin.
    pub fn reversed(&self, reverse_companion: bool) -> Self {
        let mut origin = self.origin.clone();
        origin.reverse();
        let companion = self.companion.as_ref().map(|c| {
            let mut c = c.clone();
            if reverse_companion {
                c.reverse();
            }
            c
        });
        Self {
            mode: self.mode,
            origin,
            companion,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.origin.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.origin.is_empty()
    }

    /// Point ids of the origin cell, in walking order.
    pub fn points(&self) -> &[usize] {
        &self.origin
    }

    fn companion_points(&self) -> &[usize] {
        self.companion.as_deref().unwrap_or(&self.origin)
    }

    /// Point id at curve coordinate `k`.
    pub fn point_id(&self, k: i64) -> usize {
        let companion = self.companion_points();
        let explicitly_closed = self.origin.first() == self.origin.last();
        let pos = map_curve_coordinate(
            self.mode,
            self.origin.len(),
            companion.len(),
            explicitly_closed,
            k,
        );
        match pos.side {
            CellSide::Origin => self.origin[pos.index],
            CellSide::Companion => companion[pos.index],
        }
    }

    /// Value of `values` at curve coordinate `k`.
    #[inline]
    pub fn sample(&self, values: &[Vec3], k: i64) -> Vec3 {
        values[self.point_id(k)]
    }
}

/// What a kernel may inspect while preparing the coefficients of one sample.
pub struct SampleContext<'a> {
    path: &'a SignalPath,
    points: &'a [Vec3],
}

impl<'a> SampleContext<'a> {
    pub fn new(path: &'a SignalPath, points: &'a [Vec3]) -> Self {
        Self { path, points }
    }

    pub fn path(&self) -> &SignalPath {
        self.path
    }

    /// Mean distance from the point at `k` to its two neighbours along the path.
    pub fn point_sampling(&self, k: i64) -> f64 {
        let before = self.path.sample(self.points, k - 1);
        let here = self.path.sample(self.points, k);
        let after = self.path.sample(self.points, k + 1);
        (geometry::distance(here, before) + geometry::distance(here, after)) / 2.0
    }

    /// Average of [`point_sampling`](Self::point_sampling) over the window
    /// `k - n ..= k + n` (the centre counted twice).
    pub fn mean_sampling(&self, k: i64, n: usize) -> f64 {
        let weight = 2.0 * (n as f64 + 1.0);
        (0..=n as i64)
            .map(|i| (self.point_sampling(k + i) + self.point_sampling(k - i)) / weight)
            .sum()
    }
}
