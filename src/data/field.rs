//! Vector fields sampled at arbitrary locations.
//!
//! A [`VectorField`] supplies a 3-vector per spatial location and carries a
//! *modified epoch*: any change to the field data bumps the epoch, which lets
//! a consumer notice that cached samples are stale.
//!
//! [`ImageField`] is a regular grid with trilinear interpolation; it is what a
//! deformable model is usually driven by (the gradient of an edge map).
//! [`FnField`] wraps an analytic closure.

use crate::Vec3;
use crate::mesh_error::MeshError;

/// Read-only source of per-location 3-vectors.
pub trait VectorField {
    /// Sample the field at `point`; `None` outside the field domain.
    fn sample(&self, point: Vec3) -> Option<Vec3>;

    /// Modified epoch; changes whenever the field data changes.
    fn epoch(&self) -> u64 {
        0
    }
}

impl<F: VectorField + ?Sized> VectorField for &F {
    fn sample(&self, point: Vec3) -> Option<Vec3> {
        (**self).sample(point)
    }

    fn epoch(&self) -> u64 {
        (**self).epoch()
    }
}

/// Analytic field defined by a closure over the whole space.
pub struct FnField<F> {
    f: F,
    epoch: u64,
}

impl<F> FnField<F>
where
    F: Fn(Vec3) -> Vec3,
{
    pub fn new(f: F) -> Self {
        Self { f, epoch: 0 }
    }

    /// Bump the modified epoch.
    pub fn modified(&mut self) {
        self.epoch += 1;
    }
}

impl<F> VectorField for FnField<F>
where
    F: Fn(Vec3) -> Vec3,
{
    fn sample(&self, point: Vec3) -> Option<Vec3> {
        Some((self.f)(point))
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Geometry of a regular axis-aligned grid.
///
/// Only constructed through [`GridGeometry::new`], deserialization included.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawGridGeometry")]
pub struct GridGeometry {
    dimensions: [usize; 3],
    origin: Vec3,
    spacing: Vec3,
}

#[derive(serde::Deserialize)]
struct RawGridGeometry {
    dimensions: [usize; 3],
    origin: Vec3,
    spacing: Vec3,
}

impl TryFrom<RawGridGeometry> for GridGeometry {
    type Error = MeshError;

    fn try_from(raw: RawGridGeometry) -> Result<Self, Self::Error> {
        Self::new(raw.dimensions, raw.origin, raw.spacing)
    }
}

impl GridGeometry {
    pub fn new(dimensions: [usize; 3], origin: Vec3, spacing: Vec3) -> Result<Self, MeshError> {
        if dimensions.iter().any(|&d| d == 0) {
            return Err(MeshError::InvalidGrid(format!(
                "dimensions must be non-zero, got {dimensions:?}"
            )));
        }
        if spacing.iter().any(|&s| !(s > 0.0) || !s.is_finite()) {
            return Err(MeshError::InvalidGrid(format!(
                "spacing must be positive and finite, got {spacing:?}"
            )));
        }
        Ok(Self {
            dimensions,
            origin,
            spacing,
        })
    }

    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.dimensions.iter().product()
    }

    /// Flat index of grid node `(i, j, k)`, x fastest.
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        let [nx, ny, _] = self.dimensions;
        i + nx * (j + ny * k)
    }

    /// World position of grid node `(i, j, k)`.
    pub fn node_position(&self, i: usize, j: usize, k: usize) -> Vec3 {
        [
            self.origin[0] + i as f64 * self.spacing[0],
            self.origin[1] + j as f64 * self.spacing[1],
            self.origin[2] + k as f64 * self.spacing[2],
        ]
    }

    /// Per axis: lower node index and interpolation weight of the upper node.
    /// `None` when `point` lies outside the grid.
    fn locate(&self, point: Vec3) -> Option<[(usize, f64); 3]> {
        const TOL: f64 = 1e-9;
        let mut out = [(0usize, 0.0f64); 3];
        for axis in 0..3 {
            let n = self.dimensions[axis];
            let c = (point[axis] - self.origin[axis]) / self.spacing[axis];
            if !c.is_finite() || c < -TOL || c > (n - 1) as f64 + TOL {
                return None;
            }
            if n == 1 {
                continue;
            }
            let c = c.clamp(0.0, (n - 1) as f64);
            let lower = (c.floor() as usize).min(n - 2);
            out[axis] = (lower, c - lower as f64);
        }
        Some(out)
    }
}

/// Vector field on a regular grid, trilinearly interpolated.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageField {
    geometry: GridGeometry,
    vectors: Vec<Vec3>,
    epoch: u64,
}

impl ImageField {
    pub fn new(geometry: GridGeometry, vectors: Vec<Vec3>) -> Result<Self, MeshError> {
        if vectors.len() != geometry.n_samples() {
            return Err(MeshError::ArrayLengthMismatch {
                name: "image vectors".into(),
                expected: geometry.n_samples(),
                found: vectors.len(),
            });
        }
        Ok(Self {
            geometry,
            vectors,
            epoch: 0,
        })
    }

    /// Evaluate `f` at every grid node.
    pub fn from_fn(geometry: GridGeometry, f: impl Fn(Vec3) -> Vec3) -> Self {
        let [nx, ny, nz] = geometry.dimensions;
        let mut vectors = Vec::with_capacity(geometry.n_samples());
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    vectors.push(f(geometry.node_position(i, j, k)));
                }
            }
        }
        Self {
            geometry,
            vectors,
            epoch: 0,
        }
    }

    /// Gradient of a scalar image by central differences (one-sided on the border).
    pub fn gradient(geometry: GridGeometry, scalars: &[f64]) -> Result<Self, MeshError> {
        if scalars.len() != geometry.n_samples() {
            return Err(MeshError::ArrayLengthMismatch {
                name: "image scalars".into(),
                expected: geometry.n_samples(),
                found: scalars.len(),
            });
        }
        let dims = geometry.dimensions;
        let mut vectors = Vec::with_capacity(scalars.len());
        for k in 0..dims[2] {
            for j in 0..dims[1] {
                for i in 0..dims[0] {
                    let node = [i, j, k];
                    let mut g = [0.0; 3];
                    for axis in 0..3 {
                        let n = dims[axis];
                        if n == 1 {
                            continue;
                        }
                        let lo = node[axis].saturating_sub(1);
                        let hi = (node[axis] + 1).min(n - 1);
                        let mut lo_node = node;
                        let mut hi_node = node;
                        lo_node[axis] = lo;
                        hi_node[axis] = hi;
                        let f_lo = scalars[geometry.index(lo_node[0], lo_node[1], lo_node[2])];
                        let f_hi = scalars[geometry.index(hi_node[0], hi_node[1], hi_node[2])];
                        g[axis] = (f_hi - f_lo) / ((hi - lo) as f64 * geometry.spacing[axis]);
                    }
                    vectors.push(g);
                }
            }
        }
        Self::new(geometry, vectors)
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn vectors(&self) -> &[Vec3] {
        &self.vectors
    }

    /// Mutable access to the samples; bumps the modified epoch.
    pub fn vectors_mut(&mut self) -> &mut [Vec3] {
        self.modified();
        &mut self.vectors
    }

    /// Bump the modified epoch.
    pub fn modified(&mut self) {
        self.epoch += 1;
    }
}

impl VectorField for ImageField {
    fn sample(&self, point: Vec3) -> Option<Vec3> {
        let [(i, ti), (j, tj), (k, tk)] = self.geometry.locate(point)?;
        let dims = self.geometry.dimensions;
        let step = |axis: usize| usize::from(dims[axis] > 1);
        let (di, dj, dk) = (step(0), step(1), step(2));

        let mut out = [0.0; 3];
        for (dz, wz) in [(0, 1.0 - tk), (dk, tk)] {
            for (dy, wy) in [(0, 1.0 - tj), (dj, tj)] {
                for (dx, wx) in [(0, 1.0 - ti), (di, ti)] {
                    let w = wx * wy * wz;
                    if w == 0.0 {
                        continue;
                    }
                    let v = self.vectors[self.geometry.index(i + dx, j + dy, k + dz)];
                    for c in 0..3 {
                        out[c] += w * v[c];
                    }
                }
            }
        }
        Some(out)
    }

    fn epoch(&self) -> u64 {
        self.epoch
    }
}
