//! Symmetric (causal + anti-causal) recursive filtering of polyline signals.
//!
//! Every cell of the selected container is a 1-D signal: the point
//! coordinates, or the vectors of a point array, read along the cell. The
//! signal is filtered forward into a causal buffer, then backward from that
//! buffer into the output, which gives a zero-phase response.
//!
//! The first two samples of each pass cannot be computed recursively; they are
//! seeded with truncated impulse-response sums that read past the ends of the
//! cell through the extrapolation rule (see
//! [`companion`](crate::topology::companion)).
//!
//! In sphere mode the starting point of each pass is registered as a pole.
//! Anti-causal writes to registered poles are averaged over all cells once
//! every cell has been filtered.

use crate::Vec3;
use crate::data::mesh::{Mesh, SignalContainer};
use crate::debug_invariants::DebugInvariants;
use crate::geometry;
use crate::mesh_error::MeshError;
use crate::recursive::kernel::RecursiveKernel;
use crate::recursive::pole::PoleTable;
use crate::recursive::signal::{SampleContext, SignalPath};
use crate::topology::companion::{ExtrapolationMode, SymmetricCellResolver};

/// Where the filtered values come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SignalSource {
    /// Point coordinates.
    #[default]
    Points,
    /// A per-point vector array.
    Vectors,
}

/// Options for [`SymmetricRecursiveFilter`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecursiveFilterOptions {
    pub extrapolation: ExtrapolationMode,
    pub source: SignalSource,
    /// Array filtered with [`SignalSource::Vectors`]; `None` uses the active vectors.
    pub vector_array: Option<String>,
    pub container: SignalContainer,
    /// Keep the signal cells in the output. When false the container is emptied.
    pub keep_signals: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pass {
    Causal,
    AntiCausal,
}

/// Second-order zero-phase recursive filter driven by a [`RecursiveKernel`].
pub struct SymmetricRecursiveFilter<K> {
    kernel: K,
    options: RecursiveFilterOptions,
    poles: PoleTable,
}

impl<K: RecursiveKernel> SymmetricRecursiveFilter<K> {
    pub fn new(kernel: K, options: RecursiveFilterOptions) -> Self {
        Self {
            kernel,
            options,
            poles: PoleTable::new(),
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }

    pub fn options(&self) -> &RecursiveFilterOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RecursiveFilterOptions {
        &mut self.options
    }

    /// Poles collected by the last [`apply`](Self::apply).
    pub fn poles(&self) -> &PoleTable {
        &self.poles
    }

    fn vector_array_name(&self, input: &Mesh) -> Result<String, MeshError> {
        match &self.options.vector_array {
            Some(name) => Ok(name.clone()),
            None => input
                .point_data()
                .active_vectors_name()
                .map(str::to_owned)
                .ok_or_else(|| MeshError::MissingPointArray("<active vectors>".into())),
        }
    }

    /// Filter every signal cell of `input` and return the filtered mesh.
    pub fn apply(&mut self, input: &Mesh) -> Result<Mesh, MeshError> {
        input.validate_invariants()?;
        let n_points = input.n_points();
        let cells = input.signals(self.options.container);

        let vector_array = match self.options.source {
            SignalSource::Points => None,
            SignalSource::Vectors => Some(self.vector_array_name(input)?),
        };
        let signal: Vec<Vec3> = match &vector_array {
            None => input.points().to_vec(),
            Some(name) => {
                let tuples = input.point_data().try_array(name)?;
                if tuples.len() != n_points {
                    return Err(MeshError::ArrayLengthMismatch {
                        name: name.clone(),
                        expected: n_points,
                        found: tuples.len(),
                    });
                }
                tuples.to_vec()
            }
        };

        let mode = self.options.extrapolation;
        let sphere = mode == ExtrapolationMode::Sphere;
        let resolver = SymmetricCellResolver::new(cells, input.points());
        let mut causal = signal.clone();
        let mut output = signal.clone();
        self.poles.clear();

        for (cell_id, cell) in cells.iter().enumerate() {
            if cell.len() < 2 {
                return Err(MeshError::DegenerateCell {
                    cell: cell_id,
                    len: cell.len(),
                    min: 2,
                });
            }
            let companion = if sphere {
                Some(resolver.resolve(cell_id)?).filter(|&c| c != cell_id)
            } else {
                None
            };
            let closed = cell.first() == cell.last() || cells.len() == 1;
            log::trace!(
                "recursive filter: cell {cell_id} ({} points, start role {}, companion {companion:?}, closed {closed})",
                cell.len(),
                resolver.point_role(cell[0])
            );

            let companion_points = companion.map(|c| cells.cell(c)).transpose()?;
            let forward = SignalPath::new(mode, cell, companion_points);
            if sphere {
                self.poles.register(forward.points()[0]);
            }
            self.run_pass(&forward, Pass::Causal, input.points(), &signal, &signal, &mut causal, false);

            let backward = forward.reversed(!closed);
            if sphere {
                self.poles.register(backward.points()[0]);
            }
            self.run_pass(&backward, Pass::AntiCausal, input.points(), &signal, &causal, &mut output, sphere);
        }

        if sphere {
            for (point, mean) in self.poles.finalize() {
                output[point] = mean;
            }
        }
        if let Some(point) = output.iter().position(|v| !geometry::is_finite(*v)) {
            log::warn!("recursive filter produced non-finite values at point {point}");
        }
        log::debug!(
            "recursive filter: {} cells filtered, {} poles averaged",
            cells.len(),
            self.poles.len()
        );

        let mut mesh = input.clone();
        match &vector_array {
            None => mesh.points_mut().copy_from_slice(&output),
            Some(name) => {
                let tuples = mesh
                    .point_data_mut()
                    .array_mut(name)
                    .ok_or_else(|| MeshError::MissingPointArray(name.clone()))?;
                tuples.copy_from_slice(&output);
            }
        }
        if !self.options.keep_signals {
            mesh.signals_mut(self.options.container).clear();
        }
        Ok(mesh)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_pass(
        &mut self,
        path: &SignalPath,
        pass: Pass,
        points: &[Vec3],
        input: &[Vec3],
        from: &[Vec3],
        to: &mut [Vec3],
        accumulate_poles: bool,
    ) {
        let ids = path.points();
        let poles = &mut self.poles;
        let mut store = |to: &mut [Vec3], id: usize, value: Vec3| {
            to[id] = value;
            if accumulate_poles {
                poles.accumulate(id, value);
            }
        };

        for k in 0..2i64 {
            let ctx = SampleContext::new(path, points);
            self.kernel.prepare(&ctx, k);
            let seed = match pass {
                Pass::Causal => causal_seed(&self.kernel, path, input, k),
                Pass::AntiCausal => symmetric_seed(&self.kernel, path, input, k),
            };
            store(to, ids[k as usize], seed);
        }

        for k in 2..ids.len() {
            let (x0, x1, x2) = (from[ids[k]], from[ids[k - 1]], from[ids[k - 2]]);
            let (y1, y2) = (to[ids[k - 1]], to[ids[k - 2]]);
            let ctx = SampleContext::new(path, points);
            self.kernel.prepare(&ctx, k as i64);
            let c = self.kernel.coefficients(k as i64);
            let mut y = [0.0; 3];
            for comp in 0..3 {
                y[comp] = (c.b[0] * x0[comp] + c.b[1] * x1[comp] + c.b[2] * x2[comp]
                    - (c.a[1] * y1[comp] + c.a[2] * y2[comp]))
                    / c.a[0];
            }
            store(to, ids[k], y);
        }
    }
}

/// `sum_i h_c(i) x[k - i]` until the kernel stops the sum.
fn causal_seed<K: RecursiveKernel>(kernel: &K, path: &SignalPath, input: &[Vec3], k: i64) -> Vec3 {
    let mut acc = [0.0; 3];
    let mut i = 0usize;
    loop {
        let h = kernel.causal_impulse_response(i);
        acc = geometry::add_scaled(acc, path.sample(input, k - i as i64), h);
        i += 1;
        if kernel.stop_ir_approximation(i) {
            break acc;
        }
    }
}

/// `h_s(0) x[k] + sum_{i>=1} h_s(i) x[k - i] + h_s(-i) x[k + i]`.
fn symmetric_seed<K: RecursiveKernel>(
    kernel: &K,
    path: &SignalPath,
    input: &[Vec3],
    k: i64,
) -> Vec3 {
    let mut acc = geometry::scale(path.sample(input, k), kernel.symmetric_impulse_response(0));
    let mut i = 1i64;
    loop {
        acc = geometry::add_scaled(acc, path.sample(input, k - i), kernel.symmetric_impulse_response(i));
        acc = geometry::add_scaled(acc, path.sample(input, k + i), kernel.symmetric_impulse_response(-i));
        i += 1;
        if kernel.stop_ir_approximation(i as usize) {
            break acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recursive::kernel::{ConstantKernel, ExponentialSmoothingKernel};

    fn ramp_path() -> (SignalPath, Vec<Vec3>) {
        let values = (0..6).map(|i| [i as f64, 0.0, 0.0]).collect();
        let path = SignalPath::new(ExtrapolationMode::Closed, &[0, 1, 2, 3, 4, 5], None);
        (path, values)
    }

    #[test]
    fn delta_kernel_seeds_are_the_samples() {
        let (path, values) = ramp_path();
        let kernel = ConstantKernel::default();
        assert_eq!(causal_seed(&kernel, &path, &values, 1), [1.0, 0.0, 0.0]);
        assert_eq!(symmetric_seed(&kernel, &path, &values, 0), [0.0; 3]);
    }

    #[test]
    fn exponential_causal_seed_wraps_closed_signal() {
        let (path, values) = ramp_path();
        let kernel = ExponentialSmoothingKernel::new(1.0);
        // alpha = 1 collapses the impulse response to a delta
        assert_eq!(causal_seed(&kernel, &path, &values, 0), [0.0; 3]);
        let kernel = ExponentialSmoothingKernel::new(0.5);
        let seed = causal_seed(&kernel, &path, &values, 0);
        // x[0], x[-1] = x[5], x[-2] = x[4], ... weighted by 0.5^(i+1)
        let expected: f64 = (0..10)
            .map(|i: i64| 0.5f64.powi(i as i32 + 1) * (-i).rem_euclid(6) as f64)
            .sum();
        assert!((seed[0] - expected).abs() < 1e-12);
    }
}
