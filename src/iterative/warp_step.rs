//! Iterative random warp: every iteration pushes each point along a fresh
//! Brownian vector.

use crate::algs::brownian::brownian_vectors;
use crate::algs::transform::warp;
use crate::data::field::VectorField;
use crate::data::mesh::Mesh;
use crate::iterative::engine::IterativeStep;
use crate::mesh_error::MeshError;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Options for [`IterativeWarpStep`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IterativeWarpOptions {
    pub scale_factor: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Seed of the random stream; the stream restarts at every reset.
    pub seed: u64,
    /// Name of the point array receiving the random vectors.
    pub vector_array: String,
}

impl Default for IterativeWarpOptions {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            min_speed: 0.0,
            max_speed: 1.0,
            seed: 0,
            vector_array: "BrownianVectors".into(),
        }
    }
}

/// One random-walk iteration. Needs no field.
#[derive(Clone, Debug)]
pub struct IterativeWarpStep {
    options: IterativeWarpOptions,
    rng: SmallRng,
}

impl IterativeWarpStep {
    pub fn new(options: IterativeWarpOptions) -> Self {
        let rng = SmallRng::seed_from_u64(options.seed);
        Self { options, rng }
    }

    pub fn options(&self) -> &IterativeWarpOptions {
        &self.options
    }

    /// Takes effect from the next iteration, without a reset.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.options.scale_factor = scale_factor;
    }

    /// Takes effect at the next reset.
    pub fn set_seed(&mut self, seed: u64) {
        self.options.seed = seed;
    }
}

impl Default for IterativeWarpStep {
    fn default() -> Self {
        Self::new(IterativeWarpOptions::default())
    }
}

impl IterativeStep for IterativeWarpStep {
    fn reset(&mut self, _input: &Mesh, _field: Option<&dyn VectorField>) -> Result<(), MeshError> {
        self.rng = SmallRng::seed_from_u64(self.options.seed);
        Ok(())
    }

    fn step(&mut self, cached: &Mesh, _field: Option<&dyn VectorField>) -> Result<Mesh, MeshError> {
        let vectors = brownian_vectors(
            cached.n_points(),
            self.options.min_speed,
            self.options.max_speed,
            &mut self.rng,
        )?;
        let mut with_vectors = cached.clone();
        let point_data = with_vectors.point_data_mut();
        point_data.set_array(&self.options.vector_array, vectors);
        point_data.set_active_vectors(&self.options.vector_array)?;
        warp(&with_vectors, None, self.options.scale_factor)
    }
}
