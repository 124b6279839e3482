//! Deformable mesh: points move along a vector field sampled at their own
//! position, optionally with the sampled vectors smoothed over the mesh first.

use crate::algs::probe::probe_mesh;
use crate::algs::smooth_vectors::{SmoothVectorsOptions, smooth_vectors};
use crate::algs::transform::warp;
use crate::data::field::VectorField;
use crate::data::mesh::Mesh;
use crate::iterative::engine::IterativeStep;
use crate::mesh_error::MeshError;

/// Vector smoothing applied between probing and warping.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegularizationOptions {
    pub smoothing: SmoothVectorsOptions,
    /// Name of the smoothed array; the warp reads this array.
    pub output_array: String,
}

impl Default for RegularizationOptions {
    fn default() -> Self {
        Self {
            smoothing: SmoothVectorsOptions::default(),
            output_array: "SmoothedVectors".into(),
        }
    }
}

/// Options for [`DeformationStep`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeformationOptions {
    pub scale_factor: f64,
    /// Name of the array holding the probed field vectors.
    pub probe_array: String,
    /// `Some` selects the regularized variant.
    pub regularization: Option<RegularizationOptions>,
}

impl Default for DeformationOptions {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            probe_array: "Magnitude".into(),
            regularization: None,
        }
    }
}

/// Tracks which field the probe reads and how often it has sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProbeBinding {
    /// Field epoch seen at the last reset; `None` until bound.
    pub bound_epoch: Option<u64>,
    /// Number of probe evaluations since construction.
    pub generation: u64,
}

/// One deformation iteration: probe, optionally regularize, warp.
#[derive(Clone, Debug, Default)]
pub struct DeformationStep {
    options: DeformationOptions,
    probe: ProbeBinding,
}

impl DeformationStep {
    pub fn new(options: DeformationOptions) -> Self {
        Self {
            options,
            probe: ProbeBinding::default(),
        }
    }

    /// Regularized variant with the given smoothing.
    pub fn regularized(scale_factor: f64, smoothing: SmoothVectorsOptions) -> Self {
        Self::new(DeformationOptions {
            scale_factor,
            regularization: Some(RegularizationOptions {
                smoothing,
                ..RegularizationOptions::default()
            }),
            ..DeformationOptions::default()
        })
    }

    pub fn options(&self) -> &DeformationOptions {
        &self.options
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.options.scale_factor = scale_factor;
    }

    pub fn scale_factor(&self) -> f64 {
        self.options.scale_factor
    }

    pub fn probe_binding(&self) -> &ProbeBinding {
        &self.probe
    }
}

impl IterativeStep for DeformationStep {
    fn reset(&mut self, _input: &Mesh, field: Option<&dyn VectorField>) -> Result<(), MeshError> {
        let field = field.ok_or(MeshError::MissingInput { port: "field" })?;
        self.probe.bound_epoch = Some(field.epoch());
        Ok(())
    }

    fn step(&mut self, cached: &Mesh, field: Option<&dyn VectorField>) -> Result<Mesh, MeshError> {
        let field = field.ok_or(MeshError::MissingInput { port: "field" })?;
        if self.probe.bound_epoch != Some(field.epoch()) {
            log::debug!(
                "deformation: field epoch changed ({:?} -> {}), rebinding probe",
                self.probe.bound_epoch,
                field.epoch()
            );
            self.probe.bound_epoch = Some(field.epoch());
        }

        let mut probed = cached.clone();
        probe_mesh(field, &mut probed, &self.options.probe_array);
        self.probe.generation += 1;

        let warp_array = match &self.options.regularization {
            None => self.options.probe_array.as_str(),
            Some(reg) => {
                let smoothed = smooth_vectors(&probed, &self.options.probe_array, &reg.smoothing)?;
                probed.point_data_mut().set_array(&reg.output_array, smoothed);
                reg.output_array.as_str()
            }
        };
        warp(&probed, Some(warp_array), self.options.scale_factor)
    }
}
