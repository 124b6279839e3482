//! Surface of revolution built one ring per iteration.
//!
//! The input mesh is the profile. Iteration `r` rotates the profile by
//! `r * step_angle` about the axis, appends the rotated points as a new ring
//! and stitches every profile segment of the previous ring to the new ring
//! with a quad. A ring that lands on a full turn is not appended: its quads
//! close onto the profile itself and the sweep ends there. Once the swept
//! angle would pass `theta` the mesh is complete and further iterations leave
//! it unchanged.

use crate::Vec3;
use crate::algs::transform::{PointTransform, TransformHooks, transform_points};
use crate::data::field::VectorField;
use crate::data::mesh::Mesh;
use crate::geometry;
use crate::iterative::engine::IterativeStep;
use crate::mesh_error::MeshError;
use itertools::Itertools;
use std::f64::consts::TAU;

/// Options for [`RevolutionStep`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevolutionOptions {
    /// A point on the rotation axis.
    pub axis_origin: Vec3,
    /// Direction of the rotation axis; need not be normalized.
    pub axis_direction: Vec3,
    /// Total sweep in radians.
    pub theta: f64,
    /// Sweep per iteration in radians.
    pub step_angle: f64,
}

impl Default for RevolutionOptions {
    fn default() -> Self {
        Self::with_theta(TAU)
    }
}

impl RevolutionOptions {
    /// Sweep `theta` about the z axis in ten iterations.
    pub fn with_theta(theta: f64) -> Self {
        Self {
            axis_origin: [0.0; 3],
            axis_direction: [0.0, 0.0, 1.0],
            theta,
            step_angle: theta / 10.0,
        }
    }

    fn validate(&self) -> Result<(), MeshError> {
        if !(geometry::norm(self.axis_direction) > 0.0) || !geometry::is_finite(self.axis_direction) {
            return Err(MeshError::InvalidParameter(format!(
                "axis direction must be a finite non-zero vector, got {:?}",
                self.axis_direction
            )));
        }
        if !(self.step_angle > 0.0) || !self.step_angle.is_finite() || !self.theta.is_finite() {
            return Err(MeshError::InvalidParameter(format!(
                "step angle must be positive and finite, got {} (theta {})",
                self.step_angle, self.theta
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
struct Profile {
    points: Vec<Vec3>,
    segments: Vec<(usize, usize)>,
}

/// One sweep iteration of a surface of revolution.
#[derive(Clone, Debug, Default)]
pub struct RevolutionStep {
    options: RevolutionOptions,
    profile: Option<Profile>,
    rings: usize,
    closed: bool,
}

impl RevolutionStep {
    pub fn new(options: RevolutionOptions) -> Self {
        Self {
            options,
            profile: None,
            rings: 0,
            closed: false,
        }
    }

    pub fn options(&self) -> &RevolutionOptions {
        &self.options
    }

    /// Rings appended since the last reset.
    pub fn rings(&self) -> usize {
        self.rings
    }

    /// True once the full sweep has been generated.
    pub fn is_complete(&self) -> bool {
        self.closed || self.next_angle() > self.options.theta * (1.0 + 1e-12) + 1e-12
    }

    /// True once the sweep has wrapped around onto the profile.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn next_angle(&self) -> f64 {
        (self.rings + 1) as f64 * self.options.step_angle
    }
}

impl IterativeStep for RevolutionStep {
    fn reset(&mut self, input: &Mesh, _field: Option<&dyn VectorField>) -> Result<(), MeshError> {
        self.options.validate()?;
        let segments = input
            .lines()
            .iter()
            .flat_map(|line| line.iter().copied().tuple_windows::<(usize, usize)>())
            .filter(|(a, b)| a != b)
            .collect();
        self.profile = Some(Profile {
            points: input.points().to_vec(),
            segments,
        });
        self.rings = 0;
        self.closed = false;
        Ok(())
    }

    fn step(&mut self, cached: &Mesh, _field: Option<&dyn VectorField>) -> Result<Mesh, MeshError> {
        if self.is_complete() {
            log::trace!("revolution: sweep complete after {} rings", self.rings);
            return Ok(cached.clone());
        }
        let profile = self
            .profile
            .as_ref()
            .ok_or(MeshError::MissingInput { port: "profile" })?;
        let n = profile.points.len();
        if cached.n_points() < n {
            return Err(MeshError::InvalidParameter(format!(
                "cached mesh has {} points, profile has {n}",
                cached.n_points()
            )));
        }

        let angle = self.next_angle();
        let previous = cached.n_points() - n;
        let mut out = cached.clone();

        if (angle - TAU).abs() <= 1e-9 * TAU {
            for &(a, b) in &profile.segments {
                out.polys_mut().push_cell(&[previous + a, previous + b, b, a]);
            }
            self.closed = true;
            self.rings += 1;
            log::trace!("revolution: closed onto the profile after {} rings", self.rings);
            return Ok(out);
        }

        let RevolutionOptions {
            axis_origin,
            axis_direction,
            ..
        } = self.options;
        let mut ring = Mesh::from_points(profile.points.clone());
        let mut rotate = |_id: usize, p: &mut Vec3| -> Result<(), MeshError> {
            *p = geometry::rotate_about_axis(*p, axis_origin, axis_direction, angle);
            Ok(())
        };
        transform_points(
            &mut ring,
            PointTransform::Function(&mut rotate),
            TransformHooks::default(),
        )?;

        let first = out.append_points(ring.points());
        for &(a, b) in &profile.segments {
            out.polys_mut()
                .push_cell(&[previous + a, previous + b, first + b, first + a]);
        }
        self.rings += 1;
        Ok(out)
    }
}
