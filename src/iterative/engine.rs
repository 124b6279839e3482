//! Resumable iterate-until-target engine.
//!
//! [`IterativeEngine`] owns a concrete [`IterativeStep`] and a private copy of
//! the mesh the next step will read. A request for `target` iterations either
//! resumes from the cached mesh or restarts from the input (see
//! [`IterationState::must_reset`]), then applies the missing steps one by one.
//!
//! Every step result is deep-copied into the cache, so a step may return a
//! mesh that shares nothing with its input and the caller never observes the
//! engine's internal buffer.

use crate::data::field::VectorField;
use crate::data::mesh::Mesh;
use crate::debug_invariants::DebugInvariants;
use crate::iterative::state::{IterationState, ResetPolicy};
use crate::mesh_error::MeshError;

/// One iteration of an iterative mesh algorithm.
pub trait IterativeStep {
    /// Establish the initial condition from the input mesh (and field).
    fn reset(&mut self, input: &Mesh, field: Option<&dyn VectorField>) -> Result<(), MeshError>;

    /// Compute one iteration from the cached mesh.
    fn step(&mut self, cached: &Mesh, field: Option<&dyn VectorField>) -> Result<Mesh, MeshError>;
}

impl<S: IterativeStep + ?Sized> IterativeStep for Box<S> {
    fn reset(&mut self, input: &Mesh, field: Option<&dyn VectorField>) -> Result<(), MeshError> {
        (**self).reset(input, field)
    }

    fn step(&mut self, cached: &Mesh, field: Option<&dyn VectorField>) -> Result<Mesh, MeshError> {
        (**self).step(cached, field)
    }
}

/// What a request for zero iterations returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ZeroIterationOutput {
    /// A copy of the input mesh.
    #[default]
    PassThroughInput,
    /// The output of the last iteration ever computed, or the input when no
    /// iteration has run yet.
    LastIterativeOutput,
}

/// Engine configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineOptions {
    pub reset_policy: ResetPolicy,
    pub zero_iteration_output: ZeroIterationOutput,
}

/// Private deep copy of the mesh fed to the next step.
#[derive(Clone, Debug, Default)]
pub struct CachedMeshBuffer {
    mesh: Mesh,
    populated: bool,
}

impl CachedMeshBuffer {
    /// Overwrite the buffer with a deep copy of `mesh`.
    pub fn store(&mut self, mesh: &Mesh) {
        self.mesh.copy_from(mesh);
        self.populated = true;
        self.mesh.debug_assert_invariants();
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.populated.then_some(&self.mesh)
    }

    pub fn clear(&mut self) {
        self.mesh = Mesh::default();
        self.populated = false;
    }
}

/// Drives an [`IterativeStep`] to a requested iteration count.
pub struct IterativeEngine<S> {
    step: S,
    options: EngineOptions,
    state: IterationState,
    cache: CachedMeshBuffer,
    last_output: Option<Mesh>,
    needs_reset: bool,
}

impl<S: IterativeStep> IterativeEngine<S> {
    pub fn new(step: S) -> Self {
        Self::with_options(step, EngineOptions::default())
    }

    pub fn with_options(step: S, options: EngineOptions) -> Self {
        Self {
            step,
            options,
            state: IterationState::new(options.reset_policy),
            cache: CachedMeshBuffer::default(),
            last_output: None,
            needs_reset: true,
        }
    }

    /// Bring the output to `target` iterations past the input.
    ///
    /// `input` is required; `field` is forwarded to the step, which decides
    /// whether it needs one.
    pub fn request_iterations(
        &mut self,
        target: usize,
        input: Option<&Mesh>,
        field: Option<&dyn VectorField>,
    ) -> Result<Mesh, MeshError> {
        let input = input.ok_or(MeshError::MissingInput { port: "mesh" })?;
        input.validate_invariants()?;
        self.state.target = target;

        if self.needs_reset || self.state.must_reset(target) {
            log::debug!(
                "iterative engine: reset (current {}, target {target}, policy {:?})",
                self.state.current,
                self.state.policy
            );
            self.needs_reset = true;
            self.state.current = 0;
            self.step.reset(input, field)?;
            self.cache.store(input);
            self.needs_reset = false;
        }

        let start = self.state.current;
        while self.state.current < target {
            let cached = self
                .cache
                .mesh()
                .ok_or(MeshError::MissingInput { port: "cache" })?;
            let output = self.step.step(cached, field)?;
            self.cache.store(&output);
            self.last_output = Some(output);
            self.state.current += 1;
            log::trace!("iterative engine: iteration {} done", self.state.current);
        }
        log::debug!(
            "iterative engine: ran {} iterations, now at {}",
            self.state.current - start,
            self.state.current
        );

        if target == 0 {
            return Ok(match (self.options.zero_iteration_output, &self.last_output) {
                (ZeroIterationOutput::LastIterativeOutput, Some(last)) => last.clone(),
                _ => input.clone(),
            });
        }
        self.cache
            .mesh()
            .cloned()
            .ok_or(MeshError::MissingInput { port: "cache" })
    }

    pub fn state(&self) -> &IterationState {
        &self.state
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The mesh the next step would read, if a reset has happened.
    pub fn cached_input(&self) -> Option<&Mesh> {
        self.cache.mesh()
    }

    /// Output of the most recent iteration.
    pub fn last_output(&self) -> Option<&Mesh> {
        self.last_output.as_ref()
    }

    pub fn step(&self) -> &S {
        &self.step
    }

    /// Mutable access to the step, e.g. to change its scale factor between
    /// requests. Changing parameters does not force a reset.
    pub fn step_mut(&mut self) -> &mut S {
        &mut self.step
    }

    pub fn set_reset_policy(&mut self, policy: ResetPolicy) {
        self.options.reset_policy = policy;
        self.state.policy = policy;
    }

    pub fn set_zero_iteration_output(&mut self, output: ZeroIterationOutput) {
        self.options.zero_iteration_output = output;
    }

    /// Force the next request to restart from its input.
    pub fn invalidate(&mut self) {
        self.needs_reset = true;
        self.state.current = 0;
        self.cache.clear();
    }

    pub fn into_step(self) -> S {
        self.step
    }
}
