//! Iterative mesh algorithms.
//!
//! [`engine::IterativeEngine`] drives any [`engine::IterativeStep`]; the
//! concrete steps are
//! - [`deformable::DeformationStep`]: field-driven deformation, plain or regularized
//! - [`warp_step::IterativeWarpStep`]: random Brownian walk
//! - [`revolution::RevolutionStep`]: surface of revolution, one ring per iteration

pub mod deformable;
pub mod engine;
pub mod revolution;
pub mod state;
pub mod warp_step;

pub use deformable::{DeformationOptions, DeformationStep, ProbeBinding, RegularizationOptions};
pub use engine::{
    CachedMeshBuffer, EngineOptions, IterativeEngine, IterativeStep, ZeroIterationOutput,
};
pub use revolution::{RevolutionOptions, RevolutionStep};
pub use state::{IterationState, ResetPolicy};
pub use warp_step::{IterativeWarpOptions, IterativeWarpStep};

/// Engine running a [`DeformationStep`].
pub type DeformableMesh = IterativeEngine<DeformationStep>;
