//! # iterative-mesh
//!
//! iterative-mesh evolves polygonal meshes one iteration at a time and smooths
//! the signals carried by their polylines.
//!
//! ## Features
//! - An indexed [`Mesh`](data::mesh::Mesh) with vertex, line and polygon cells
//!   and named per-point vector arrays
//! - A resumable [`IterativeEngine`](iterative::engine::IterativeEngine) that
//!   caches its last result and only computes the iterations a request is missing
//! - Field-driven deformable meshes (plain and regularized), an iterative
//!   Brownian warp and a ring-by-ring surface of revolution
//! - A zero-phase second-order [`SymmetricRecursiveFilter`](recursive::filter::SymmetricRecursiveFilter)
//!   over closed curves or meridians meeting at poles
//!
//! ## Determinism
//!
//! All randomized decisions use `SmallRng` seeds drawn from configuration so runs are
//! reproducible. Unit tests fix seeds explicitly to ensure deterministic behavior.
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade; the crate never installs a logger.
//! Numeric divergence and non-manifold poles are reported at `warn` level.
//!
//! ## Usage
//! ```
//! use iterative_mesh::prelude::*;
//!
//! let circle = circle_polyline(16, 1.0, [0.0; 3], true)?;
//! let field = FnField::new(|p: Vec3| [p[0], p[1], 0.0]);
//! let mut engine = IterativeEngine::new(DeformationStep::new(DeformationOptions {
//!     scale_factor: 0.1,
//!     ..DeformationOptions::default()
//! }));
//! let grown = engine.request_iterations(2, Some(&circle), Some(&field))?;
//! assert!((grown.point(0)?[0] - 1.21).abs() < 1e-12);
//! # Ok::<(), iterative_mesh::mesh_error::MeshError>(())
//! ```

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod iterative;
pub mod mesh_error;
pub mod recursive;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A point or vector in 3-D space.
pub type Vec3 = [f64; 3];

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::Vec3;
    pub use crate::algs::meshgen::{UvSphereOptions, circle_polyline, uv_sphere};
    pub use crate::algs::smooth_vectors::SmoothVectorsOptions;
    pub use crate::data::field::{FnField, GridGeometry, ImageField, VectorField};
    pub use crate::data::mesh::{Mesh, SignalContainer};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::iterative::deformable::{DeformationOptions, DeformationStep};
    pub use crate::iterative::engine::{
        EngineOptions, IterativeEngine, IterativeStep, ZeroIterationOutput,
    };
    pub use crate::iterative::revolution::{RevolutionOptions, RevolutionStep};
    pub use crate::iterative::state::ResetPolicy;
    pub use crate::iterative::warp_step::{IterativeWarpOptions, IterativeWarpStep};
    pub use crate::mesh_error::MeshError;
    pub use crate::recursive::filter::{
        RecursiveFilterOptions, SignalSource, SymmetricRecursiveFilter,
    };
    pub use crate::recursive::kernel::{ConstantKernel, ExponentialSmoothingKernel, RecursiveKernel};
    pub use crate::topology::cell_array::CellArray;
    pub use crate::topology::companion::ExtrapolationMode;
}
