//! Numeric primitives consumed by the iterative steps, plus mesh generators.

pub mod brownian;
pub mod meshgen;
pub mod probe;
pub mod smooth_vectors;
pub mod transform;

pub use brownian::brownian_vectors;
pub use meshgen::{UvSphereOptions, circle_polyline, uv_sphere};
pub use probe::{ProbeResult, probe, probe_mesh};
pub use smooth_vectors::{SmoothVectorsOptions, smooth_vectors};
pub use transform::{PointTransform, TransformHooks, transform_points, warp};
