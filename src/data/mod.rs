//! Data module: meshes, per-point arrays and vector fields.
#![warn(missing_docs)]

#[allow(missing_docs)]
pub mod field;
#[allow(missing_docs)]
pub mod mesh;
#[allow(missing_docs)]
pub mod point_data;

pub use field::{FnField, GridGeometry, ImageField, VectorField};
pub use mesh::{Mesh, SignalContainer};
pub use point_data::{PointArray, PointData};
