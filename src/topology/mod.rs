//! Cell storage and connectivity.
//!
//! - [`cell_array`]: compact cell lists
//! - [`adjacency`]: point-to-point neighbour graph
//! - [`companion`]: companion cells and curve-coordinate extrapolation
//! - [`validation`]: structural checks

pub mod adjacency;
pub mod cell_array;
pub mod companion;
pub mod validation;

pub use adjacency::PointAdjacency;
pub use cell_array::CellArray;
pub use companion::{ExtrapolationMode, SymmetricCellResolver};
