//! MeshError: Unified error type for iterative-mesh public APIs
//!
//! Structural problems (missing inputs, broken topology) abort the current
//! request and surface here. Numeric-quality problems are not errors; they are
//! reported through `log::warn!` and remain detectable on the output mesh.

use thiserror::Error;

/// Unified error type for engine, filter and primitive operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A required input port carried no data when the request ran.
    #[error("missing input: no data on the `{port}` port")]
    MissingInput { port: &'static str },
    /// A cell references a point index outside the point array.
    #[error("topology error: cell {cell} references point {point}, mesh has {n_points} points")]
    PointIndexOutOfRange {
        cell: usize,
        point: usize,
        n_points: usize,
    },
    /// A point index outside the point array was requested directly.
    #[error("point {point} out of range ({n_points} points)")]
    PointOutOfRange { point: usize, n_points: usize },
    /// A cell id outside the cell array was requested.
    #[error("cell {cell} out of range ({n_cells} cells)")]
    CellOutOfRange { cell: usize, n_cells: usize },
    /// A cell is too short for the requested operation.
    #[error("topology error: cell {cell} has {len} points, at least {min} required")]
    DegenerateCell { cell: usize, len: usize, min: usize },
    /// No cell can continue `cell` through its starting pole.
    #[error("topology error: no companion cell for cell {cell} at pole {pole}")]
    MissingCompanion { cell: usize, pole: usize },
    /// A polygon edge is shared by more than two polygons.
    #[error("topology error: edge {edge:?} is shared by {incident_cells} polygons")]
    NonManifoldEdge {
        edge: (usize, usize),
        incident_cells: usize,
    },
    /// A named per-point array does not exist.
    #[error("point array `{0}` not found")]
    MissingPointArray(String),
    /// A per-point array does not match the number of points.
    #[error("point array `{name}` has {found} tuples, expected {expected}")]
    ArrayLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// A regular grid was described inconsistently.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    /// An option or argument is outside its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl MeshError {
    /// True for the structural topology failures (`TopologyError` family).
    pub fn is_topology_error(&self) -> bool {
        matches!(
            self,
            MeshError::PointIndexOutOfRange { .. }
                | MeshError::CellOutOfRange { .. }
                | MeshError::DegenerateCell { .. }
                | MeshError::MissingCompanion { .. }
                | MeshError::NonManifoldEdge { .. }
        )
    }
}
