//! Topology validation helpers.

use crate::data::mesh::Mesh;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use itertools::Itertools;
use std::collections::HashMap;

/// Optional validation toggles for mesh topology checks.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct TopologyValidationOptions {
    /// Ensure every per-point array has one tuple per point.
    pub check_array_lengths: bool,
    /// How to handle polygon edges shared by more than two polygons.
    pub non_manifold: NonManifoldHandling,
}

impl Default for TopologyValidationOptions {
    fn default() -> Self {
        Self {
            check_array_lengths: true,
            non_manifold: NonManifoldHandling::Ignore,
        }
    }
}

impl TopologyValidationOptions {
    /// Enable all topology validation checks.
    pub fn all() -> Self {
        Self {
            check_array_lengths: true,
            non_manifold: NonManifoldHandling::Error,
        }
    }
}

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NonManifoldHandling {
    /// Skip non-manifold detection.
    Ignore,
    /// Log a warning on non-manifold entities.
    Warn,
    /// Return an error on non-manifold entities.
    Error,
}

/// Check the structural invariants every algorithm relies on: cell indices
/// are in range and point arrays are sized to the point count.
pub fn validate_mesh(mesh: &Mesh) -> Result<(), MeshError> {
    validate_mesh_with(mesh, TopologyValidationOptions::default())
}

/// [`validate_mesh`] with explicit toggles.
pub fn validate_mesh_with(
    mesh: &Mesh,
    options: TopologyValidationOptions,
) -> Result<(), MeshError> {
    let n_points = mesh.n_points();
    for cells in [mesh.verts(), mesh.lines(), mesh.polys()] {
        cells.validate_invariants()?;
    }
    mesh.verts().validate_indices(n_points)?;
    mesh.lines().validate_indices(n_points)?;
    mesh.polys().validate_indices(n_points)?;

    if options.check_array_lengths {
        mesh.point_data().validate_lengths(n_points)?;
    }

    validate_non_manifold(mesh, options.non_manifold)
}

/// Count polygons per undirected edge and report edges with more than two.
pub fn validate_non_manifold(mesh: &Mesh, handling: NonManifoldHandling) -> Result<(), MeshError> {
    if handling == NonManifoldHandling::Ignore {
        return Ok(());
    }

    let mut incidence: HashMap<(usize, usize), usize> = HashMap::new();
    for poly in mesh.polys().iter() {
        if poly.len() < 2 {
            continue;
        }
        for (&a, &b) in poly.iter().circular_tuple_windows() {
            if a != b {
                *incidence.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }
    }

    let mut offenders: Vec<_> = incidence.into_iter().filter(|(_, n)| *n > 2).collect();
    offenders.sort_unstable();
    for ((a, b), count) in offenders {
        match handling {
            NonManifoldHandling::Warn => {
                log::warn!("Non-manifold edge detected: edge=({a}, {b}) incident_cells={count}");
            }
            NonManifoldHandling::Error => {
                return Err(MeshError::NonManifoldEdge {
                    edge: (a, b),
                    incident_cells: count,
                });
            }
            NonManifoldHandling::Ignore => {}
        }
    }
    Ok(())
}
