//! Point-to-point adjacency for meshes.
//!
//! Two points are neighbours when they are consecutive in a polyline or share
//! a polygon boundary edge. Vertex lists contribute nothing.
//!
//! Determinism:
//! - Neighbour lists are always sorted and deduplicated.

use crate::data::mesh::Mesh;
use itertools::Itertools;

/// CSR-style adjacency graph over the points of a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointAdjacency {
    /// CSR offsets into `adjncy` for each point.
    pub xadj: Vec<usize>,
    /// CSR adjacency list (point indices).
    pub adjncy: Vec<usize>,
}

impl PointAdjacency {
    /// Build the adjacency of `mesh` from its lines and polygons.
    ///
    /// Cells are assumed valid (see [`validate_mesh`](crate::topology::validation::validate_mesh)).
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let n = mesh.n_points();
        let mut lists: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut link = |a: usize, b: usize| {
            if a != b {
                lists[a].push(b);
                lists[b].push(a);
            }
        };

        for line in mesh.lines().iter() {
            for (&a, &b) in line.iter().tuple_windows() {
                link(a, b);
            }
        }
        for poly in mesh.polys().iter().filter(|p| p.len() >= 2) {
            for (&a, &b) in poly.iter().circular_tuple_windows() {
                link(a, b);
            }
        }

        let mut xadj = Vec::with_capacity(n + 1);
        let mut adjncy = Vec::new();
        xadj.push(0);
        for mut nbrs in lists {
            nbrs.sort_unstable();
            nbrs.dedup();
            adjncy.extend(nbrs);
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }

    /// Return the neighbor index slice for point `i`.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    #[inline]
    pub fn degree(&self, i: usize) -> usize {
        self.xadj[i + 1] - self.xadj[i]
    }

    /// Number of points covered by the graph.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.xadj.len() - 1
    }
}
