//! Named per-point vector arrays.
//!
//! Every array holds exactly one `Vec3` tuple per mesh point. One array may be
//! designated as the *active vectors*, which is what the warp and the
//! recursive filter read when no array name is given.

use crate::Vec3;
use crate::mesh_error::MeshError;

/// A named array of per-point 3-vectors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointArray {
    name: String,
    tuples: Vec<Vec3>,
}

impl PointArray {
    pub fn new(name: impl Into<String>, tuples: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            tuples,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn tuples(&self) -> &[Vec3] {
        &self.tuples
    }

    #[inline]
    pub fn tuples_mut(&mut self) -> &mut [Vec3] {
        &mut self.tuples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

/// Collection of per-point arrays attached to a mesh.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointData {
    arrays: Vec<PointArray>,
    active_vectors: Option<String>,
}

impl PointData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `tuples` under `name`, replacing an existing array of that name.
    pub fn set_array(&mut self, name: &str, tuples: Vec<Vec3>) {
        match self.arrays.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.tuples = tuples,
            None => self.arrays.push(PointArray::new(name, tuples)),
        }
    }

    pub fn array(&self, name: &str) -> Option<&[Vec3]> {
        self.arrays
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.tuples.as_slice())
    }

    pub fn array_mut(&mut self, name: &str) -> Option<&mut [Vec3]> {
        self.arrays
            .iter_mut()
            .find(|a| a.name == name)
            .map(|a| a.tuples.as_mut_slice())
    }

    /// Look up `name` or fail with [`MeshError::MissingPointArray`].
    pub fn try_array(&self, name: &str) -> Result<&[Vec3], MeshError> {
        self.array(name)
            .ok_or_else(|| MeshError::MissingPointArray(name.to_owned()))
    }

    /// Remove and return the array called `name`.
    pub fn remove_array(&mut self, name: &str) -> Option<PointArray> {
        let pos = self.arrays.iter().position(|a| a.name == name)?;
        if self.active_vectors.as_deref() == Some(name) {
            self.active_vectors = None;
        }
        Some(self.arrays.remove(pos))
    }

    /// Designate an existing array as the active vectors.
    pub fn set_active_vectors(&mut self, name: &str) -> Result<(), MeshError> {
        if self.array(name).is_none() {
            return Err(MeshError::MissingPointArray(name.to_owned()));
        }
        self.active_vectors = Some(name.to_owned());
        Ok(())
    }

    pub fn active_vectors_name(&self) -> Option<&str> {
        self.active_vectors.as_deref()
    }

    /// The active vectors, if one is designated.
    pub fn vectors(&self) -> Option<&[Vec3]> {
        self.active_vectors.as_deref().and_then(|n| self.array(n))
    }

    pub fn vectors_mut(&mut self) -> Option<&mut [Vec3]> {
        let name = self.active_vectors.clone()?;
        self.array_mut(&name)
    }

    /// Resolve an explicit array name, falling back to the active vectors.
    pub fn resolve(&self, name: Option<&str>) -> Result<&[Vec3], MeshError> {
        match name {
            Some(name) => self.try_array(name),
            None => self
                .vectors()
                .ok_or_else(|| MeshError::MissingPointArray("<active vectors>".into())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointArray> {
        self.arrays.iter()
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Check that every array holds `n_points` tuples.
    pub fn validate_lengths(&self, n_points: usize) -> Result<(), MeshError> {
        for array in &self.arrays {
            if array.len() != n_points {
                return Err(MeshError::ArrayLengthMismatch {
                    name: array.name.clone(),
                    expected: n_points,
                    found: array.len(),
                });
            }
        }
        Ok(())
    }

    /// Append `count` zero tuples to every array (used when points are appended).
    pub(crate) fn extend_with_zeros(&mut self, count: usize) {
        for array in &mut self.arrays {
            array
                .tuples
                .extend(std::iter::repeat_n([0.0; 3], count));
        }
    }
}
