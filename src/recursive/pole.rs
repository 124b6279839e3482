//! Pole averaging for sphere-mode filtering.
//!
//! Several cells meet at a pole and each one writes its own filtered value
//! there. The table sums every write to a registered pole and replaces the
//! pole by the mean once all cells are done.

use crate::Vec3;
use hashbrown::HashMap;

/// Running sum of the values written to one pole.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoleAccumulator {
    pub sum: Vec3,
    pub count: usize,
}

impl PoleAccumulator {
    pub fn add(&mut self, value: Vec3) {
        for c in 0..3 {
            self.sum[c] += value[c];
        }
        self.count += 1;
    }

    /// Mean of the accumulated values; `None` before the first write.
    pub fn mean(&self) -> Option<Vec3> {
        (self.count > 0).then(|| {
            let inv = 1.0 / self.count as f64;
            [self.sum[0] * inv, self.sum[1] * inv, self.sum[2] * inv]
        })
    }
}

/// Registered poles in first-registration order.
#[derive(Clone, Debug, Default)]
pub struct PoleTable {
    index: HashMap<usize, usize>,
    poles: Vec<(usize, PoleAccumulator)>,
}

impl PoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `point` as a pole; registering twice is a no-op.
    pub fn register(&mut self, point: usize) {
        if !self.index.contains_key(&point) {
            self.index.insert(point, self.poles.len());
            self.poles.push((point, PoleAccumulator::default()));
        }
    }

    pub fn is_pole(&self, point: usize) -> bool {
        self.index.contains_key(&point)
    }

    /// Add `value` to `point` if it is a registered pole.
    pub fn accumulate(&mut self, point: usize, value: Vec3) {
        if let Some(&slot) = self.index.get(&point) {
            self.poles[slot].1.add(value);
        }
    }

    pub fn len(&self) -> usize {
        self.poles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poles.is_empty()
    }

    pub fn get(&self, point: usize) -> Option<&PoleAccumulator> {
        self.index.get(&point).map(|&slot| &self.poles[slot].1)
    }

    /// `(point, mean)` for every pole that received at least one write.
    pub fn finalize(&self) -> impl Iterator<Item = (usize, Vec3)> + '_ {
        self.poles
            .iter()
            .filter_map(|(point, acc)| acc.mean().map(|m| (*point, m)))
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.poles.clear();
    }
}
