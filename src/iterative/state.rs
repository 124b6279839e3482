//! Iteration counters and the reset rule.

/// When a request restarts from the input mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResetPolicy {
    /// Every request restarts from iteration zero.
    #[default]
    AlwaysFromZero,
    /// Continue from the cached mesh when the target is ahead of the current
    /// iteration.
    ResumeFromCurrent,
}

/// Progress of an iterative computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IterationState {
    /// Iterations applied to the cached mesh.
    pub current: usize,
    /// Iterations requested by the last request.
    pub target: usize,
    pub policy: ResetPolicy,
}

impl IterationState {
    pub fn new(policy: ResetPolicy) -> Self {
        Self {
            current: 0,
            target: 0,
            policy,
        }
    }

    /// True when a request for `target` iterations must restart from the input.
    ///
    /// This is the case under [`ResetPolicy::AlwaysFromZero`], before the first
    /// iteration, when the target moved backwards, and for a zero target.
    pub fn must_reset(&self, target: usize) -> bool {
        self.policy == ResetPolicy::AlwaysFromZero
            || self.current == 0
            || target < self.current
            || target == 0
    }
}
