//! Invariant checking shared by the mesh containers.
//!
//! `Mesh` and `CellArray` validate their index invariants here; the engine and
//! the recursive filter call `validate_invariants` on every external input
//! before touching it.

use crate::mesh_error::MeshError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Panic on a violated invariant in debug builds (or with `strict-invariants`).
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Convenience wrapper over [`validate_invariants`](Self::validate_invariants).
    fn is_valid(&self) -> bool {
        self.validate_invariants().is_ok()
    }
}

/// Run a fallible check and panic with context when invariant checking is on.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
