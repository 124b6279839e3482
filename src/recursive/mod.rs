//! Symmetric recursive filtering of polyline and vertex-list signals.

pub mod filter;
pub mod kernel;
pub mod pole;
pub mod signal;

pub use filter::{RecursiveFilterOptions, SignalSource, SymmetricRecursiveFilter};
pub use kernel::{Coefficients, ConstantKernel, ExponentialSmoothingKernel, RecursiveKernel};
pub use pole::{PoleAccumulator, PoleTable};
pub use signal::{SampleContext, SignalPath};
