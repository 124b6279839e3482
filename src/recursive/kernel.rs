//! Second-order recursive kernels.
//!
//! A kernel defines the transfer function
//!
//! ```text
//! T(z) = (b0 + b1 z^-1 + b2 z^-2) / (a0 + a1 z^-1 + a2 z^-2)
//! ```
//!
//! and the impulse responses used to start the recursion. Coefficients may
//! change per sample: [`RecursiveKernel::prepare`] runs before every sample
//! and can inspect the local point sampling.

use crate::recursive::signal::SampleContext;

/// Recurrence coefficients for one sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coefficients {
    /// Feedback coefficients `a0, a1, a2`; `a0` must be non-zero.
    pub a: [f64; 3],
    /// Feed-forward coefficients `b0, b1, b2`.
    pub b: [f64; 3],
}

impl Coefficients {
    pub const IDENTITY: Self = Self {
        a: [1.0, 0.0, 0.0],
        b: [1.0, 0.0, 0.0],
    };
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A second-order recursive filter kernel.
pub trait RecursiveKernel {
    /// Coefficients of sample `k`.
    fn coefficients(&self, k: i64) -> Coefficients;

    /// Causal impulse response `h_c(k)`, `k >= 0`.
    fn causal_impulse_response(&self, k: usize) -> f64 {
        if k == 0 { 1.0 } else { 0.0 }
    }

    /// Impulse response of the whole causal/anti-causal cascade, `h_s(k)`.
    fn symmetric_impulse_response(&self, k: i64) -> f64 {
        if k == 0 { 1.0 } else { 0.0 }
    }

    /// True once the truncated impulse-response sums should stop at term `k`.
    fn stop_ir_approximation(&self, k: usize) -> bool {
        k >= 10
    }

    /// Hook run before sample `k` is computed.
    fn prepare(&mut self, _ctx: &SampleContext<'_>, _k: i64) {}
}

/// Kernel with fixed coefficients and delta impulse responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConstantKernel {
    pub coefficients: Coefficients,
}

impl ConstantKernel {
    pub fn new(a: [f64; 3], b: [f64; 3]) -> Self {
        Self {
            coefficients: Coefficients { a, b },
        }
    }
}

impl RecursiveKernel for ConstantKernel {
    fn coefficients(&self, _k: i64) -> Coefficients {
        self.coefficients
    }
}

/// Zero-phase exponential smoother.
///
/// Each pass computes `y[k] = alpha x[k] + (1 - alpha) y[k-1]`; the cascade of
/// both passes has unit DC gain. With `length_scale` set, `alpha` follows the
/// local point spacing `h` as `1 - exp(-h / length_scale)`, so unevenly
/// sampled curves are smoothed over a constant arc length.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExponentialSmoothingKernel {
    pub alpha: f64,
    pub length_scale: Option<f64>,
    #[serde(skip)]
    current_alpha: f64,
}

impl ExponentialSmoothingKernel {
    /// Fixed-bandwidth smoother; `alpha` in `(0, 1]`.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            length_scale: None,
            current_alpha: alpha,
        }
    }

    /// Sampling-adaptive smoother with the given arc-length scale.
    pub fn adaptive(length_scale: f64) -> Self {
        Self {
            alpha: 1.0,
            length_scale: Some(length_scale),
            current_alpha: 1.0,
        }
    }

    /// `alpha` in effect for the sample being computed.
    pub fn current_alpha(&self) -> f64 {
        self.current_alpha
    }

    fn decay(&self) -> f64 {
        1.0 - self.current_alpha
    }
}

impl Default for ExponentialSmoothingKernel {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl RecursiveKernel for ExponentialSmoothingKernel {
    fn coefficients(&self, _k: i64) -> Coefficients {
        Coefficients {
            a: [1.0, -self.decay(), 0.0],
            b: [self.current_alpha, 0.0, 0.0],
        }
    }

    fn causal_impulse_response(&self, k: usize) -> f64 {
        self.current_alpha * self.decay().powi(k as i32)
    }

    fn symmetric_impulse_response(&self, k: i64) -> f64 {
        let r = self.decay();
        let alpha = self.current_alpha;
        alpha * alpha * r.powi(k.unsigned_abs() as i32) / (1.0 - r * r)
    }

    fn prepare(&mut self, ctx: &SampleContext<'_>, k: i64) {
        self.current_alpha = match self.length_scale {
            Some(scale) if scale > 0.0 => {
                let h = ctx.point_sampling(k);
                (1.0 - (-h / scale).exp()).clamp(f64::EPSILON, 1.0)
            }
            _ => self.alpha,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_kernel_defaults_to_identity() {
        let k = ConstantKernel::default();
        assert_eq!(k.coefficients(3), Coefficients::IDENTITY);
        assert_eq!(k.causal_impulse_response(0), 1.0);
        assert_eq!(k.causal_impulse_response(1), 0.0);
        assert_eq!(k.symmetric_impulse_response(-1), 0.0);
        assert!(!k.stop_ir_approximation(9));
        assert!(k.stop_ir_approximation(10));
    }

    #[test]
    fn exponential_impulse_response_sums_to_one() {
        let k = ExponentialSmoothingKernel::new(0.3);
        let causal: f64 = (0..400).map(|i| k.causal_impulse_response(i)).sum();
        let symmetric: f64 = (-400..=400).map(|i| k.symmetric_impulse_response(i)).sum();
        assert!((causal - 1.0).abs() < 1e-12);
        assert!((symmetric - 1.0).abs() < 1e-12);
    }

    #[test]
    fn exponential_coefficients() {
        let k = ExponentialSmoothingKernel::new(0.25);
        let c = k.coefficients(0);
        assert_eq!(c.a, [1.0, -0.75, 0.0]);
        assert_eq!(c.b, [0.25, 0.0, 0.0]);
    }
}
