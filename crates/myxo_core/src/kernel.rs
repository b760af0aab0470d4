//! Gaussian diffusion kernel construction.
//!
//! The trail field is diffused every tick by convolving it with a fixed 2D
//! Gaussian kernel. The kernel is built exactly once, at startup: the normal
//! CDF is sampled at `len + 1` evenly spaced points across
//! `[-spread, +spread]`, adjacent samples are differenced into a discrete 1D
//! profile, and the 2D kernel is the outer product of that profile with
//! itself, normalized to sum 1. Because the kernel is an outer product, the
//! convolution itself runs as two separable 1D passes (see `TrailField`).

/// A separable 2D Gaussian kernel, stored as its normalized 1D profile.
///
/// The implied 2D kernel is `weights[i] * weights[j]`; since the stored
/// profile sums to 1, the 2D weights do too.
#[derive(Debug, Clone)]
pub struct DiffusionKernel {
    weights: Vec<f32>,
    radius: usize,
}

impl DiffusionKernel {
    /// Builds a Gaussian kernel of the given side length (odd) and CDF
    /// sampling half-extent.
    ///
    /// Callers are expected to have validated `len` (odd, >= 1) and
    /// `spread` (> 0) via `SimConfig::validate`.
    #[must_use]
    pub fn gaussian(len: usize, spread: f64) -> Self {
        let mut cdf = Vec::with_capacity(len + 1);
        for i in 0..=len {
            let x = -spread + 2.0 * spread * (i as f64) / (len as f64);
            cdf.push(normal_cdf(x));
        }
        let profile: Vec<f64> = cdf.windows(2).map(|w| w[1] - w[0]).collect();
        let total: f64 = profile.iter().sum();
        let weights = profile.iter().map(|&v| (v / total) as f32).collect();
        Self {
            weights,
            radius: (len - 1) / 2,
        }
    }

    /// A kernel with a single unit weight: convolution is the identity.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            weights: vec![1.0],
            radius: 0,
        }
    }

    /// The normalized 1D profile.
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Number of cells on each side of the center tap.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Sum of the implied 2D kernel's weights.
    #[must_use]
    pub fn sum_2d(&self) -> f64 {
        let s: f64 = self.weights.iter().map(|&w| w as f64).sum();
        s * s
    }
}

/// Standard normal CDF via the Abramowitz & Stegun erf approximation
/// (7.1.26, max absolute error 1.5e-7).
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_sums_to_one() {
        let kernel = DiffusionKernel::gaussian(21, 20.0);
        assert!((kernel.sum_2d() - 1.0).abs() < 1e-6);
        assert_eq!(kernel.weights().len(), 21);
        assert_eq!(kernel.radius(), 10);
    }

    #[test]
    fn test_gaussian_is_symmetric_and_peaked() {
        let kernel = DiffusionKernel::gaussian(9, 4.0);
        let w = kernel.weights();
        for i in 0..w.len() / 2 {
            assert!(
                (w[i] - w[w.len() - 1 - i]).abs() < 1e-6,
                "profile must be symmetric"
            );
        }
        let center = w[kernel.radius()];
        assert!(w.iter().all(|&v| v <= center));
    }

    #[test]
    fn test_single_tap_is_identity() {
        let kernel = DiffusionKernel::gaussian(1, 20.0);
        assert_eq!(kernel.radius(), 0);
        assert!((kernel.weights()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_identity_kernel() {
        let kernel = DiffusionKernel::identity();
        assert_eq!(kernel.weights(), &[1.0]);
        assert_eq!(kernel.radius(), 0);
        assert!((kernel.sum_2d() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normal_cdf_reference_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.0) - 0.841_344_7).abs() < 1e-6);
        assert!(normal_cdf(-20.0) < 1e-12);
        assert!(normal_cdf(20.0) > 1.0 - 1e-12);
    }
}
